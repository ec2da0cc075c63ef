use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vi::methods::transform_buffer as vi_transform_buffer;
use vitype::{InputMethod, ViEngine};

fn type_seq(engine: &mut ViEngine, seq: &str) {
    engine.reset();
    for c in seq.chars() {
        black_box(engine.process_char(c));
    }
}

fn type_seq_vi(def: &vi::Definition, out: &mut String, seq: &str) {
    out.clear();
    vi_transform_buffer(def, seq.chars(), out);
    black_box(&out);
}

const TELEX_CASES: &[(&str, &str)] = &[
    ("simple", "phoos"),
    ("sentence", "Tooi ddang gox Tieengs Vieejt "),
    ("mixed", "clear free pro "),
    ("uow", "huows"),
    ("cluster", "nghees"),
    ("glide", "giuowngf quoocs"),
];

const VNI_CASES: &[(&str, &str)] = &[
    ("simple", "pho61"),
    ("sentence", "To6i d9ang go4 Tie6ng1 Vie65t "),
    ("mixed", "clear free pro "),
    ("uow", "huo71"),
    ("cluster", "nghe61"),
];

const VIQR_CASES: &[(&str, &str)] = &[
    ("simple", "pho^'"),
    ("sentence", "To^i dda(ng go~ Tie^'ng Vie^.t "),
    ("uow", "hu+o+'"),
];

fn bench_vitype(c: &mut Criterion) {
    for (group_name, method, cases) in [
        ("vitype_telex", InputMethod::Telex, TELEX_CASES),
        ("vitype_vni", InputMethod::Vni, VNI_CASES),
        ("vitype_viqr", InputMethod::Viqr, VIQR_CASES),
    ] {
        let mut group = c.benchmark_group(group_name);
        for (name, seq) in cases {
            group.bench_with_input(BenchmarkId::from_parameter(*name), seq, |b, input| {
                let mut e = ViEngine::new(method);
                b.iter(|| {
                    type_seq(&mut e, input);
                })
            });
        }
        group.finish();
    }
}

fn bench_compare(c: &mut Criterion) {
    for (group_name, method, def, cases) in [
        ("compare_telex", InputMethod::Telex, &vi::TELEX, TELEX_CASES),
        ("compare_vni", InputMethod::Vni, &vi::VNI, VNI_CASES),
    ] {
        let mut group = c.benchmark_group(group_name);
        for (name, seq) in cases {
            group.bench_with_input(BenchmarkId::new("vitype", *name), seq, |b, input| {
                let mut e = ViEngine::new(method);
                b.iter(|| {
                    type_seq(&mut e, input);
                })
            });

            group.bench_with_input(BenchmarkId::new("vi", *name), seq, |b, input| {
                let mut out = String::new();
                b.iter(|| {
                    type_seq_vi(def, &mut out, input);
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_vitype, bench_compare);
criterion_main!(benches);
