use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use vitype::{Config, InputMethod};

/// Transliterates stdin line by line, playing every character as a keystroke.
/// A `\x08` byte in the input acts as backspace.
#[derive(Parser, Debug)]
#[command(name = "vitype", version, about)]
struct Args {
    /// telex, vni or viqr (overrides the config file)
    #[arg(short, long)]
    method: Option<InputMethod>,

    /// TOML config with `input_method`, `free_marking`, `modern_style`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Old orthography: hóa, túy
    #[arg(long)]
    old_style: bool,

    /// Only mark the letter under the cursor
    #[arg(long)]
    no_free_marking: bool,
}

fn main() -> vitype::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_toml(path)?,
        None => Config::default(),
    };
    if let Some(method) = args.method {
        config.input_method = method;
    }
    if args.old_style {
        config.options.modern_style = false;
    }
    if args.no_free_marking {
        config.options.free_marking = false;
    }
    log::debug!("starting with {:?}", config);

    let mut engine = config.build_engine();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut text = String::new();

    for line in stdin.lock().lines() {
        let line = line?;
        text.clear();
        for ch in line.chars() {
            if ch == '\u{8}' {
                engine.process_backspace().apply_backspace(&mut text);
            } else {
                engine.process_char(ch).apply_key(&mut text, ch);
            }
        }
        engine.reset();
        writeln!(stdout, "{text}")?;
    }
    stdout.flush()?;
    Ok(())
}
