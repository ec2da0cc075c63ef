//! Vowel and consonant sequence tables.
//!
//! The vowel table lists every 1-3 letter vowel combination a Vietnamese word
//! can contain, plus the unmodified intermediates a keystroke sequence passes
//! through on the way there (`ie` before `iê`, `uo` before `ươ`). Entries are
//! sorted by [`Symbol::seq_key`] so lookups binary-search. Lookups ignore tone
//! and case; modifiers are significant.

use core::fmt;

use crate::symbol::{Letter, Modifier, Symbol};

#[derive(Clone, Copy, Debug)]
pub struct VowelSeqInfo {
    len: u8,
    letters: [Symbol; 3],
    /// May end a word without a final consonant.
    complete: bool,
    /// May be followed by a final consonant.
    con_suffix: bool,
}

impl VowelSeqInfo {
    fn key(&self) -> [u8; 3] {
        seq_key(&self.letters[..self.len as usize])
    }
}

const fn vs(letters: &[Symbol], complete: bool, con_suffix: bool) -> VowelSeqInfo {
    let mut padded = [A; 3];
    let mut i = 0;
    while i < letters.len() {
        padded[i] = letters[i];
        i += 1;
    }
    VowelSeqInfo {
        len: letters.len() as u8,
        letters: padded,
        complete,
        con_suffix,
    }
}

const fn v(letter: Letter, modifier: Modifier) -> Symbol {
    Symbol::new(letter).with_modifier(modifier)
}

const A: Symbol = v(Letter::A, Modifier::None);
const AR: Symbol = v(Letter::A, Modifier::Circumflex);
const AB: Symbol = v(Letter::A, Modifier::Breve);
const E: Symbol = v(Letter::E, Modifier::None);
const ER: Symbol = v(Letter::E, Modifier::Circumflex);
const I: Symbol = v(Letter::I, Modifier::None);
const O: Symbol = v(Letter::O, Modifier::None);
const OR: Symbol = v(Letter::O, Modifier::Circumflex);
const OH: Symbol = v(Letter::O, Modifier::Horn);
const U: Symbol = v(Letter::U, Modifier::None);
const UH: Symbol = v(Letter::U, Modifier::Horn);
const Y: Symbol = v(Letter::Y, Modifier::None);

pub static VOWEL_SEQS: [VowelSeqInfo; 69] = [
    vs(&[A], true, true),
    vs(&[A, I], true, false),
    vs(&[A, O], true, false),
    vs(&[A, U], true, false),
    vs(&[A, Y], true, false),
    vs(&[AR], false, true),
    vs(&[AR, U], true, false),
    vs(&[AR, Y], true, false),
    vs(&[AB], false, true),
    vs(&[E], true, true),
    vs(&[E, O], true, false),
    vs(&[E, U], false, false),
    vs(&[ER], true, true),
    vs(&[ER, U], true, false),
    vs(&[I], true, true),
    vs(&[I, A], true, false),
    vs(&[I, E], false, true),
    vs(&[I, E, U], false, false),
    vs(&[I, ER], false, true),
    vs(&[I, ER, U], true, false),
    vs(&[I, U], true, false),
    vs(&[O], true, true),
    vs(&[O, A], true, true),
    vs(&[O, A, I], true, false),
    vs(&[O, A, Y], true, false),
    vs(&[O, AB], false, true),
    vs(&[O, E], true, true),
    vs(&[O, E, O], true, false),
    vs(&[O, I], true, false),
    vs(&[O, O], false, true),
    vs(&[OR], true, true),
    vs(&[OR, I], true, false),
    vs(&[OH], true, true),
    vs(&[OH, I], true, false),
    vs(&[U], true, true),
    vs(&[U, A], true, true),
    vs(&[U, A, Y], true, false),
    vs(&[U, AR], false, true),
    vs(&[U, AR, Y], true, false),
    vs(&[U, E], true, true),
    vs(&[U, ER], true, true),
    vs(&[U, I], true, false),
    vs(&[U, O], false, true),
    vs(&[U, O, I], false, false),
    vs(&[U, O, U], false, false),
    vs(&[U, OR], false, true),
    vs(&[U, OR, I], true, false),
    vs(&[U, OH], true, false),
    vs(&[U, U], false, false),
    vs(&[U, Y], true, true),
    vs(&[U, Y, A], true, false),
    vs(&[U, Y, E], false, true),
    vs(&[U, Y, ER], false, true),
    vs(&[U, Y, U], true, false),
    vs(&[UH], true, true),
    vs(&[UH, A], true, false),
    vs(&[UH, I], true, false),
    vs(&[UH, O], false, true),
    vs(&[UH, O, I], false, false),
    vs(&[UH, O, U], false, false),
    vs(&[UH, OH], false, true),
    vs(&[UH, OH, I], true, false),
    vs(&[UH, OH, U], true, false),
    vs(&[UH, U], true, false),
    vs(&[Y], true, false),
    vs(&[Y, E], false, true),
    vs(&[Y, E, U], false, false),
    vs(&[Y, ER], false, true),
    vs(&[Y, ER, U], true, false),
];

fn seq_key(letters: &[Symbol]) -> [u8; 3] {
    let mut key = [0u8; 3];
    for (slot, sym) in key.iter_mut().zip(letters) {
        *slot = sym.seq_key();
    }
    key
}

/// Which letter a circumflex key may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoofTarget {
    Any,
    A,
    E,
    O,
}

impl RoofTarget {
    fn accepts(self, letter: Letter) -> bool {
        match self {
            RoofTarget::Any => true,
            RoofTarget::A => letter == Letter::A,
            RoofTarget::E => letter == Letter::E,
            RoofTarget::O => letter == Letter::O,
        }
    }
}

/// Which of horn / breve a hook key may apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookTarget {
    Any,
    Horn,
    Breve,
}

impl HookTarget {
    fn accepts(self, modifier: Modifier) -> bool {
        match self {
            HookTarget::Any => matches!(modifier, Modifier::Horn | Modifier::Breve),
            HookTarget::Horn => modifier == Modifier::Horn,
            HookTarget::Breve => modifier == Modifier::Breve,
        }
    }
}

fn hook_modifier(letter: Letter, target: HookTarget) -> Option<Modifier> {
    let class = letter.class();
    if class.horn && target.accepts(Modifier::Horn) {
        Some(Modifier::Horn)
    } else if class.breve && target.accepts(Modifier::Breve) {
        Some(Modifier::Breve)
    } else {
        None
    }
}

/// Identifier of a [`VOWEL_SEQS`] entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VowelSeq(u8);

/// Looks up 1-3 vowels. Tone and case are ignored.
pub fn lookup_vowel_seq(letters: &[Symbol]) -> Option<VowelSeq> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let key = seq_key(letters);
    VOWEL_SEQS
        .binary_search_by(|info| info.key().cmp(&key))
        .ok()
        .map(|index| VowelSeq(index as u8))
}

impl VowelSeq {
    #[inline(always)]
    pub fn info(self) -> &'static VowelSeqInfo {
        &VOWEL_SEQS[self.0 as usize]
    }

    #[inline(always)]
    pub fn len(self) -> usize {
        self.info().len as usize
    }

    pub fn letters(self) -> &'static [Symbol] {
        let info = self.info();
        &info.letters[..info.len as usize]
    }

    #[inline(always)]
    pub fn letter(self, k: usize) -> Symbol {
        self.letters()[k]
    }

    /// May end a word as is. Table metadata for hosts; the engine itself
    /// accepts incomplete runs while a word is being typed.
    pub fn is_complete(self) -> bool {
        self.info().complete
    }

    pub fn allows_suffix(self) -> bool {
        self.info().con_suffix
    }

    /// The sequence formed by the first `k + 1` letters.
    pub fn prefix(self, k: usize) -> VowelSeq {
        lookup_vowel_seq(&self.letters()[..=k]).unwrap_or(self)
    }

    pub fn roof_pos(self) -> Option<usize> {
        self.letters()
            .iter()
            .position(|sym| sym.modifier() == Modifier::Circumflex)
    }

    pub fn hook_pos(self) -> Option<usize> {
        self.letters()
            .iter()
            .position(|sym| matches!(sym.modifier(), Modifier::Horn | Modifier::Breve))
    }

    /// Index of the `o` in a `uo` pair, when no letter outside the pair
    /// carries a modifier.
    fn horn_pair(self) -> Option<usize> {
        let letters = self.letters();
        let k = (1..letters.len())
            .find(|&k| letters[k - 1].letter() == Letter::U && letters[k].letter() == Letter::O)?;
        let outside = letters
            .iter()
            .enumerate()
            .any(|(i, sym)| i + 1 != k && i != k && sym.modifier() != Modifier::None);
        (!outside).then_some(k)
    }

    fn changed_to(self, letters: &[Symbol]) -> Option<VowelSeq> {
        lookup_vowel_seq(letters).filter(|&seq| seq != self)
    }

    /// The sequence with a circumflex added. A horn or breve switches to a
    /// circumflex on the same letter; `ươ` switches to `uô` as a pair.
    pub fn with_roof(self, target: RoofTarget) -> Option<VowelSeq> {
        if self.roof_pos().is_some() {
            return None;
        }
        let len = self.len();
        let mut letters = self.info().letters;
        if let Some(k) = self.hook_pos() {
            match self.horn_pair() {
                Some(pair) if target.accepts(Letter::O) => {
                    letters[pair - 1] = letters[pair - 1].without_modifier();
                    letters[pair] = letters[pair].with_modifier(Modifier::Circumflex);
                }
                _ => {
                    let letter = letters[k].letter();
                    if !letter.class().circumflex || !target.accepts(letter) {
                        return None;
                    }
                    letters[k] = letters[k].with_modifier(Modifier::Circumflex);
                }
            }
            return self.changed_to(&letters[..len]);
        }
        for k in 0..len {
            let letter = letters[k].letter();
            if !letter.class().circumflex || !target.accepts(letter) {
                continue;
            }
            let mut candidate = letters;
            candidate[k] = candidate[k].with_modifier(Modifier::Circumflex);
            if let Some(seq) = self.changed_to(&candidate[..len]) {
                return Some(seq);
            }
        }
        None
    }

    /// The sequence with its circumflex removed, if it has one on a letter
    /// the target accepts.
    pub fn without_roof(self, target: RoofTarget) -> Option<VowelSeq> {
        let k = self.roof_pos()?;
        if !target.accepts(self.letter(k).letter()) {
            return None;
        }
        let mut letters = self.info().letters;
        letters[k] = letters[k].without_modifier();
        lookup_vowel_seq(&letters[..self.len()])
    }

    /// The sequence with a horn or breve added. `uo` takes the horn on both
    /// letters; a circumflex switches to a horn or breve on the same letter.
    pub fn with_hook(self, target: HookTarget) -> Option<VowelSeq> {
        let len = self.len();
        let mut letters = self.info().letters;
        if let Some(k) = self.horn_pair().filter(|_| target.accepts(Modifier::Horn)) {
            letters[k - 1] = letters[k - 1].without_modifier().with_modifier(Modifier::Horn);
            letters[k] = letters[k].without_modifier().with_modifier(Modifier::Horn);
            return self.changed_to(&letters[..len]);
        }
        if self.hook_pos().is_some() {
            return None;
        }
        if let Some(k) = self.roof_pos() {
            let modifier = hook_modifier(letters[k].letter(), target)?;
            letters[k] = letters[k].with_modifier(modifier);
            return self.changed_to(&letters[..len]);
        }
        for k in 0..len {
            let Some(modifier) = hook_modifier(letters[k].letter(), target) else {
                continue;
            };
            let mut candidate = letters;
            candidate[k] = candidate[k].with_modifier(modifier);
            if let Some(seq) = self.changed_to(&candidate[..len]) {
                return Some(seq);
            }
        }
        None
    }

    /// The sequence with every horn/breve the target accepts removed.
    pub fn without_hook(self, target: HookTarget) -> Option<VowelSeq> {
        let len = self.len();
        let mut letters = self.info().letters;
        let mut found = false;
        for sym in letters[..len].iter_mut() {
            if target.accepts(sym.modifier()) {
                *sym = sym.without_modifier();
                found = true;
            }
        }
        if !found {
            return None;
        }
        lookup_vowel_seq(&letters[..len])
    }

    /// Index of the letter that carries the tone. `terminated` means no
    /// final consonant follows; `modern` places the tone of word-final
    /// `oa`, `oe`, `uy` on the second letter.
    pub fn tone_offset(self, terminated: bool, modern: bool) -> usize {
        let len = self.len();
        if len == 1 {
            return 0;
        }
        if let Some(k) = self.roof_pos() {
            return k;
        }
        if let Some(k) = self.hook_pos() {
            // ươ: the tone belongs to ơ
            let paired = k + 1 < len && self.letter(k + 1).modifier() == Modifier::Horn;
            return if paired { k + 1 } else { k };
        }
        if len == 3 {
            return 1;
        }
        if modern && self.is_modern_pair() {
            return 1;
        }
        if terminated { 0 } else { 1 }
    }

    fn is_modern_pair(self) -> bool {
        matches!(
            (self.letter(0).letter(), self.letter(1).letter()),
            (Letter::O, Letter::A) | (Letter::O, Letter::E) | (Letter::U, Letter::Y)
        )
    }
}

impl fmt::Debug for VowelSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VowelSeq(")?;
        for sym in self.letters() {
            write!(f, "{}", sym.to_char())?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ConsonantSeqInfo {
    len: u8,
    letters: [Letter; 3],
    /// May close a word.
    suffix: bool,
}

const fn cs(letters: &[Letter], suffix: bool) -> ConsonantSeqInfo {
    let mut padded = [Letter::B; 3];
    let mut i = 0;
    while i < letters.len() {
        padded[i] = letters[i];
        i += 1;
    }
    ConsonantSeqInfo {
        len: letters.len() as u8,
        letters: padded,
        suffix,
    }
}

pub static CONSONANT_SEQS: [ConsonantSeqInfo; 26] = {
    use Letter::*;
    [
        cs(&[B], false),
        cs(&[C], true),
        cs(&[C, H], true),
        cs(&[D], false),
        cs(&[DStroke], false),
        cs(&[G], false),
        cs(&[G, H], false),
        cs(&[H], false),
        cs(&[K], false),
        cs(&[K, H], false),
        cs(&[L], false),
        cs(&[M], true),
        cs(&[N], true),
        cs(&[N, G], true),
        cs(&[N, G, H], false),
        cs(&[N, H], true),
        cs(&[P], true),
        cs(&[P, H], false),
        cs(&[Q], false),
        cs(&[R], false),
        cs(&[S], false),
        cs(&[T], true),
        cs(&[T, H], false),
        cs(&[T, R], false),
        cs(&[V], false),
        cs(&[X], false),
    ]
};

/// Identifier of a [`CONSONANT_SEQS`] entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsonantSeq(u8);

/// Looks up 1-3 consonants by base letter. Short table, linear scan.
pub fn lookup_consonant_seq(letters: &[Symbol]) -> Option<ConsonantSeq> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    CONSONANT_SEQS
        .iter()
        .position(|info| {
            info.len as usize == letters.len()
                && info
                    .letters
                    .iter()
                    .zip(letters)
                    .all(|(&letter, sym)| sym.letter() == letter)
        })
        .map(|index| ConsonantSeq(index as u8))
}

impl ConsonantSeq {
    #[inline(always)]
    pub fn info(self) -> &'static ConsonantSeqInfo {
        &CONSONANT_SEQS[self.0 as usize]
    }

    pub fn len(self) -> usize {
        self.info().len as usize
    }

    pub fn letters(self) -> &'static [Letter] {
        let info = self.info();
        &info.letters[..info.len as usize]
    }

    pub fn is_suffix(self) -> bool {
        self.info().suffix
    }
}

impl fmt::Debug for ConsonantSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsonantSeq(")?;
        for &letter in self.letters() {
            write!(f, "{}", Symbol::new(letter).to_char())?;
        }
        f.write_str(")")
    }
}
