//! Per-slot records of the word being composed.

use crate::symbol::{Symbol, Tone};
use crate::tables::{ConsonantSeq, VowelSeq};

/// Shape of the word up to and including a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordForm {
    #[default]
    Empty,
    C,
    V,
    CV,
    VC,
    CVC,
    NonVn,
}

/// Sequence active at a slot: the prefix of the run ending here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunSeq {
    #[default]
    None,
    Vowel(VowelSeq),
    Consonant(ConsonantSeq),
}

impl RunSeq {
    pub fn vowel(self) -> Option<VowelSeq> {
        match self {
            RunSeq::Vowel(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn consonant(self) -> Option<ConsonantSeq> {
        match self {
            RunSeq::Consonant(seq) => Some(seq),
            _ => None,
        }
    }
}

/// One buffer slot.
///
/// Offsets are backwards from this slot and only valid while the word lives:
/// - `c1_offset`: start of the initial consonant run,
/// - `v_offset`: on a vowel, its index inside the vowel run; on a final
///   consonant, the distance back to the vowel run's first letter,
/// - `c2_offset`: start of the final consonant run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordPosition {
    pub form: WordForm,
    pub c1_offset: Option<u8>,
    pub v_offset: Option<u8>,
    pub c2_offset: Option<u8>,
    pub seq: RunSeq,
    pub tone: Tone,
    /// Live letter without tone; `None` for keys outside the alphabet.
    pub sym: Option<Symbol>,
    pub caps: bool,
    pub key_code: u32,
    pub raw: char,
}

impl Default for WordPosition {
    fn default() -> Self {
        WordPosition::EMPTY
    }
}

impl WordPosition {
    pub const EMPTY: WordPosition = WordPosition {
        form: WordForm::Empty,
        c1_offset: None,
        v_offset: None,
        c2_offset: None,
        seq: RunSeq::None,
        tone: Tone::None,
        sym: None,
        caps: false,
        key_code: 0,
        raw: '\0',
    };

    /// A slot outside every run. Callers fill in form, offsets and sequence.
    pub fn new(key_code: u32, raw: char, sym: Option<Symbol>) -> WordPosition {
        WordPosition {
            form: WordForm::NonVn,
            tone: sym.map_or(Tone::None, Symbol::tone),
            caps: sym.map_or(raw.is_uppercase(), Symbol::is_upper),
            sym: sym.map(Symbol::without_tone),
            key_code,
            raw,
            ..WordPosition::EMPTY
        }
    }

    /// Letter with its tone applied.
    #[inline(always)]
    pub fn toned(&self) -> Option<Symbol> {
        self.sym.map(|sym| sym.with_tone(self.tone))
    }

    /// The character this slot shows.
    pub fn display(&self) -> char {
        match self.form {
            WordForm::NonVn | WordForm::Empty => self.raw,
            _ => self.toned().map_or(self.raw, Symbol::to_char),
        }
    }
}
