//! Keystroke-level Vietnamese transliteration.
//!
//! [`ViEngine`] turns a stream of Latin keys typed in Telex, VNI or VIQR
//! into Vietnamese text. For every key it answers with a [`ProcessResult`]:
//! how many already-shown characters the host must delete and what to insert
//! in their place, so a late `s` or `w` can rewrite a vowel typed earlier in
//! the same word.
//!
//! ```
//! use vitype::{InputMethod, ViEngine};
//!
//! let mut engine = ViEngine::new(InputMethod::Telex);
//! for ch in "vieet".chars() {
//!     engine.process_char(ch);
//! }
//! let result = engine.process_char('j');
//! assert_eq!(result.retract, 2);
//! assert_eq!(&*result.emit, "ệt");
//! assert_eq!(&*engine.word(), "việt");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

mod buffers;
mod engine;
#[cfg(feature = "std")]
mod error;
mod modes;
mod options;
mod symbol;
mod tables;
mod word;

pub use buffers::OutBuffer;
pub use engine::{ProcessResult, ViEngine, WORD_CAPACITY};
#[cfg(feature = "std")]
pub use error::{Error, Result};
pub use modes::{InputMethod, KeyAction, KeyClass, Mode, mode_for};
#[cfg(feature = "std")]
pub use options::Config;
pub use options::Options;
pub use symbol::{Letter, LetterClass, Modifier, Symbol, Tone};
pub use tables::{
    ConsonantSeq, HookTarget, RoofTarget, VowelSeq, lookup_consonant_seq, lookup_vowel_seq,
};
pub use word::{RunSeq, WordForm, WordPosition};
