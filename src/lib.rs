//! Sentence-to-phoneme encoding for speech-synthesis training data.
//!
//! Raw sentences are split into tokens, rewritten by an ordered list of
//! normalization rules backed by a CMU-style pronunciation dictionary, and
//! finally mapped to integer symbol codes.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod normalize;
pub mod pronunciation;
pub mod symbols;
pub mod types;

pub use encoder::{EncodeError, SentenceEncoder};
pub use pronunciation::{DictionaryError, PronunciationDictionary};
pub use symbols::SymbolTable;
pub use types::{EncodedElement, EncodedSentence, Punctuation, Token};
