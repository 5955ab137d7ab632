pub mod dictionary;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use dictionary::{Polyphone, PronunciationDictionary};

/// Convenient alias for results returned by dictionary loading.
pub type Result<T> = std::result::Result<T, DictionaryError>;

/// Failure to build a pronunciation dictionary. Fatal for the caller.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read pronunciation dictionary {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
