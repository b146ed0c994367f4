//! Error types for palabra-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors raised by stores and the practice session.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary not found: {location}")]
    DictionaryMissing { location: String },

    #[error("word '{0}' not found in any source")]
    WordNotFound(String),

    #[error("a \"don't know\" confirmation is pending")]
    ConfirmationPending,

    #[error("no \"don't know\" confirmation is pending")]
    NotPending,

    #[error("no word selected")]
    NoCurrentWord,
}

impl VocabError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
