//! Core library for the palabra vocabulary trainer.
//!
//! Provides:
//! - Text codec for the dictionary, word-list and dated word-list files
//! - Card merging for words re-entering the dictionary
//! - Queue operations over a pluggable store (text files or memory)
//! - The practice session state machine (modes and judgments)

pub mod codec;
pub mod date_utils;
pub mod error;
pub mod merge;
pub mod queue;
pub mod session;
pub mod store;
pub mod types;

pub use date_utils::adjusted_today;
pub use error::{Result, VocabError};
pub use merge::merge_card;
pub use session::{load_words_for_mode, Reveal, Session, View};
pub use store::{DataPaths, MemoryStore, TextFileStore, VocabStore};
pub use types::{Card, CardFile, CardMap, DatedWords, Mode, Tier, WordList};
