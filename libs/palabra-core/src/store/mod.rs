//! Storage interface for cards and queues.
//!
//! Each load returns `None` when the backing entity does not exist, so callers
//! decide whether absence means "empty" or "fatal".

pub mod file;
pub mod memory;

use crate::error::Result;
use crate::types::{CardFile, CardMap, DatedWords, Tier, WordList};

pub use file::{DataPaths, TextFileStore};
pub use memory::MemoryStore;

/// Store for card files (dictionary and staging).
pub trait CardStore {
    fn load_cards(&self, file: CardFile) -> Result<Option<CardMap>>;
    fn save_cards(&self, file: CardFile, cards: &CardMap) -> Result<()>;

    /// Where a card file lives, for error messages.
    fn location(&self, file: CardFile) -> String {
        format!("{file:?}")
    }
}

/// Store for flat word lists (practice and today).
pub trait WordListStore {
    fn load_words(&self, list: WordList) -> Result<Option<Vec<String>>>;
    fn save_words(&self, list: WordList, words: &[String]) -> Result<()>;
}

/// Store for dated difficulty tiers.
pub trait DatedListStore {
    fn load_dated(&self, tier: Tier) -> Result<Option<DatedWords>>;
    fn save_dated(&self, tier: Tier, dated: &DatedWords) -> Result<()>;
}

/// Everything the practice session needs.
pub trait VocabStore: CardStore + WordListStore + DatedListStore {}

impl<T: CardStore + WordListStore + DatedListStore> VocabStore for T {}
