//! In-memory store, interchangeable with the text-file store.

use super::{CardStore, DatedListStore, WordListStore};
use crate::error::Result;
use crate::types::{CardFile, CardMap, DatedWords, Tier, WordList};
use std::cell::RefCell;
use std::collections::HashMap;

/// Store keeping every entity in memory. An entity never saved loads as `None`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RefCell<HashMap<CardFile, CardMap>>,
    words: RefCell<HashMap<WordList, Vec<String>>>,
    dated: RefCell<HashMap<Tier, DatedWords>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the dictionary.
    pub fn with_dictionary(self, cards: CardMap) -> Self {
        self.cards.borrow_mut().insert(CardFile::Dictionary, cards);
        self
    }
}

impl CardStore for MemoryStore {
    fn load_cards(&self, file: CardFile) -> Result<Option<CardMap>> {
        Ok(self.cards.borrow().get(&file).cloned())
    }

    fn save_cards(&self, file: CardFile, cards: &CardMap) -> Result<()> {
        self.cards.borrow_mut().insert(file, cards.clone());
        Ok(())
    }
}

impl WordListStore for MemoryStore {
    fn load_words(&self, list: WordList) -> Result<Option<Vec<String>>> {
        Ok(self.words.borrow().get(&list).cloned())
    }

    fn save_words(&self, list: WordList, words: &[String]) -> Result<()> {
        // Mirror the file codec, which drops repeats on write.
        let mut deduped: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            if !deduped.contains(word) {
                deduped.push(word.clone());
            }
        }
        self.words.borrow_mut().insert(list, deduped);
        Ok(())
    }
}

impl DatedListStore for MemoryStore {
    fn load_dated(&self, tier: Tier) -> Result<Option<DatedWords>> {
        Ok(self.dated.borrow().get(&tier).cloned())
    }

    fn save_dated(&self, tier: Tier, dated: &DatedWords) -> Result<()> {
        self.dated.borrow_mut().insert(tier, dated.clone());
        Ok(())
    }
}
