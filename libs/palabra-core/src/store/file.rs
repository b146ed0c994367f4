//! Text-file backed store.

use super::{CardStore, DatedListStore, WordListStore};
use crate::codec;
use crate::error::{Result, VocabError};
use crate::types::{CardFile, CardMap, DatedWords, Tier, WordList};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Locations of the six data files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub dictionary: PathBuf,
    pub new_words: PathBuf,
    pub practice: PathBuf,
    pub today: PathBuf,
    pub difficult_5: PathBuf,
    pub difficult_15: PathBuf,
}

impl DataPaths {
    /// Standard file names inside one data directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            dictionary: dir.join("dictionary.txt"),
            new_words: dir.join("new_words.txt"),
            practice: dir.join("to_practice.txt"),
            today: dir.join("today.txt"),
            difficult_5: dir.join("difficult_5.txt"),
            difficult_15: dir.join("difficult_15.txt"),
        }
    }

    pub fn cards(&self, file: CardFile) -> &Path {
        match file {
            CardFile::Dictionary => &self.dictionary,
            CardFile::NewWords => &self.new_words,
        }
    }

    pub fn words(&self, list: WordList) -> &Path {
        match list {
            WordList::Practice => &self.practice,
            WordList::Today => &self.today,
        }
    }

    pub fn dated(&self, tier: Tier) -> &Path {
        match tier {
            Tier::FiveDay => &self.difficult_5,
            Tier::FifteenDay => &self.difficult_15,
        }
    }
}

/// Store that reads and rewrites whole UTF-8 text files.
#[derive(Debug, Clone)]
pub struct TextFileStore {
    paths: DataPaths,
}

impl TextFileStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// Store over the standard files in `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(DataPaths::in_dir(dir))
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    fn read(path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VocabError::io(path, e)),
        }
    }

    fn write(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| VocabError::io(parent, e))?;
            }
        }
        std::fs::write(path, content).map_err(|e| VocabError::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }
}

impl CardStore for TextFileStore {
    fn load_cards(&self, file: CardFile) -> Result<Option<CardMap>> {
        Ok(Self::read(self.paths.cards(file))?.map(|text| codec::parse_cards(&text)))
    }

    fn save_cards(&self, file: CardFile, cards: &CardMap) -> Result<()> {
        Self::write(self.paths.cards(file), &codec::serialize_cards(cards))
    }

    fn location(&self, file: CardFile) -> String {
        self.paths.cards(file).display().to_string()
    }
}

impl WordListStore for TextFileStore {
    fn load_words(&self, list: WordList) -> Result<Option<Vec<String>>> {
        Ok(Self::read(self.paths.words(list))?.map(|text| codec::parse_word_list(&text)))
    }

    fn save_words(&self, list: WordList, words: &[String]) -> Result<()> {
        Self::write(self.paths.words(list), &codec::serialize_word_list(words))
    }
}

impl DatedListStore for TextFileStore {
    fn load_dated(&self, tier: Tier) -> Result<Option<DatedWords>> {
        Ok(Self::read(self.paths.dated(tier))?.map(|text| codec::parse_dated_list(&text)))
    }

    fn save_dated(&self, tier: Tier, dated: &DatedWords) -> Result<()> {
        Self::write(self.paths.dated(tier), &codec::serialize_dated_list(dated))
    }
}
