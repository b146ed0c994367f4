//! Shared fixtures for file-backed integration tests.

use chrono::NaiveDate;
use palabra_core::TextFileStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

/// Temporary data directory with a text-file store over it.
pub struct TestData {
    pub dir: TempDir,
    pub store: TextFileStore,
}

impl TestData {
    /// Create a data directory holding only a dictionary.
    pub fn with_dictionary(dictionary: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = TextFileStore::open(dir.path());
        let data = Self { dir, store };
        data.write("dictionary.txt", dictionary);
        data
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("write fixture");
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("read fixture")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A small Spanish dictionary.
pub const DICTIONARY: &str = "\
# word : meaning : example
casa : house : Mi casa es tu casa.
correr : run, jog : Ella corre. | Corro cada día.
gato : cat : El gato duerme.
";
