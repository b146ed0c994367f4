//! Core types for the vocabulary trainer.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Delimiter between example sentences inside a card's `example` field.
pub const EXAMPLE_SEPARATOR: char = '|';

/// A dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub word: String,
    /// Comma-joined sub-meanings.
    pub meaning: String,
    /// Zero or more example sentences joined by `|`.
    pub example: String,
}

impl Card {
    pub fn new(
        word: impl Into<String>,
        meaning: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: example.into(),
        }
    }

    /// Example sentences as trimmed, non-empty fragments.
    pub fn examples(&self) -> Vec<&str> {
        split_examples(&self.example)
    }
}

/// Split an example field on `|`, dropping blank fragments.
pub fn split_examples(example: &str) -> Vec<&str> {
    example
        .split(EXAMPLE_SEPARATOR)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

/// Word -> card, in insertion order.
pub type CardMap = IndexMap<String, Card>;

/// Word -> date the word entered a difficulty tier.
pub type DatedWords = BTreeMap<String, NaiveDate>;

/// Practice mode selecting the active list and judgment rules.
///
/// Serializes as its short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    #[serde(rename = "new")]
    NewWords,
    #[serde(rename = "review")]
    Review,
    #[serde(rename = "5day")]
    FiveDay,
    #[serde(rename = "15day")]
    FifteenDay,
    #[serde(rename = "today")]
    Today,
}

impl Default for Mode {
    fn default() -> Self {
        Self::NewWords
    }
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::NewWords,
        Mode::Review,
        Mode::FiveDay,
        Mode::FifteenDay,
        Mode::Today,
    ];

    /// Short name used in configuration and commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewWords => "new",
            Self::Review => "review",
            Self::FiveDay => "5day",
            Self::FifteenDay => "15day",
            Self::Today => "today",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewWords => "New words",
            Self::Review => "Review",
            Self::FiveDay => "5 Day",
            Self::FifteenDay => "15 Day",
            Self::Today => "Today",
        }
    }

    /// Parse from a short name or a label, ignoring case.
    pub fn from_str(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL.into_iter().find(|mode| {
            mode.as_str().eq_ignore_ascii_case(needle) || mode.label().eq_ignore_ascii_case(needle)
        })
    }

    /// Difficulty tier whose due words feed this mode, if any.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::FiveDay => Some(Tier::FiveDay),
            Self::FifteenDay => Some(Tier::FifteenDay),
            _ => None,
        }
    }
}

/// Spaced-repetition interval tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    FiveDay,
    FifteenDay,
}

impl Tier {
    /// Days a word waits in this tier before it is due.
    pub fn interval_days(&self) -> i64 {
        match self {
            Self::FiveDay => 5,
            Self::FifteenDay => 15,
        }
    }
}

/// Card-shaped store files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFile {
    Dictionary,
    NewWords,
}

/// Flat word-list store files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordList {
    Practice,
    Today,
}
