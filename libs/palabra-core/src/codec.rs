//! Text codec for the trainer's data files.
//!
//! # Formats
//! ```text
//! dictionary.txt / new_words.txt     word : meaning : example | example
//! to_practice.txt / today.txt        word
//! difficult_5.txt / difficult_15.txt 2024-03-01,word
//! ```
//!
//! Blank lines and lines starting with `#` are ignored everywhere. Malformed
//! lines are skipped one by one; a parse never rejects a whole file.

use crate::types::{Card, CardMap, DatedWords};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Yield trimmed lines that carry content.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Join lines with a trailing newline only when there is at least one line.
fn join_lines(lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Parse a card file into a map keyed by word.
///
/// A later line for the same word replaces the earlier card but keeps its
/// position.
pub fn parse_cards(text: &str) -> CardMap {
    let mut cards = CardMap::new();
    for line in content_lines(text) {
        if let Some(card) = parse_card_line(line) {
            cards.insert(card.word.clone(), card);
        }
    }
    cards
}

fn parse_card_line(line: &str) -> Option<Card> {
    let parts: Vec<&str> = line.split(':').map(str::trim).collect();
    let [word, meaning, example] = parts.as_slice() else {
        return None;
    };
    if word.is_empty() {
        return None;
    }
    Some(Card::new(*word, *meaning, *example))
}

/// Serialize cards in map order, one `word : meaning : example` line each.
pub fn serialize_cards(cards: &CardMap) -> String {
    join_lines(
        cards
            .values()
            .map(|c| format!("{} : {} : {}", c.word, c.meaning, c.example))
            .collect(),
    )
}

/// Parse a plain word list. Duplicates are kept as they appear.
pub fn parse_word_list(text: &str) -> Vec<String> {
    content_lines(text).map(str::to_string).collect()
}

/// Serialize a word list, dropping repeats after their first occurrence.
pub fn serialize_word_list(words: &[String]) -> String {
    let mut seen = std::collections::HashSet::new();
    join_lines(
        words
            .iter()
            .filter(|w| seen.insert(w.as_str()))
            .cloned()
            .collect(),
    )
}

/// Parse a dated word list. For repeated words the later date wins.
pub fn parse_dated_list(text: &str) -> DatedWords {
    let mut dated = DatedWords::new();
    for line in content_lines(text) {
        let Some((date, word)) = parse_dated_line(line) else {
            continue;
        };
        match dated.get(&word) {
            Some(existing) if *existing >= date => {}
            _ => {
                dated.insert(word, date);
            }
        }
    }
    dated
}

fn parse_dated_line(line: &str) -> Option<(NaiveDate, String)> {
    let (date_str, word) = line.split_once(',')?;
    let (date_str, word) = (date_str.trim(), word.trim());
    if date_str.is_empty() || word.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).ok()?;
    Some((date, word.to_string()))
}

/// Serialize a dated word list sorted by date, then word.
pub fn serialize_dated_list(dated: &DatedWords) -> String {
    let mut entries: Vec<(&NaiveDate, &String)> = dated.iter().map(|(w, d)| (d, w)).collect();
    entries.sort();
    join_lines(
        entries
            .into_iter()
            .map(|(date, word)| format!("{},{}", date.format(DATE_FORMAT), word))
            .collect(),
    )
}
