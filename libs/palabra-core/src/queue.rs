//! Queue operations over a store.
//!
//! Every mutation is a full read-modify-write of one entity. Moves across two
//! entities are two independent writes.

use crate::error::{Result, VocabError};
use crate::merge::{merge_card, preview_new_words};
use crate::store::{CardStore, DatedListStore, WordListStore};
use crate::types::{Card, CardFile, CardMap, DatedWords, Tier, WordList};
use chrono::{Duration, NaiveDate};

/// Words whose `added + interval_days <= today`.
pub fn due_words(dated: &DatedWords, interval_days: i64, today: NaiveDate) -> Vec<String> {
    let delta = Duration::days(interval_days);
    dated
        .iter()
        .filter(|(_, added)| **added + delta <= today)
        .map(|(word, _)| word.clone())
        .collect()
}

/// Keep only words present in the dictionary, preserving order.
pub fn filter_in_dictionary(words: Vec<String>, dictionary: &CardMap) -> Vec<String> {
    words
        .into_iter()
        .filter(|w| dictionary.contains_key(w))
        .collect()
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Load the base dictionary. A missing dictionary is fatal.
pub fn load_dictionary<S: CardStore + ?Sized>(store: &S) -> Result<CardMap> {
    store
        .load_cards(CardFile::Dictionary)?
        .ok_or_else(|| VocabError::DictionaryMissing {
            location: store.location(CardFile::Dictionary),
        })
}

/// Pending cards, each merged with its dictionary entry for display.
pub fn load_new_words_preview<S: CardStore + ?Sized>(store: &S) -> Result<CardMap> {
    let Some(pending) = store.load_cards(CardFile::NewWords)? else {
        return Ok(CardMap::new());
    };
    let dictionary = store.load_cards(CardFile::Dictionary)?.unwrap_or_default();
    Ok(preview_new_words(&pending, &dictionary))
}

/// Drop a word from the staging file, preserving the order of the rest.
pub fn remove_new_word<S: CardStore + ?Sized>(store: &S, word: &str) -> Result<()> {
    let Some(mut pending) = store.load_cards(CardFile::NewWords)? else {
        return Ok(());
    };
    pending.shift_remove(word);
    store.save_cards(CardFile::NewWords, &pending)
}

/// Merge a staged word into the dictionary and remove it from staging.
///
/// Returns the card written to the dictionary, or `None` when the word is not
/// staged.
pub fn commit_new_word<S: CardStore + ?Sized>(store: &S, word: &str) -> Result<Option<Card>> {
    let Some(pending) = store.load_cards(CardFile::NewWords)? else {
        return Ok(None);
    };
    let Some(incoming) = pending.get(word) else {
        tracing::warn!(word, "word not staged, nothing to commit");
        return Ok(None);
    };

    let mut dictionary = store.load_cards(CardFile::Dictionary)?.unwrap_or_default();
    let merged = merge_card(incoming, &dictionary);
    dictionary.insert(word.to_string(), merged.clone());
    dictionary.sort_keys();
    store.save_cards(CardFile::Dictionary, &dictionary)?;

    remove_new_word(store, word)?;
    tracing::debug!(word, meaning = %merged.meaning, "committed new word");
    Ok(Some(merged))
}

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

/// Words of a list that exist in the dictionary. Missing list is empty.
pub fn load_list_words<S: WordListStore + ?Sized>(
    store: &S,
    list: WordList,
    dictionary: &CardMap,
) -> Result<Vec<String>> {
    let words = store.load_words(list)?.unwrap_or_default();
    Ok(filter_in_dictionary(words, dictionary))
}

/// Append a word unless already listed. Creates the list if missing.
pub fn add_to_list<S: WordListStore + ?Sized>(store: &S, list: WordList, word: &str) -> Result<()> {
    let mut words = store.load_words(list)?.unwrap_or_default();
    if !words.iter().any(|w| w == word) {
        words.push(word.to_string());
    }
    store.save_words(list, &words)
}

/// Remove every occurrence of a word. No-op when the list is missing.
pub fn remove_from_list<S: WordListStore + ?Sized>(
    store: &S,
    list: WordList,
    word: &str,
) -> Result<()> {
    let Some(mut words) = store.load_words(list)? else {
        return Ok(());
    };
    words.retain(|w| w != word);
    store.save_words(list, &words)
}

// ---------------------------------------------------------------------------
// Difficulty tiers
// ---------------------------------------------------------------------------

/// Due words of a tier that exist in the dictionary. Missing tier is empty.
pub fn load_due_words<S: DatedListStore + ?Sized>(
    store: &S,
    tier: Tier,
    dictionary: &CardMap,
    today: NaiveDate,
) -> Result<Vec<String>> {
    let dated = store.load_dated(tier)?.unwrap_or_default();
    let due = due_words(&dated, tier.interval_days(), today);
    Ok(filter_in_dictionary(due, dictionary))
}

/// Set a word's date in a tier, inserting it if absent. Last write wins.
pub fn upsert_dated<S: DatedListStore + ?Sized>(
    store: &S,
    tier: Tier,
    word: &str,
    date: NaiveDate,
) -> Result<()> {
    let mut dated = store.load_dated(tier)?.unwrap_or_default();
    dated.insert(word.to_string(), date);
    store.save_dated(tier, &dated)
}

/// Remove a word from a tier. No-op when absent or when the tier is missing.
pub fn remove_dated<S: DatedListStore + ?Sized>(store: &S, tier: Tier, word: &str) -> Result<()> {
    let Some(mut dated) = store.load_dated(tier)? else {
        return Ok(());
    };
    if dated.remove(word).is_some() {
        store.save_dated(tier, &dated)?;
    }
    Ok(())
}

/// Remove from `src`, then upsert into `dst` with `date`.
pub fn move_dated<S: DatedListStore + ?Sized>(
    store: &S,
    src: Tier,
    dst: Tier,
    word: &str,
    date: NaiveDate,
) -> Result<()> {
    remove_dated(store, src, word)?;
    upsert_dated(store, dst, word, date)
}
