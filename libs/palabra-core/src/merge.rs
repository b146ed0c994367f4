//! Merging an incoming card with an existing dictionary entry.

use crate::types::{split_examples, Card, CardMap};
use std::collections::BTreeSet;

/// Combine `incoming` with the dictionary entry for the same word.
///
/// - Word not in the dictionary: `incoming` as-is.
/// - Incoming meaning is a substring of the existing one: the existing card,
///   unless the sorted example union is identical to the existing example
///   field. The computed union is discarded when it differs.
/// - Otherwise: meanings joined as `"existing, incoming"` and examples
///   replaced by the sorted union.
pub fn merge_card(incoming: &Card, dictionary: &CardMap) -> Card {
    let Some(existing) = dictionary.get(&incoming.word) else {
        return incoming.clone();
    };

    let merged_example = union_examples(&existing.example, &incoming.example);

    if existing.meaning.contains(incoming.meaning.as_str()) {
        // A differing union is dropped here; only an unchanged example passes through.
        if merged_example != existing.example {
            return existing.clone();
        }
        return Card::new(&incoming.word, &existing.meaning, merged_example);
    }

    Card::new(
        &incoming.word,
        format!("{}, {}", existing.meaning, incoming.meaning),
        merged_example,
    )
}

/// Sorted, de-duplicated union of two `|`-joined example fields.
pub fn union_examples(a: &str, b: &str) -> String {
    let all: BTreeSet<&str> = split_examples(a)
        .into_iter()
        .chain(split_examples(b))
        .collect();
    all.into_iter().collect::<Vec<_>>().join(" | ")
}

/// Preview every pending card merged with its dictionary entry.
pub fn preview_new_words(new_words: &CardMap, dictionary: &CardMap) -> CardMap {
    new_words
        .iter()
        .map(|(word, card)| (word.clone(), merge_card(card, dictionary)))
        .collect()
}
