//! Practice session: the mode state machine and its judgment effects.
//!
//! | Mode       | Active list        | I know                 | Don't know (confirmed)   |
//! |------------|--------------------|------------------------|--------------------------|
//! | NewWords   | staged words       | commit                 | commit, 5-day, Today     |
//! | Review     | practice ∩ dict    | drop from practice     | 5-day today, Today list  |
//! | FiveDay    | due 5-day ∩ dict   | move to 15-day today   | 5-day today, Today list  |
//! | FifteenDay | due 15-day ∩ dict  | drop 15-day + practice | 15-day today, Today list |
//! | Today      | today ∩ dict       | drop from Today list   | nothing                  |

use crate::error::{Result, VocabError};
use crate::queue;
use crate::store::VocabStore;
use crate::types::{split_examples, Card, CardMap, Mode, Tier, WordList};
use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Active word list for a mode, computed from the store.
pub fn load_words_for_mode<S: VocabStore + ?Sized>(
    store: &S,
    mode: Mode,
    dictionary: &CardMap,
    today: NaiveDate,
) -> Result<Vec<String>> {
    match mode {
        Mode::NewWords => Ok(queue::load_new_words_preview(store)?.into_keys().collect()),
        Mode::Review => queue::load_list_words(store, WordList::Practice, dictionary),
        Mode::FiveDay => queue::load_due_words(store, Tier::FiveDay, dictionary, today),
        Mode::FifteenDay => queue::load_due_words(store, Tier::FifteenDay, dictionary, today),
        Mode::Today => queue::load_list_words(store, WordList::Today, dictionary),
    }
}

/// File effects of "I know".
pub fn apply_i_know<S: VocabStore + ?Sized>(
    store: &S,
    mode: Mode,
    word: &str,
    today: NaiveDate,
) -> Result<()> {
    match mode {
        Mode::NewWords => {
            queue::commit_new_word(store, word)?;
        }
        Mode::Review => queue::remove_from_list(store, WordList::Practice, word)?,
        Mode::FiveDay => queue::move_dated(store, Tier::FiveDay, Tier::FifteenDay, word, today)?,
        Mode::FifteenDay => {
            queue::remove_dated(store, Tier::FifteenDay, word)?;
            queue::remove_from_list(store, WordList::Practice, word)?;
        }
        Mode::Today => queue::remove_from_list(store, WordList::Today, word)?,
    }
    tracing::info!(word, mode = mode.as_str(), "marked known");
    Ok(())
}

/// File effects of a confirmed "Don't know".
pub fn apply_dont_know<S: VocabStore + ?Sized>(
    store: &S,
    mode: Mode,
    word: &str,
    today: NaiveDate,
) -> Result<()> {
    let tier = match mode {
        Mode::NewWords => {
            queue::commit_new_word(store, word)?;
            Tier::FiveDay
        }
        Mode::Review | Mode::FiveDay => Tier::FiveDay,
        Mode::FifteenDay => Tier::FifteenDay,
        Mode::Today => {
            tracing::info!(word, mode = mode.as_str(), "marked unknown");
            return Ok(());
        }
    };
    queue::upsert_dated(store, tier, word, today)?;
    queue::add_to_list(store, WordList::Today, word)?;
    tracing::info!(word, mode = mode.as_str(), "marked unknown");
    Ok(())
}

/// What the display may currently reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct View {
    pub show_hint: bool,
    pub show_verify: bool,
    pub show_answer: bool,
    pub pending_dont_know: bool,
}

/// Card content visible under the current view flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reveal {
    pub meaning: Option<String>,
    pub examples: Vec<String>,
}

/// Session state held by the application shell.
#[derive(Debug, Clone)]
pub struct Session {
    start_mode: Mode,
    mode: Mode,
    dictionary: CardMap,
    /// Staged cards, already merged with their dictionary entries.
    new_words: CardMap,
    words: Vec<String>,
    current: Option<String>,
    view: View,
}

impl Session {
    /// Load the dictionary and staging preview, then the start mode's list.
    ///
    /// Fails with [`VocabError::DictionaryMissing`] when there is no dictionary.
    pub fn start<S, R>(store: &S, start_mode: Mode, today: NaiveDate, rng: &mut R) -> Result<Self>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        let mut session = Self {
            start_mode,
            mode: start_mode,
            dictionary: queue::load_dictionary(store)?,
            new_words: queue::load_new_words_preview(store)?,
            words: Vec::new(),
            current: None,
            view: View::default(),
        };
        session.reload(store, today, rng, false)?;
        tracing::debug!(
            mode = start_mode.as_str(),
            dictionary = session.dictionary.len(),
            staged = session.new_words.len(),
            "session started"
        );
        Ok(session)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn dictionary(&self) -> &CardMap {
        &self.dictionary
    }

    pub fn new_words(&self) -> &CardMap {
        &self.new_words
    }

    /// Number of words in the active list.
    pub fn due_count(&self) -> usize {
        self.words.len()
    }

    /// Whether a "Don't know" is waiting for confirmation. Mode switches are
    /// refused while this holds.
    pub fn is_pending(&self) -> bool {
        self.view.pending_dont_know
    }

    /// Nothing left to practice in the current mode.
    pub fn all_reviewed(&self) -> bool {
        self.current.is_none()
    }

    /// Card to display for a word. A staged word shows its merged preview,
    /// anything else its dictionary card.
    pub fn card_for(&self, word: &str) -> Result<Card> {
        self.new_words
            .get(word)
            .or_else(|| self.dictionary.get(word))
            .cloned()
            .ok_or_else(|| VocabError::WordNotFound(word.to_string()))
    }

    /// Card for the current word.
    pub fn current_card(&self) -> Result<Card> {
        let word = self.current.as_deref().ok_or(VocabError::NoCurrentWord)?;
        self.card_for(word)
    }

    /// Content revealed by the hint, verify and answer flags.
    pub fn reveal(&self) -> Result<Reveal> {
        let v = self.view;
        if !(v.show_hint || v.show_verify || v.show_answer || v.pending_dont_know) {
            return Ok(Reveal::default());
        }
        let card = self.current_card()?;
        let meaning = (v.show_verify || v.show_answer || v.pending_dont_know)
            .then(|| card.meaning.clone());
        let examples = split_examples(&card.example)
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(Reveal { meaning, examples })
    }

    /// Recompute the active list from the store and pick a current word.
    ///
    /// With `keep_current`, the current word survives if it is still listed;
    /// otherwise a word is chosen uniformly at random. Clears all view flags.
    pub fn reload<S, R>(
        &mut self,
        store: &S,
        today: NaiveDate,
        rng: &mut R,
        keep_current: bool,
    ) -> Result<()>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        let words = load_words_for_mode(store, self.mode, &self.dictionary, today)?;
        let previous = self.current.take();
        self.view = View::default();

        self.current = match previous {
            Some(word) if keep_current && words.contains(&word) => Some(word),
            _ => words.choose(rng).cloned(),
        };
        self.words = words;
        Ok(())
    }

    /// Select another mode and load its list.
    pub fn switch_mode<S, R>(
        &mut self,
        mode: Mode,
        store: &S,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<()>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        self.ensure_not_pending()?;
        self.mode = mode;
        self.reload(store, today, rng, false)
    }

    /// Discard session state and reload everything from the store, returning
    /// to the start mode.
    pub fn reload_files<S, R>(&mut self, store: &S, today: NaiveDate, rng: &mut R) -> Result<()>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        self.ensure_not_pending()?;
        *self = Self::start(store, self.start_mode, today, rng)?;
        Ok(())
    }

    /// Show the current word's examples.
    pub fn hint(&mut self) -> Result<()> {
        self.ensure_not_pending()?;
        self.require_current()?;
        self.view.show_hint = true;
        Ok(())
    }

    /// Show the current word's meaning and examples.
    pub fn verify(&mut self) -> Result<()> {
        self.ensure_not_pending()?;
        self.require_current()?;
        self.view = View {
            show_verify: true,
            ..View::default()
        };
        Ok(())
    }

    /// Apply "I know" to the current word and move on.
    pub fn i_know<S, R>(&mut self, store: &S, today: NaiveDate, rng: &mut R) -> Result<()>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        self.ensure_not_pending()?;
        let word = self.require_current()?.to_string();
        apply_i_know(store, self.mode, &word, today)?;
        self.after_judgment(store, today, rng)
    }

    /// First phase of "Don't know": reveal the answer without touching the store.
    pub fn dont_know(&mut self) -> Result<()> {
        self.require_current()?;
        self.view.pending_dont_know = true;
        self.view.show_answer = true;
        self.view.show_hint = false;
        Ok(())
    }

    /// Second phase of "Don't know": apply its effects and move on.
    pub fn confirm_dont_know<S, R>(
        &mut self,
        store: &S,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<()>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.is_pending() {
            return Err(VocabError::NotPending);
        }
        let word = self.require_current()?.to_string();
        apply_dont_know(store, self.mode, &word, today)?;
        self.after_judgment(store, today, rng)
    }

    fn after_judgment<S, R>(&mut self, store: &S, today: NaiveDate, rng: &mut R) -> Result<()>
    where
        S: VocabStore + ?Sized,
        R: Rng + ?Sized,
    {
        if self.mode == Mode::NewWords {
            self.new_words = queue::load_new_words_preview(store)?;
            self.dictionary = queue::load_dictionary(store)?;
        }
        self.reload(store, today, rng, false)
    }

    fn ensure_not_pending(&self) -> Result<()> {
        if self.is_pending() {
            return Err(VocabError::ConfirmationPending);
        }
        Ok(())
    }

    fn require_current(&self) -> Result<&str> {
        self.current.as_deref().ok_or(VocabError::NoCurrentWord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CardStore, DatedListStore, MemoryStore, WordListStore};
    use crate::types::CardFile;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cards(entries: &[(&str, &str, &str)]) -> CardMap {
        entries
            .iter()
            .map(|(w, m, e)| (w.to_string(), Card::new(*w, *m, *e)))
            .collect()
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn store_with(dictionary: &[(&str, &str, &str)]) -> MemoryStore {
        MemoryStore::new().with_dictionary(cards(dictionary))
    }

    #[test]
    fn start_without_dictionary_fails() {
        let store = MemoryStore::new();
        let err = Session::start(&store, Mode::Review, date(2024, 1, 1), &mut rng()).unwrap_err();
        assert!(matches!(
            &err,
            VocabError::DictionaryMissing { location } if location == "Dictionary"
        ));
        assert_eq!(err.to_string(), "dictionary not found: Dictionary");
    }

    #[test]
    fn review_list_is_limited_to_dictionary() {
        let store = store_with(&[("uno", "one", "")]);
        store.save_words(WordList::Practice, &words(&["dos", "uno"])).unwrap();
        let session = Session::start(&store, Mode::Review, date(2024, 1, 1), &mut rng()).unwrap();
        assert_eq!(session.words(), ["uno"]);
        assert_eq!(session.current_word(), Some("uno"));
        assert_eq!(session.due_count(), 1);
    }

    #[test]
    fn review_i_know_drops_from_practice() {
        let store = store_with(&[("uno", "one", "")]);
        store.save_words(WordList::Practice, &words(&["uno"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Review, today, &mut rng()).unwrap();
        session.i_know(&store, today, &mut rng()).unwrap();
        assert!(store.load_words(WordList::Practice).unwrap().unwrap().is_empty());
        assert!(session.all_reviewed());
    }

    #[test]
    fn dont_know_is_two_phase() {
        let store = store_with(&[("uno", "one", "Tengo uno.")]);
        store.save_words(WordList::Practice, &words(&["uno"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Review, today, &mut rng()).unwrap();

        session.dont_know().unwrap();
        assert!(session.is_pending());
        assert!(store.load_dated(Tier::FiveDay).unwrap().is_none());
        assert_eq!(
            session.reveal().unwrap(),
            Reveal {
                meaning: Some("one".into()),
                examples: words(&["Tengo uno."]),
            }
        );

        let err = session.switch_mode(Mode::Today, &store, today, &mut rng()).unwrap_err();
        assert!(matches!(err, VocabError::ConfirmationPending));
        let err = session.i_know(&store, today, &mut rng()).unwrap_err();
        assert!(matches!(err, VocabError::ConfirmationPending));

        session.confirm_dont_know(&store, today, &mut rng()).unwrap();
        assert!(!session.is_pending());
        assert_eq!(store.load_dated(Tier::FiveDay).unwrap().unwrap()["uno"], today);
        assert_eq!(store.load_words(WordList::Today).unwrap().unwrap(), words(&["uno"]));
        // Review keeps the word on the practice list.
        assert_eq!(session.words(), ["uno"]);
    }

    #[test]
    fn confirm_without_dont_know_is_rejected() {
        let store = store_with(&[("uno", "one", "")]);
        store.save_words(WordList::Today, &words(&["uno"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Today, today, &mut rng()).unwrap();
        let err = session.confirm_dont_know(&store, today, &mut rng()).unwrap_err();
        assert!(matches!(err, VocabError::NotPending));
    }

    #[test]
    fn today_dont_know_changes_nothing() {
        let store = store_with(&[("uno", "one", "")]);
        store.save_words(WordList::Today, &words(&["uno"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Today, today, &mut rng()).unwrap();
        session.dont_know().unwrap();
        session.confirm_dont_know(&store, today, &mut rng()).unwrap();
        assert_eq!(store.load_words(WordList::Today).unwrap().unwrap(), words(&["uno"]));
        assert!(store.load_dated(Tier::FiveDay).unwrap().is_none());
        assert_eq!(session.current_word(), Some("uno"));
    }

    #[test]
    fn fifteen_day_i_know_clears_tier_and_practice() {
        let store = store_with(&[("uno", "one", "")]);
        store.save_words(WordList::Practice, &words(&["uno"])).unwrap();
        queue::upsert_dated(&store, Tier::FifteenDay, "uno", date(2024, 1, 1)).unwrap();
        let today = date(2024, 1, 16);
        let mut session = Session::start(&store, Mode::FifteenDay, today, &mut rng()).unwrap();
        assert_eq!(session.words(), ["uno"]);
        session.i_know(&store, today, &mut rng()).unwrap();
        assert!(store.load_dated(Tier::FifteenDay).unwrap().unwrap().is_empty());
        assert!(store.load_words(WordList::Practice).unwrap().unwrap().is_empty());
    }

    #[test]
    fn fifteen_day_dont_know_resets_interval() {
        let store = store_with(&[("uno", "one", "")]);
        queue::upsert_dated(&store, Tier::FifteenDay, "uno", date(2024, 1, 1)).unwrap();
        let today = date(2024, 1, 20);
        let mut session = Session::start(&store, Mode::FifteenDay, today, &mut rng()).unwrap();
        session.dont_know().unwrap();
        session.confirm_dont_know(&store, today, &mut rng()).unwrap();
        assert_eq!(store.load_dated(Tier::FifteenDay).unwrap().unwrap()["uno"], today);
        assert!(session.all_reviewed());
    }

    #[test]
    fn new_words_commit_on_i_know() {
        let store = store_with(&[("casa", "house", "Mi casa.")]);
        store
            .save_cards(CardFile::NewWords, &cards(&[("casa", "home", "En casa.")]))
            .unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::NewWords, today, &mut rng()).unwrap();

        let preview = session.current_card().unwrap();
        assert_eq!(preview.meaning, "house, home");
        // Preview never writes.
        let stored = store.load_cards(CardFile::Dictionary).unwrap().unwrap();
        assert_eq!(stored["casa"].meaning, "house");

        session.i_know(&store, today, &mut rng()).unwrap();
        assert_eq!(session.dictionary()["casa"].meaning, "house, home");
        assert!(session.new_words().is_empty());
        assert!(session.all_reviewed());
        assert!(store.load_dated(Tier::FiveDay).unwrap().is_none());
    }

    #[test]
    fn staged_card_is_merged_once() {
        let store = store_with(&[("casa", "house", "Mi casa."), ("sol", "sun", "")]);
        store
            .save_cards(
                CardFile::NewWords,
                &cards(&[("casa", "home", "En casa."), ("luna", "moon", "La luna.")]),
            )
            .unwrap();
        let session = Session::start(&store, Mode::NewWords, date(2024, 1, 1), &mut rng()).unwrap();

        assert_eq!(
            session.card_for("casa").unwrap(),
            Card::new("casa", "house, home", "En casa. | Mi casa.")
        );
        assert_eq!(session.card_for("luna").unwrap(), Card::new("luna", "moon", "La luna."));
        assert_eq!(session.card_for("sol").unwrap(), Card::new("sol", "sun", ""));
    }

    #[test]
    fn today_i_know_removes_only_current_word() {
        let store = store_with(&[("a", "1", ""), ("b", "2", ""), ("c", "3", "")]);
        store.save_words(WordList::Today, &words(&["a", "b", "c"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Today, today, &mut rng()).unwrap();
        let known = session.current_word().unwrap().to_string();

        session.i_know(&store, today, &mut rng()).unwrap();

        let expected: Vec<String> = words(&["a", "b", "c"])
            .into_iter()
            .filter(|w| *w != known)
            .collect();
        assert_eq!(store.load_words(WordList::Today).unwrap().unwrap(), expected);
        assert_eq!(session.words(), expected.as_slice());
        assert!(store.load_words(WordList::Practice).unwrap().is_none());
        assert!(store.load_dated(Tier::FiveDay).unwrap().is_none());
    }

    #[test]
    fn new_words_dont_know_also_schedules() {
        let store = store_with(&[]);
        store
            .save_cards(CardFile::NewWords, &cards(&[("luna", "moon", "")]))
            .unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::NewWords, today, &mut rng()).unwrap();
        session.dont_know().unwrap();
        session.confirm_dont_know(&store, today, &mut rng()).unwrap();
        assert!(store.load_cards(CardFile::Dictionary).unwrap().unwrap().contains_key("luna"));
        assert_eq!(store.load_dated(Tier::FiveDay).unwrap().unwrap()["luna"], today);
        assert_eq!(store.load_words(WordList::Today).unwrap().unwrap(), words(&["luna"]));
    }

    #[test]
    fn hint_and_verify_are_read_only_views() {
        let store = store_with(&[("uno", "one", "A. | B.")]);
        store.save_words(WordList::Today, &words(&["uno"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Today, today, &mut rng()).unwrap();

        session.hint().unwrap();
        assert_eq!(
            session.reveal().unwrap(),
            Reveal {
                meaning: None,
                examples: words(&["A.", "B."]),
            }
        );

        session.verify().unwrap();
        assert!(!session.view().show_hint);
        assert_eq!(session.reveal().unwrap().meaning.as_deref(), Some("one"));
        assert_eq!(store.load_words(WordList::Today).unwrap().unwrap(), words(&["uno"]));
        assert_eq!(session.current_word(), Some("uno"));
    }

    #[test]
    fn judgments_need_a_current_word() {
        let store = store_with(&[]);
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Today, today, &mut rng()).unwrap();
        assert!(session.all_reviewed());
        assert!(matches!(session.dont_know(), Err(VocabError::NoCurrentWord)));
        let err = session.i_know(&store, today, &mut rng()).unwrap_err();
        assert!(matches!(err, VocabError::NoCurrentWord));
    }

    #[test]
    fn reload_can_keep_current_word() {
        let store = store_with(&[("a", "1", ""), ("b", "2", ""), ("c", "3", "")]);
        store.save_words(WordList::Practice, &words(&["a", "b", "c"])).unwrap();
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Review, today, &mut rng()).unwrap();
        let current = session.current_word().unwrap().to_string();
        for seed in 0..10 {
            session
                .reload(&store, today, &mut StdRng::seed_from_u64(seed), true)
                .unwrap();
            assert_eq!(session.current_word(), Some(current.as_str()));
        }
    }

    #[test]
    fn reload_files_returns_to_start_mode() {
        let store = store_with(&[("uno", "one", "")]);
        let today = date(2024, 1, 1);
        let mut session = Session::start(&store, Mode::Review, today, &mut rng()).unwrap();
        session.switch_mode(Mode::Today, &store, today, &mut rng()).unwrap();
        store
            .save_cards(CardFile::Dictionary, &cards(&[("uno", "one", ""), ("dos", "two", "")]))
            .unwrap();
        session.reload_files(&store, today, &mut rng()).unwrap();
        assert_eq!(session.mode(), Mode::Review);
        assert_eq!(session.dictionary().len(), 2);
    }

    #[test]
    fn unknown_word_is_reported() {
        let store = store_with(&[]);
        let session = Session::start(&store, Mode::Today, date(2024, 1, 1), &mut rng()).unwrap();
        let err = session.card_for("nada").unwrap_err();
        assert!(matches!(err, VocabError::WordNotFound(w) if w == "nada"));
    }
}
