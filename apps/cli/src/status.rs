//! Non-interactive summary of every mode's active list.

use chrono::NaiveDate;
use palabra_core::{load_words_for_mode, queue, Mode, VocabStore};
use serde::Serialize;
use std::io::Write;

/// Active-list size for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeCount {
    pub mode: Mode,
    pub label: &'static str,
    pub due: usize,
}

/// Status across all modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub today: NaiveDate,
    pub dictionary_words: usize,
    pub modes: Vec<ModeCount>,
}

/// Build the report from the store.
pub fn collect<S: VocabStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> palabra_core::Result<StatusReport> {
    let dictionary = queue::load_dictionary(store)?;
    let modes = Mode::ALL
        .into_iter()
        .map(|mode| -> palabra_core::Result<ModeCount> {
            let words = load_words_for_mode(store, mode, &dictionary, today)?;
            Ok(ModeCount {
                mode,
                label: mode.label(),
                due: words.len(),
            })
        })
        .collect::<palabra_core::Result<Vec<_>>>()?;

    Ok(StatusReport {
        today,
        dictionary_words: dictionary.len(),
        modes,
    })
}

/// Print the report as aligned text or JSON.
pub fn render<W: Write>(report: &StatusReport, json: bool, out: &mut W) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Study day: {}", report.today)?;
    writeln!(out, "Dictionary: {} words", report.dictionary_words)?;
    for count in &report.modes {
        writeln!(out, "  {:<10} {:>5}", count.label, count.due)?;
    }
    Ok(())
}
