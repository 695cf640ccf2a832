//! History list projection.
//!
//! # Responsibility
//! - Derive the display-ready record list with compact win summaries.
//!
//! # Invariants
//! - Entry order is the store order (newest-first); the projection never
//!   re-sorts.
//! - `win_summary` is a display derivation; the record keeps the full
//!   `win` text.

use crate::model::reflection::Reflection;

/// Maximum characters shown in a collapsed win summary.
pub const WIN_SUMMARY_MAX_CHARS: usize = 40;

/// Marker appended when a summary was truncated.
pub const WIN_SUMMARY_ELLIPSIS: &str = "...";

/// One history row: the record plus its collapsed-header summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub record: Reflection,
    pub win_summary: String,
}

/// Display-ready history, with a distinct empty signal for the
/// empty-state affordance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
}

impl HistoryView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the history view from a records snapshot.
pub fn compute(records: &[Reflection]) -> HistoryView {
    HistoryView {
        entries: records
            .iter()
            .map(|record| HistoryEntry {
                win_summary: summarize_win(&record.win),
                record: record.clone(),
            })
            .collect(),
    }
}

fn summarize_win(win: &str) -> String {
    if win.chars().count() <= WIN_SUMMARY_MAX_CHARS {
        return win.to_string();
    }
    let mut summary: String = win.chars().take(WIN_SUMMARY_MAX_CHARS).collect();
    summary.push_str(WIN_SUMMARY_ELLIPSIS);
    summary
}
