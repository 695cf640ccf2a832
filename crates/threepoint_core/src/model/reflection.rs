//! Reflection domain model.
//!
//! # Responsibility
//! - Define the persisted reflection record and its wire field names.
//! - Provide the trim-validated draft used at the input boundary.
//! - Provide partial-update patch semantics with `win_length` recompute.
//!
//! # Invariants
//! - Wire names (`isoDate`, `date`, `winLength`) must not change; stored
//!   collections written by earlier versions are read back as-is.
//! - `iso_date` and `display_date` are fixed at creation; patches never
//!   touch them.
//! - `win_length` always equals the character count of the current `win`.

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a reflection: its creation time in epoch
/// milliseconds.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ReflectionId = i64;

/// Single-character Japanese weekday labels, Sunday first.
const WEEKDAY_KANJI: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// One day's structured journal entry.
///
/// Field order matters: serialization must emit the exact field set and
/// ordering of the stored collection format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    /// Creation timestamp in epoch milliseconds; unique across the
    /// collection.
    pub id: ReflectionId,
    /// Calendar date of creation, `YYYY-MM-DD`, local time.
    #[serde(rename = "isoDate")]
    pub iso_date: String,
    /// Localized long-form date of creation. Cosmetic only.
    #[serde(rename = "date")]
    pub display_date: String,
    /// What happened (fact).
    pub event: String,
    /// What went well (discovery).
    pub win: String,
    /// What to do next.
    pub next: String,
    /// Cached character count of `win` at last write.
    #[serde(rename = "winLength")]
    pub win_length: u32,
}

impl Reflection {
    /// Builds a record from a validated draft and its creation instant.
    ///
    /// The caller (the store) is responsible for id uniqueness; this
    /// constructor derives both date fields from `created_at` and computes
    /// `win_length` from the draft.
    pub fn from_draft(id: ReflectionId, created_at: &DateTime<Local>, draft: &ReflectionDraft) -> Self {
        Self {
            id,
            iso_date: iso_date_for(created_at),
            display_date: display_date_for(created_at),
            event: draft.event.clone(),
            win: draft.win.clone(),
            next: draft.next.clone(),
            win_length: char_count(&draft.win),
        }
    }

    /// Merges a patch into this record.
    ///
    /// Only `event`, `win` and `next` can change; `win_length` is recomputed
    /// when `win` is part of the patch, and the date fields stay untouched.
    pub fn apply(&mut self, patch: &ReflectionPatch) {
        if let Some(event) = &patch.event {
            self.event = event.clone();
        }
        if let Some(win) = &patch.win {
            self.win = win.clone();
            self.win_length = char_count(win);
        }
        if let Some(next) = &patch.next {
            self.next = next.clone();
        }
    }
}

/// Validation failure for reflection input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionValidationError {
    /// The named field is empty after trimming whitespace.
    EmptyField(&'static str),
}

impl Display for ReflectionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "reflection field `{field}` is empty"),
        }
    }
}

impl Error for ReflectionValidationError {}

/// Trim-validated input triple for creating a reflection.
///
/// Construction is the validation boundary: the store assumes drafts are
/// already well-formed and does not re-check emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionDraft {
    pub event: String,
    pub win: String,
    pub next: String,
}

impl ReflectionDraft {
    /// Trims all three fields and rejects any that end up empty.
    pub fn new(
        event: &str,
        win: &str,
        next: &str,
    ) -> Result<Self, ReflectionValidationError> {
        Ok(Self {
            event: required_field("event", event)?,
            win: required_field("win", win)?,
            next: required_field("next", next)?,
        })
    }
}

/// Partial update for an existing reflection. Merge semantics: `None`
/// leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionPatch {
    pub event: Option<String>,
    pub win: Option<String>,
    pub next: Option<String>,
}

impl ReflectionPatch {
    /// Returns whether this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.win.is_none() && self.next.is_none()
    }

    /// Trims all present fields and rejects any that end up empty.
    pub fn validated(self) -> Result<Self, ReflectionValidationError> {
        Ok(Self {
            event: self
                .event
                .as_deref()
                .map(|value| required_field("event", value))
                .transpose()?,
            win: self
                .win
                .as_deref()
                .map(|value| required_field("win", value))
                .transpose()?,
            next: self
                .next
                .as_deref()
                .map(|value| required_field("next", value))
                .transpose()?,
        })
    }
}

/// Formats the local calendar date as `YYYY-MM-DD`.
pub fn iso_date_for(instant: &DateTime<Local>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Formats the Japanese long-form display date, e.g. `2026年8月8日(土)`.
///
/// Matches the display strings already present in stored collections.
pub fn display_date_for(instant: &DateTime<Local>) -> String {
    let weekday = WEEKDAY_KANJI[instant.weekday().num_days_from_sunday() as usize];
    format!(
        "{}年{}月{}日({})",
        instant.year(),
        instant.month(),
        instant.day(),
        weekday
    )
}

/// Character count used for `win_length` (Unicode scalar values).
pub fn char_count(value: &str) -> u32 {
    value.chars().count() as u32
}

fn required_field(
    name: &'static str,
    value: &str,
) -> Result<String, ReflectionValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReflectionValidationError::EmptyField(name));
    }
    Ok(trimmed.to_string())
}
