//! Journal use-case service.
//!
//! # Responsibility
//! - Validate reflection input at the boundary before any store call.
//! - Provide read-side conveniences that re-run the projections per call.
//!
//! # Invariants
//! - The store never sees untrimmed or empty text fields.
//! - Lookup misses stay boolean results, not errors.

use crate::model::reflection::{
    Reflection, ReflectionDraft, ReflectionId, ReflectionPatch, ReflectionValidationError,
};
use crate::projection::{heatmap, history};
use crate::repo::reflection_store::{Clock, ReflectionStore, StoreError, SystemClock};
use crate::repo::slot::StorageSlot;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalError {
    /// Input rejected at the boundary; nothing was written.
    Validation(ReflectionValidationError),
    /// Store-level failure; the mutation may not have been saved.
    Store(StoreError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ReflectionValidationError> for JournalError {
    fn from(value: ReflectionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for JournalError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case facade over the reflection store.
pub struct JournalService<S: StorageSlot, C: Clock = SystemClock> {
    store: ReflectionStore<S, C>,
}

impl<S: StorageSlot, C: Clock> JournalService<S, C> {
    /// Creates a service over the provided store.
    pub fn new(store: ReflectionStore<S, C>) -> Self {
        Self { store }
    }

    /// Records a new reflection.
    ///
    /// Trims all three fields and rejects empties before touching the
    /// store; returns the created record.
    pub fn add_reflection(
        &self,
        event: &str,
        win: &str,
        next: &str,
    ) -> Result<Reflection, JournalError> {
        let draft = ReflectionDraft::new(event, win, next)?;
        Ok(self.store.create(&draft)?)
    }

    /// Edits an existing reflection in place.
    ///
    /// Patch fields are trimmed and must be non-empty when present.
    /// Returns `Ok(false)` when no record has the given id.
    pub fn edit_reflection(
        &self,
        id: ReflectionId,
        patch: ReflectionPatch,
    ) -> Result<bool, JournalError> {
        let patch = patch.validated()?;
        Ok(self.store.update(id, &patch)?)
    }

    /// Deletes a reflection; returns whether one was removed.
    pub fn remove_reflection(&self, id: ReflectionId) -> Result<bool, JournalError> {
        Ok(self.store.delete(id)?)
    }

    /// Returns the raw collection snapshot, newest-first.
    pub fn reflections(&self) -> Result<Vec<Reflection>, JournalError> {
        Ok(self.store.list()?)
    }

    /// Derives the history view from the current collection.
    pub fn history(&self) -> Result<history::HistoryView, JournalError> {
        Ok(history::compute(&self.store.list()?))
    }

    /// Derives the activity heatmap for the window ending in `today`'s week.
    pub fn heatmap(&self, today: NaiveDate) -> Result<Vec<heatmap::HeatmapCell>, JournalError> {
        Ok(heatmap::compute(&self.store.list()?, today))
    }
}
