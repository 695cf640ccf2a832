//! Reflection store: CRUD over the persisted collection.
//!
//! # Responsibility
//! - Own the authoritative copy of the reflection collection in the slot.
//! - Enforce the derived-field invariant (`win_length`) on every write path.
//!
//! # Invariants
//! - Every mutation is a whole-collection read-modify-write of the slot;
//!   the payload is the newest-first JSON array of records.
//! - Unparsable payloads degrade to an empty collection (tolerant read);
//!   slot transport failures surface to the caller.
//! - Generated ids are unique and monotonically increasing within a
//!   process, even when the millisecond clock stalls.

use crate::model::reflection::{Reflection, ReflectionDraft, ReflectionId, ReflectionPatch};
use crate::repo::slot::{SlotError, StorageSlot};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure. Both variants mean the user's data was not (or may
/// not have been) saved, so callers must surface them rather than drop them.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying slot failed to read or write.
    Persistence(SlotError),
    /// The collection could not be serialized for writing.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence(err) => write!(f, "slot persistence failed: {err}"),
            Self::Encode(err) => write!(f, "collection encoding failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<SlotError> for StoreError {
    fn from(value: SlotError) -> Self {
        Self::Persistence(value)
    }
}

/// Time source for record creation.
///
/// Injectable so tests get deterministic ids and date fields.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time source used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Sole owner of the persisted reflection collection.
pub struct ReflectionStore<S: StorageSlot, C: Clock = SystemClock> {
    slot: S,
    clock: C,
}

impl<S: StorageSlot> ReflectionStore<S> {
    /// Creates a store over the given slot using wall-clock time.
    pub fn new(slot: S) -> Self {
        Self::with_clock(slot, SystemClock)
    }
}

impl<S: StorageSlot, C: Clock> ReflectionStore<S, C> {
    /// Creates a store with an explicit time source.
    pub fn with_clock(slot: S, clock: C) -> Self {
        Self { slot, clock }
    }

    /// Returns all records, newest-first.
    ///
    /// An absent slot yields an empty collection. An unparsable payload also
    /// yields an empty collection: a corrupt store and a start-of-life empty
    /// store are indistinguishable to the user and both degrade gracefully.
    pub fn list(&self) -> StoreResult<Vec<Reflection>> {
        let Some(payload) = self.slot.read()? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(
                    "event=collection_read module=store status=corrupt fallback=empty error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Creates a record from a validated draft and prepends it.
    ///
    /// The id is the creation time in epoch milliseconds; if that would
    /// collide with an existing id the candidate is bumped past the current
    /// collection maximum. Both date fields derive from the same instant.
    pub fn create(&self, draft: &ReflectionDraft) -> StoreResult<Reflection> {
        let mut records = self.list()?;
        let now = self.clock.now();
        let id = next_id(&records, now.timestamp_millis());

        let record = Reflection::from_draft(id, &now, draft);
        records.insert(0, record.clone());
        self.persist(&records)?;

        info!(
            "event=reflection_create module=store status=ok id={id} iso_date={}",
            record.iso_date
        );
        Ok(record)
    }

    /// Merges a patch into the record with the given id.
    ///
    /// A lookup miss is normal control flow: returns `Ok(false)` and writes
    /// nothing. On a hit, `win_length` is recomputed when `win` changed and
    /// the date fields stay untouched.
    pub fn update(&self, id: ReflectionId, patch: &ReflectionPatch) -> StoreResult<bool> {
        let mut records = self.list()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            debug!("event=reflection_update module=store status=miss id={id}");
            return Ok(false);
        };

        record.apply(patch);
        self.persist(&records)?;

        info!("event=reflection_update module=store status=ok id={id}");
        Ok(true)
    }

    /// Removes the record with the given id, reporting whether one matched.
    ///
    /// The collection is persisted even on a miss; the write is idempotent
    /// and keeps the stored state in step with the in-memory filter result.
    pub fn delete(&self, id: ReflectionId) -> StoreResult<bool> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        let removed = records.len() < before;

        self.persist(&records)?;

        info!(
            "event=reflection_delete module=store status={} id={id}",
            if removed { "ok" } else { "miss" }
        );
        Ok(removed)
    }

    fn persist(&self, records: &[Reflection]) -> StoreResult<()> {
        let payload = serde_json::to_string(records).map_err(StoreError::Encode)?;
        self.slot.write(&payload)?;
        Ok(())
    }
}

fn next_id(records: &[Reflection], candidate: ReflectionId) -> ReflectionId {
    match records.iter().map(|record| record.id).max() {
        Some(max) if max >= candidate => max + 1,
        _ => candidate,
    }
}
