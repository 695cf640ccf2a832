//! Core domain logic for threepoint, a structured daily-reflection journal.
//! This crate is the single source of truth for record invariants and the
//! derived history/heatmap views.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::reflection::{
    Reflection, ReflectionDraft, ReflectionId, ReflectionPatch, ReflectionValidationError,
};
pub use projection::heatmap::{HeatmapCell, GRID_DAYS, GRID_WEEKS, MAX_INTENSITY};
pub use projection::history::{HistoryEntry, HistoryView, WIN_SUMMARY_MAX_CHARS};
pub use repo::reflection_store::{
    Clock, ReflectionStore, StoreError, StoreResult, SystemClock,
};
pub use repo::slot::{
    MemorySlot, SlotError, SlotResult, SqliteSlot, StorageSlot, REFLECTIONS_SLOT,
};
pub use service::journal_service::{JournalError, JournalService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
