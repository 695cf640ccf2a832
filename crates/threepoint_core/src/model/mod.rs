//! Domain model for daily reflections.
//!
//! # Responsibility
//! - Define the canonical persisted record and its input/patch shapes.
//! - Keep wire naming compatible with previously stored collections.
//!
//! # Invariants
//! - Every record is identified by a unique epoch-millisecond `id`.
//! - `win_length` is a cached derivation of `win`, recomputed on every write.

pub mod reflection;
