//! Read-side projections derived from the reflection collection.
//!
//! # Responsibility
//! - Derive display-ready views (history list, activity heatmap) from a
//!   records snapshot.
//!
//! # Invariants
//! - Projections are pure: no side effects, safe to recompute per render,
//!   never persisted.

pub mod heatmap;
pub mod history;
