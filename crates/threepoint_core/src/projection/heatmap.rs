//! Calendar activity heatmap projection.
//!
//! # Responsibility
//! - Derive a fixed 112-cell grid of per-day intensity scores from the
//!   current records.
//!
//! # Invariants
//! - The grid always has exactly `GRID_DAYS` cells, oldest-first.
//! - The window starts on the Sunday 16 weeks back and ends on the
//!   Saturday of the current week, so trailing cells can be future dates.
//! - A day's intensity is the maximum over its records, never the sum.

use crate::model::reflection::Reflection;
use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use std::collections::HashMap;

/// Number of week columns in the grid.
pub const GRID_WEEKS: u32 = 16;

/// Total cells in the grid.
pub const GRID_DAYS: usize = (GRID_WEEKS * 7) as usize;

/// Highest intensity level.
pub const MAX_INTENSITY: u8 = 4;

/// `win` characters per intensity level.
const CHARS_PER_LEVEL: u32 = 20;

/// One calendar day in the activity grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    /// 0 for days without a record, otherwise 1..=4.
    pub intensity: u8,
}

/// Derives the activity grid for the window ending in `today`'s week.
///
/// Records whose `iso_date` does not parse are skipped; the stored date is
/// derived data and a bad value must not take the whole view down.
pub fn compute(records: &[Reflection], today: NaiveDate) -> Vec<HeatmapCell> {
    let mut score_by_day: HashMap<NaiveDate, u8> = HashMap::new();
    for record in records {
        let Ok(date) = NaiveDate::parse_from_str(&record.iso_date, "%Y-%m-%d") else {
            debug!(
                "event=heatmap_compute module=projection status=skip id={} iso_date={}",
                record.id, record.iso_date
            );
            continue;
        };

        let score = intensity_for(record.win_length);
        let day_score = score_by_day.entry(date).or_insert(0);
        if score > *day_score {
            *day_score = score;
        }
    }

    let start = window_start(today);
    (0..GRID_DAYS as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            HeatmapCell {
                date,
                intensity: score_by_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// First day of the grid: 15 weeks before `today`, walked back to Sunday.
fn window_start(today: NaiveDate) -> NaiveDate {
    let days_from_sunday = i64::from(today.weekday().num_days_from_sunday());
    today - Duration::days(i64::from(GRID_WEEKS - 1) * 7 + days_from_sunday)
}

/// Scores one record: one level per 20 characters of `win`, capped at 4.
///
/// A zero length scores 1 rather than 0 so records written without the
/// cached length still register as activity.
fn intensity_for(win_length: u32) -> u8 {
    if win_length == 0 {
        return 1;
    }
    win_length.div_ceil(CHARS_PER_LEVEL).min(u32::from(MAX_INTENSITY)) as u8
}
