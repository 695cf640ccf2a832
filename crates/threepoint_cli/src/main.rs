//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `threepoint_core` linkage.
//! - Exercise one full create/list/project cycle against an in-memory slot.

use chrono::Local;
use threepoint_core::{JournalService, MemorySlot, ReflectionStore};

fn main() {
    println!("threepoint_core ping={}", threepoint_core::ping());
    println!("threepoint_core version={}", threepoint_core::core_version());

    let service = JournalService::new(ReflectionStore::new(MemorySlot::new()));
    match smoke_cycle(&service) {
        Ok(()) => println!("smoke=ok"),
        Err(err) => {
            eprintln!("smoke=failed error={err}");
            std::process::exit(1);
        }
    }
}

fn smoke_cycle(
    service: &JournalService<MemorySlot>,
) -> Result<(), threepoint_core::JournalError> {
    let created = service.add_reflection(
        "ran the smoke probe",
        "core crate wiring works end to end",
        "wire up the real presentation layer",
    )?;
    println!("created id={} iso_date={}", created.id, created.iso_date);

    let history = service.history()?;
    println!("history entries={}", history.entries.len());

    let today = Local::now().date_naive();
    let grid = service.heatmap(today)?;
    let active_cells = grid.iter().filter(|cell| cell.intensity > 0).count();
    println!("heatmap cells={} active={}", grid.len(), active_cells);

    Ok(())
}
