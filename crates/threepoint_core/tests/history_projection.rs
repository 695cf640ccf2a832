use chrono::{DateTime, Local, TimeZone};
use threepoint_core::projection::history;
use threepoint_core::{
    Clock, JournalService, MemorySlot, ReflectionStore, WIN_SUMMARY_MAX_CHARS,
};

struct FixedClock(DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

fn service() -> JournalService<MemorySlot, FixedClock> {
    let clock = FixedClock(Local.with_ymd_and_hms(2026, 8, 7, 20, 0, 0).unwrap());
    JournalService::new(ReflectionStore::with_clock(MemorySlot::new(), clock))
}

#[test]
fn empty_collection_signals_empty() {
    let view = history::compute(&[]);
    assert!(view.is_empty());
    assert!(view.entries.is_empty());
}

#[test]
fn entries_keep_store_order_newest_first() {
    let service = service();
    service.add_reflection("first day", "early win", "next a").unwrap();
    service.add_reflection("second day", "later win", "next b").unwrap();

    let view = service.history().unwrap();
    assert!(!view.is_empty());
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].record.event, "second day");
    assert_eq!(view.entries[1].record.event, "first day");
}

#[test]
fn long_wins_are_summarized_but_records_keep_full_text() {
    let service = service();
    let long_win = "kept the demo running through two outages and a broken mic".to_string();
    assert!(long_win.chars().count() > WIN_SUMMARY_MAX_CHARS);

    service.add_reflection("demo day", &long_win, "write the postmortem").unwrap();

    let view = service.history().unwrap();
    let entry = &view.entries[0];

    let expected: String = long_win.chars().take(WIN_SUMMARY_MAX_CHARS).collect();
    assert_eq!(entry.win_summary, format!("{expected}..."));
    assert_eq!(entry.record.win, long_win);
}

#[test]
fn summary_at_the_limit_is_untouched() {
    let service = service();
    let exact_win = "w".repeat(WIN_SUMMARY_MAX_CHARS);
    service.add_reflection("edge", &exact_win, "next").unwrap();

    let view = service.history().unwrap();
    assert_eq!(view.entries[0].win_summary, exact_win);
}

#[test]
fn summaries_are_a_display_concern_only() {
    let service = service();
    service
        .add_reflection("day", &"x".repeat(60), "next")
        .unwrap();

    // The persisted record must not carry the summary.
    let records = service.reflections().unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert!(json.get("win_summary").is_none());
    assert!(json.get("winSummary").is_none());
}
