use chrono::{Local, TimeZone};
use threepoint_core::{Reflection, ReflectionDraft, ReflectionPatch, ReflectionValidationError};

fn sample_record() -> Reflection {
    let instant = Local.with_ymd_and_hms(2026, 8, 8, 9, 0, 0).unwrap();
    let draft = ReflectionDraft::new("joined the retro", "spoke up about the blocker", "book a follow-up").unwrap();
    Reflection::from_draft(instant.timestamp_millis(), &instant, &draft)
}

#[test]
fn draft_rejects_empty_fields_by_name() {
    let err = ReflectionDraft::new("", "win", "next").unwrap_err();
    assert_eq!(err, ReflectionValidationError::EmptyField("event"));

    let err = ReflectionDraft::new("event", "   ", "next").unwrap_err();
    assert_eq!(err, ReflectionValidationError::EmptyField("win"));

    let err = ReflectionDraft::new("event", "win", "\t\n").unwrap_err();
    assert_eq!(err, ReflectionValidationError::EmptyField("next"));
}

#[test]
fn from_draft_derives_dates_and_win_length() {
    let record = sample_record();
    assert_eq!(record.iso_date, "2026-08-08");
    assert_eq!(record.display_date, "2026年8月8日(土)");
    assert_eq!(record.win_length, 26);
}

#[test]
fn patch_on_win_recomputes_length_and_keeps_dates() {
    let mut record = sample_record();
    let original_iso = record.iso_date.clone();
    let original_display = record.display_date.clone();

    record.apply(&ReflectionPatch {
        win: Some("short".to_string()),
        ..ReflectionPatch::default()
    });

    assert_eq!(record.win, "short");
    assert_eq!(record.win_length, 5);
    assert_eq!(record.iso_date, original_iso);
    assert_eq!(record.display_date, original_display);
}

#[test]
fn patch_without_win_leaves_cached_length_alone() {
    let mut record = sample_record();
    let original_length = record.win_length;

    record.apply(&ReflectionPatch {
        event: Some("rewritten event".to_string()),
        next: Some("rewritten next".to_string()),
        ..ReflectionPatch::default()
    });

    assert_eq!(record.event, "rewritten event");
    assert_eq!(record.next, "rewritten next");
    assert_eq!(record.win_length, original_length);
}

#[test]
fn patch_validation_trims_present_fields_and_rejects_empties() {
    let patch = ReflectionPatch {
        event: Some("  padded  ".to_string()),
        win: None,
        next: None,
    };
    let validated = patch.validated().unwrap();
    assert_eq!(validated.event.as_deref(), Some("padded"));
    assert!(validated.win.is_none());

    let empty_after_trim = ReflectionPatch {
        win: Some("   ".to_string()),
        ..ReflectionPatch::default()
    };
    assert_eq!(
        empty_after_trim.validated().unwrap_err(),
        ReflectionValidationError::EmptyField("win")
    );
}

#[test]
fn serialization_uses_stored_wire_names() {
    let record = sample_record();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["id"], record.id);
    assert_eq!(json["isoDate"], "2026-08-08");
    assert_eq!(json["date"], "2026年8月8日(土)");
    assert_eq!(json["event"], "joined the retro");
    assert_eq!(json["win"], "spoke up about the blocker");
    assert_eq!(json["next"], "book a follow-up");
    assert_eq!(json["winLength"], 26);

    // No stray snake_case keys may leak into the stored shape.
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 7);
    assert!(!object.contains_key("iso_date"));
    assert!(!object.contains_key("win_length"));
}

#[test]
fn deserializes_payloads_written_by_the_original_app() {
    let payload = r#"{
        "id": 1754600400000,
        "isoDate": "2025-08-08",
        "date": "2025年8月8日(金)",
        "event": "朝会で進捗を共有した",
        "win": "発表の流れを最後まで崩さなかった",
        "next": "資料を先に送っておく",
        "winLength": 16
    }"#;

    let record: Reflection = serde_json::from_str(payload).unwrap();
    assert_eq!(record.id, 1_754_600_400_000);
    assert_eq!(record.iso_date, "2025-08-08");
    assert_eq!(record.display_date, "2025年8月8日(金)");
    assert_eq!(record.win_length, 16);
}
