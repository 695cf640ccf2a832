use chrono::{DateTime, Local, TimeZone};
use rusqlite::Connection;
use threepoint_core::db::migrations::latest_version;
use threepoint_core::db::{open_db, open_db_in_memory};
use threepoint_core::{
    Clock, ReflectionDraft, ReflectionStore, SlotError, SqliteSlot, StorageSlot,
    REFLECTIONS_SLOT,
};

struct FixedClock(DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

fn clock() -> FixedClock {
    FixedClock(Local.with_ymd_and_hms(2026, 8, 7, 8, 15, 0).unwrap())
}

#[test]
fn slot_read_is_none_before_first_write() {
    let conn = open_db_in_memory().unwrap();
    let slot = SqliteSlot::for_reflections(conn).unwrap();
    assert!(slot.read().unwrap().is_none());
}

#[test]
fn slot_write_then_read_roundtrips_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let slot = SqliteSlot::for_reflections(conn).unwrap();

    slot.write("first payload").unwrap();
    assert_eq!(slot.read().unwrap().as_deref(), Some("first payload"));

    slot.write("second payload").unwrap();
    assert_eq!(slot.read().unwrap().as_deref(), Some("second payload"));
}

#[test]
fn slots_are_isolated_by_key() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO slots (key, value) VALUES ('other_slot', 'other data');",
        [],
    )
    .unwrap();

    let slot = SqliteSlot::try_new(conn, REFLECTIONS_SLOT).unwrap();
    assert!(slot.read().unwrap().is_none());
}

#[test]
fn slot_rejects_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSlot::for_reflections(conn);
    match result {
        Err(SlotError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn slot_rejects_connections_without_the_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSlot::for_reflections(conn);
    assert!(matches!(result, Err(SlotError::MissingRequiredTable("slots"))));
}

#[test]
fn collection_survives_reopen_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("threepoint.sqlite3");

    let first_payload = {
        let conn = open_db(&db_path).unwrap();
        let slot = SqliteSlot::for_reflections(conn).unwrap();
        let store = ReflectionStore::with_clock(&slot, clock());

        store
            .create(&ReflectionDraft::new("day one", "win one", "next one").unwrap())
            .unwrap();
        store
            .create(&ReflectionDraft::new("day two", "win two", "next two").unwrap())
            .unwrap();

        slot.read().unwrap().unwrap()
    };

    let conn = open_db(&db_path).unwrap();
    let slot = SqliteSlot::for_reflections(conn).unwrap();
    let reloaded_payload = slot.read().unwrap().unwrap();
    assert_eq!(reloaded_payload, first_payload);

    let store = ReflectionStore::with_clock(&slot, clock());
    let records = store.list().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].event, "day two");
    assert_eq!(records[1].event, "day one");
}

#[test]
fn ids_beyond_double_precision_survive_a_rewrite() {
    // 2^53 + 1 cannot be represented as an f64; a lossy codec would corrupt
    // it. The delete-miss path rewrites the collection, so a full
    // parse/serialize cycle runs over the stored id.
    let conn = open_db_in_memory().unwrap();
    let slot = SqliteSlot::for_reflections(conn).unwrap();

    let big_id: i64 = 9_007_199_254_740_993;
    slot.write(&format!(
        "[{{\"id\":{big_id},\"isoDate\":\"2026-08-07\",\"date\":\"2026年8月7日(金)\",\
         \"event\":\"e\",\"win\":\"w\",\"next\":\"n\",\"winLength\":1}}]"
    ))
    .unwrap();

    let store = ReflectionStore::with_clock(&slot, clock());
    assert!(!store.delete(1).unwrap());

    let records = store.list().unwrap();
    assert_eq!(records[0].id, big_id);
    assert!(slot.read().unwrap().unwrap().contains("9007199254740993"));
}
