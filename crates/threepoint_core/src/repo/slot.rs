//! Storage-slot port and its implementations.
//!
//! # Responsibility
//! - Define the single-slot persistence contract the store depends on.
//! - Provide an in-memory slot for tests and a SQLite-backed slot for
//!   durable local storage.
//!
//! # Invariants
//! - A slot stores one opaque payload string; interpretation belongs to the
//!   store, not the slot.
//! - `SqliteSlot` refuses connections whose schema has not been migrated.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot name used by the reflection collection. Kept identical to the key
/// the original deployment stored under so existing payloads keep loading.
pub const REFLECTIONS_SLOT: &str = "3point_reflections";

pub type SlotResult<T> = Result<T, SlotError>;

/// Transport-level failure of a storage slot.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// Connection has no applied migrations; opening skipped bootstrap.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Migrated connection is missing a table the slot requires.
    MissingRequiredTable(&'static str),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: user_version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence port for one named payload slot.
///
/// Implementations are synchronous; a read observes either the pre- or
/// post-state of any write, never a partial payload.
pub trait StorageSlot {
    /// Returns the stored payload, or `None` when the slot was never
    /// written.
    fn read(&self) -> SlotResult<Option<String>>;

    /// Replaces the stored payload atomically.
    fn write(&self, payload: &str) -> SlotResult<()>;
}

impl<S: StorageSlot + ?Sized> StorageSlot for &S {
    fn read(&self) -> SlotResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> SlotResult<()> {
        (**self).write(payload)
    }
}

/// Volatile in-process slot. Never fails; contents die with the value.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: RefCell<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with a payload, e.g. to exercise
    /// corrupt-read handling in tests.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> SlotResult<Option<String>> {
        Ok(self.payload.borrow().clone())
    }

    fn write(&self, payload: &str) -> SlotResult<()> {
        *self.payload.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

/// SQLite-backed slot: one row in the `slots` table, keyed by slot name.
pub struct SqliteSlot {
    conn: Connection,
    key: String,
}

impl SqliteSlot {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is 0.
    /// - `MissingRequiredTable` when the `slots` table is absent.
    pub fn try_new(conn: Connection, key: impl Into<String>) -> SlotResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(SlotError::UninitializedConnection {
                expected_version: crate::db::migrations::latest_version(),
                actual_version,
            });
        }

        let has_table: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'slots';",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if has_table.is_none() {
            return Err(SlotError::MissingRequiredTable("slots"));
        }

        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    /// Wraps a migrated connection using the reflection slot name.
    pub fn for_reflections(conn: Connection) -> SlotResult<Self> {
        Self::try_new(conn, REFLECTIONS_SLOT)
    }
}

impl StorageSlot for SqliteSlot {
    fn read(&self) -> SlotResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&self, payload: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), payload],
        )?;
        Ok(())
    }
}
