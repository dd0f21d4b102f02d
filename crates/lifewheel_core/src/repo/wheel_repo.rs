//! Wheel entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Fetch all entries of one month.
//! - Upsert one area's entry for one month.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate entries before any SQL mutation.
//! - Upsert is a single statement guarded by `UNIQUE (area, month)`, so
//!   repeated or racing writes for one pair never produce two rows.
//! - Read paths go through `WheelEntryRow::into_entry` and reject malformed
//!   rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::entry::{EntryValidationError, NewWheelEntry, WheelEntry};
use crate::model::month::MonthKey;
use crate::repo::wire::{WheelEntryRow, WireError};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, Row};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_COLUMNS: &str =
    "id, area, score, what_went_well, what_can_be_improved, notes, month";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for wheel entry persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Backing store could not be reached or failed mid-operation.
    StorageUnavailable(DbError),
    /// Entry rejected before reaching storage.
    Validation(EntryValidationError),
    /// Persisted row cannot be represented by the domain model.
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "wheel storage unavailable: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted wheel entry data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl RepoError {
    /// Whether retrying the same operation later may succeed.
    ///
    /// Constraint violations are permanent: the same row is rejected again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(err) if !err.is_constraint_violation())
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(DbError::Sqlite(value))
    }
}

impl From<WireError> for RepoError {
    fn from(value: WireError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Persistence boundary for monthly wheel entries.
pub trait EntryRepository {
    /// Returns every persisted entry whose month equals `month`, in catalog
    /// order. At most one entry per area.
    fn fetch_for_month(&self, month: MonthKey) -> RepoResult<Vec<WheelEntry>>;

    /// Inserts or replaces the entry for `(entry.area, entry.month)`.
    ///
    /// Returns the stored entry carrying its existing or newly assigned id.
    fn upsert(&self, entry: &NewWheelEntry) -> RepoResult<WheelEntry>;
}

impl<R: EntryRepository + ?Sized> EntryRepository for &R {
    fn fetch_for_month(&self, month: MonthKey) -> RepoResult<Vec<WheelEntry>> {
        (**self).fetch_for_month(month)
    }

    fn upsert(&self, entry: &NewWheelEntry) -> RepoResult<WheelEntry> {
        (**self).upsert(entry)
    }
}

/// SQLite-backed wheel entry repository.
pub struct SqliteWheelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWheelRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `wheel_entries` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(conn, "wheel_entries")? {
            return Err(RepoError::MissingRequiredTable("wheel_entries"));
        }
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteWheelRepository<'_> {
    fn fetch_for_month(&self, month: MonthKey) -> RepoResult<Vec<WheelEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS}
             FROM wheel_entries
             WHERE month = ?1;"
        ))?;
        let mut rows = stmt.query([month.to_storage_string()])?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        entries.sort_by_key(|entry| entry.area.index());
        Ok(entries)
    }

    fn upsert(&self, entry: &NewWheelEntry) -> RepoResult<WheelEntry> {
        entry.validate()?;

        let candidate_id = Uuid::new_v4();
        let stored = self.conn.query_row(
            &format!(
                "INSERT INTO wheel_entries ({ENTRY_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT (area, month) DO UPDATE SET
                    score = excluded.score,
                    what_went_well = excluded.what_went_well,
                    what_can_be_improved = excluded.what_can_be_improved,
                    notes = excluded.notes,
                    updated_at = (strftime('%s', 'now') * 1000)
                 RETURNING {ENTRY_COLUMNS};"
            ),
            params![
                candidate_id.to_string(),
                entry.area.name(),
                i64::from(entry.score),
                entry.what_went_well.as_str(),
                entry.what_can_be_improved.as_str(),
                entry.notes.as_str(),
                entry.month.to_storage_string(),
            ],
            read_row,
        )?;

        Ok(stored.into_entry()?)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<WheelEntry> {
    Ok(read_row(row)?.into_entry()?)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<WheelEntryRow> {
    let score = match row.get::<_, SqlValue>("score")? {
        SqlValue::Integer(value) => Some(Value::from(value)),
        SqlValue::Real(value) => Some(Value::from(value)),
        SqlValue::Text(value) => Some(Value::from(value)),
        SqlValue::Null | SqlValue::Blob(_) => None,
    };

    Ok(WheelEntryRow {
        id: row.get("id")?,
        area: row.get("area")?,
        score,
        what_went_well: row.get("what_went_well")?,
        what_can_be_improved: row.get("what_can_be_improved")?,
        notes: row.get("notes")?,
        month: row.get("month")?,
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
