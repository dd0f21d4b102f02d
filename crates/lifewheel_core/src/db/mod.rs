//! Wheel entry storage on SQLite.
//!
//! # Responsibility
//! - Open file or in-memory connections for the monthly wheel.
//! - Bring the `wheel_entries` table up to the latest schema.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; a database written by a
//!   newer build is refused rather than downgraded.
//! - `wheel_entries` holds at most one row per `(area, month)` pair.
//! - `month` is stored as `YYYY-MM-01` and `score` stays in `1..=10`; both
//!   are enforced by CHECK constraints as well as by the model layer.
//! - Repositories read or write entries only on a migrated connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the wheel database.
#[derive(Debug)]
pub enum DbError {
    /// Driver error, including constraint violations on `wheel_entries`.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a build that knows more schema versions.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// True when SQLite rejected a row through a CHECK or UNIQUE constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(code, _))
                if code.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "wheel storage error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "wheel database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{open_db_in_memory, DbError};
    use std::error::Error;

    #[test]
    fn schema_version_message_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 3,
            latest_supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "wheel database schema version 3 is newer than supported 1"
        );
        assert!(err.source().is_none());
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn month_check_rejects_mid_month_rows() {
        let conn = open_db_in_memory().unwrap();
        let err: DbError = conn
            .execute(
                "INSERT INTO wheel_entries (id, area, score, month)
                 VALUES ('a', 'Career', 5, '2026-03-15');",
                [],
            )
            .unwrap_err()
            .into();

        assert!(err.is_constraint_violation());
        assert!(err.to_string().starts_with("wheel storage error: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn duplicate_area_month_is_a_constraint_violation() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO wheel_entries (id, area, score, month)
             VALUES ('a', 'Career', 5, '2026-03-01');",
            [],
        )
        .unwrap();
        let err: DbError = conn
            .execute(
                "INSERT INTO wheel_entries (id, area, score, month)
                 VALUES ('b', 'Career', 7, '2026-03-01');",
                [],
            )
            .unwrap_err()
            .into();

        assert!(err.is_constraint_violation());
    }
}
