//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the month-keyed data access contract for wheel entries.
//! - Isolate SQLite queries and wire-row parsing from the session store.
//!
//! # Invariants
//! - Repository writes must validate entries before persistence.
//! - Storage failures surface as `RepoError::StorageUnavailable`.

pub mod wheel_repo;
pub mod wire;
