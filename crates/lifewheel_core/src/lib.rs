//! Core domain logic for the monthly life-wheel tracker.
//! This crate is the single source of truth for tracking invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::area::{areas, AreaDescriptor, LifeArea, TOTAL_AREAS};
pub use model::entry::{
    EntryId, EntryValidationError, NewWheelEntry, ScoreBand, WheelEntry, DEFAULT_SCORE,
    MAX_SCORE, MIN_SCORE,
};
pub use model::month::MonthKey;
pub use repo::wheel_repo::{EntryRepository, RepoError, RepoResult, SqliteWheelRepository};
pub use repo::wire::{parse_rows_json, WheelEntryRow, WireError};
pub use service::balance::{overall_balance, summarize_month, MonthSummary};
pub use service::wheel_store::{
    LoadOutcome, LoadTicket, Notice, NoticeLevel, SaveOutcome, WheelStateStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
