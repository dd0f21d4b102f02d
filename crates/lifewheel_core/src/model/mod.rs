//! Domain model for monthly life-wheel tracking.
//!
//! # Responsibility
//! - Define the fixed area catalog, the month partition key, and entries.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Entries are partitioned by `MonthKey`, never by raw timestamps.
//! - At most one entry exists per `(area, month)` pair.

pub mod area;
pub mod entry;
pub mod month;
