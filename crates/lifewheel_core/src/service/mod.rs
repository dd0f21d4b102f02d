//! Core use-case services.
//!
//! # Responsibility
//! - Own per-session wheel state on top of the repository contract.
//! - Compute balance aggregates for wheel and calendar views.
//!
//! # Invariants
//! - Services stay storage-agnostic; they only see `EntryRepository`.

pub mod balance;
pub mod wheel_store;
