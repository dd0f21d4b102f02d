//! Life-balance aggregation.
//!
//! # Responsibility
//! - Compute the overall balance percentage for a set of loaded entries.
//! - Build month summaries for calendar views.
//!
//! # Invariants
//! - The average divides by the number of entries present, not by the
//!   catalog size; coverage is reported separately.
//! - Rounding is half-up on the exact rational value.
//! - Scores are clamped to the valid range, so the result never exceeds 100.

use crate::model::area::TOTAL_AREAS;
use crate::model::entry::{WheelEntry, MAX_SCORE, MIN_SCORE};
use crate::model::month::MonthKey;
use crate::repo::wheel_repo::{EntryRepository, RepoResult};

/// Overall balance in percent (0-100), or `None` when nothing is tracked.
///
/// Equals `round(sum(score) / count * 10)`.
pub fn overall_balance(entries: &[WheelEntry]) -> Option<u8> {
    if entries.is_empty() {
        return None;
    }

    let sum: u64 = entries
        .iter()
        .map(|entry| u64::from(entry.score.clamp(MIN_SCORE, MAX_SCORE)))
        .sum();
    let count = entries.len() as u64;
    // round(sum * 10 / count) with integer arithmetic; at most MAX_SCORE * 10.
    let percentage = (sum * 20 + count) / (count * 2);
    Some(percentage.min(100) as u8)
}

/// Balance and coverage for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub balance: Option<u8>,
    pub tracked: usize,
    pub total: usize,
}

impl MonthSummary {
    pub fn from_entries(month: MonthKey, entries: &[WheelEntry]) -> Self {
        Self {
            month,
            balance: overall_balance(entries),
            tracked: entries.len(),
            total: TOTAL_AREAS,
        }
    }

    /// e.g. `3 of 8 areas tracked`.
    pub fn coverage_label(&self) -> String {
        format!("{} of {} areas tracked", self.tracked, self.total)
    }

    /// e.g. `70%`, or `No data yet` for an untracked month.
    pub fn balance_label(&self) -> String {
        match self.balance {
            Some(balance) => format!("{balance}%"),
            None => "No data yet".to_string(),
        }
    }
}

/// Fetches a month independently of any session store and summarizes it.
pub fn summarize_month<R: EntryRepository + ?Sized>(
    repo: &R,
    month: MonthKey,
) -> RepoResult<MonthSummary> {
    let entries = repo.fetch_for_month(month)?;
    Ok(MonthSummary::from_entries(month, &entries))
}
