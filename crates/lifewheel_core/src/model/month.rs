//! Month partition key.
//!
//! # Responsibility
//! - Normalize arbitrary points in time to a canonical first-of-month date.
//! - Provide month navigation and display helpers for callers.
//!
//! # Invariants
//! - The wrapped date is always day 1 of its month.
//! - Two inputs in the same calendar year and month produce equal keys.
//! - Storage form is the ISO date `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

const STORAGE_FORMAT: &str = "%Y-%m-%d";
const LABEL_FORMAT: &str = "%B %Y";

/// First calendar day of a month, used as the partition key for entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// Truncates a date to the first day of its month.
    pub fn normalize(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// Truncates a zoned timestamp using its local calendar date.
    pub fn normalize_datetime<Tz: TimeZone>(point: &DateTime<Tz>) -> Self {
        Self::normalize(point.date_naive())
    }

    /// Builds a key from calendar year and 1-based month.
    pub fn from_ymd(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Key for the month containing the local current date.
    pub fn current() -> Self {
        Self::normalize(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Following month; `None` only at the end of the representable range.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// Preceding month; `None` only at the start of the representable range.
    pub fn previous(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }

    /// Human-readable label, e.g. `March 2026`.
    pub fn label(&self) -> String {
        self.0.format(LABEL_FORMAT).to_string()
    }

    /// Date-only storage form, e.g. `2026-03-01`.
    pub fn to_storage_string(&self) -> String {
        self.0.format(STORAGE_FORMAT).to_string()
    }

    /// Parses a `YYYY-MM-DD` date and normalizes it to its month.
    pub fn parse_storage(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value.trim(), STORAGE_FORMAT)
            .ok()
            .map(Self::normalize)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(value: NaiveDate) -> Self {
        Self::normalize(value)
    }
}

impl From<NaiveDateTime> for MonthKey {
    fn from(value: NaiveDateTime) -> Self {
        Self::normalize(value.date())
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(STORAGE_FORMAT))
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_storage_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        MonthKey::parse_storage(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid month `{value}`")))
    }
}
