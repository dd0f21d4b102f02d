//! Loosely typed backend row shape and its parsing step.
//!
//! # Responsibility
//! - Describe `wheel_entries` rows as they arrive from storage or a remote
//!   backend, with every field optional and loosely typed.
//! - Convert rows into validated `WheelEntry` values, defaulting reflection
//!   text and rejecting anything the domain cannot represent.
//!
//! # Invariants
//! - Missing or null `what_went_well`, `what_can_be_improved`, `notes` become
//!   empty strings.
//! - `id`, `area`, `score`, `month` are required; malformed values are errors.
//! - Month values keep only their `YYYY-MM-DD` prefix and are normalized.

use crate::model::area::LifeArea;
use crate::model::entry::{validate_score, WheelEntry};
use crate::model::month::MonthKey;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static MONTH_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4}-\d{2}-\d{2})").expect("valid month prefix regex"));

/// Errors raised while mapping a wire row into the domain model.
#[derive(Debug)]
pub enum WireError {
    MissingField(&'static str),
    InvalidId(String),
    UnknownArea(String),
    InvalidScore(String),
    InvalidMonth(String),
    Json(serde_json::Error),
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "wheel entry row is missing `{field}`"),
            Self::InvalidId(value) => write!(f, "invalid wheel entry id `{value}`"),
            Self::UnknownArea(value) => write!(f, "unknown life area `{value}`"),
            Self::InvalidScore(value) => write!(f, "invalid score `{value}`"),
            Self::InvalidMonth(value) => write!(f, "invalid month `{value}`"),
            Self::Json(err) => write!(f, "malformed wheel entry payload: {err}"),
        }
    }
}

impl Error for WireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WireError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Row shape as stored, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelEntryRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    /// Number or numeric string.
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub what_went_well: Option<String>,
    #[serde(default)]
    pub what_can_be_improved: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Date (`2026-03-01`) or timestamp (`2026-03-01T00:00:00Z`).
    #[serde(default)]
    pub month: Option<String>,
}

impl WheelEntryRow {
    /// Validates and converts the row into a persisted entry.
    pub fn into_entry(self) -> Result<WheelEntry, WireError> {
        let id_text = self.id.ok_or(WireError::MissingField("id"))?;
        let id = Uuid::parse_str(id_text.trim()).map_err(|_| WireError::InvalidId(id_text))?;

        let area_text = self.area.ok_or(WireError::MissingField("area"))?;
        let area = LifeArea::from_name(&area_text).ok_or(WireError::UnknownArea(area_text))?;

        let score = parse_score(self.score.as_ref().ok_or(WireError::MissingField("score"))?)?;

        let month_text = self.month.ok_or(WireError::MissingField("month"))?;
        let month = parse_month(&month_text)?;

        Ok(WheelEntry {
            id: Some(id),
            area,
            score,
            what_went_well: self.what_went_well.unwrap_or_default(),
            what_can_be_improved: self.what_can_be_improved.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            month,
        })
    }
}

impl From<&WheelEntry> for WheelEntryRow {
    fn from(entry: &WheelEntry) -> Self {
        Self {
            id: entry.id.map(|id| id.to_string()),
            area: Some(entry.area.name().to_string()),
            score: Some(Value::from(entry.score)),
            what_went_well: Some(entry.what_went_well.clone()),
            what_can_be_improved: Some(entry.what_can_be_improved.clone()),
            notes: Some(entry.notes.clone()),
            month: Some(entry.month.to_storage_string()),
        }
    }
}

/// Parses a JSON array of backend rows into validated entries.
///
/// Fails on the first malformed row; partial results are never returned.
pub fn parse_rows_json(payload: &str) -> Result<Vec<WheelEntry>, WireError> {
    let rows: Vec<WheelEntryRow> = serde_json::from_str(payload)?;
    rows.into_iter().map(WheelEntryRow::into_entry).collect()
}

fn parse_score(value: &Value) -> Result<u8, WireError> {
    let raw = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| WireError::InvalidScore(value.to_string()))?;

    let score = u8::try_from(raw).map_err(|_| WireError::InvalidScore(raw.to_string()))?;
    validate_score(score).map_err(|_| WireError::InvalidScore(raw.to_string()))?;
    Ok(score)
}

fn parse_month(value: &str) -> Result<MonthKey, WireError> {
    MONTH_PREFIX_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|date| MonthKey::parse_storage(date.as_str()))
        .ok_or_else(|| WireError::InvalidMonth(value.to_string()))
}
