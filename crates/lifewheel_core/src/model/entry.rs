//! Wheel entry domain model.
//!
//! # Responsibility
//! - Define one area's monthly self-assessment and its id-less input form.
//! - Validate score range before anything reaches storage.
//! - Map scores to the descriptive bands shown by the edit form.
//!
//! # Invariants
//! - `score` is within `MIN_SCORE..=MAX_SCORE` for every persisted entry.
//! - `(area, month)` identifies at most one persisted entry.
//! - `id` is assigned by the repository, never by callers.

use crate::model::area::LifeArea;
use crate::model::month::MonthKey;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque repository-assigned identifier.
pub type EntryId = Uuid;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Score reported for areas without an entry in the viewed month.
///
/// Unset areas read as the neutral midpoint so untouched areas do not pull
/// the wheel toward "failing".
pub const DEFAULT_SCORE: u8 = 5;

/// Validation errors for entry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    ScoreOutOfRange(u8),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoreOutOfRange(score) => write!(
                f,
                "score {score} is outside the allowed range {MIN_SCORE}..={MAX_SCORE}"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// Checks a score against the allowed range.
pub fn validate_score(score: u8) -> Result<(), EntryValidationError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(EntryValidationError::ScoreOutOfRange(score))
    }
}

/// Entry payload submitted by the edit form; carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWheelEntry {
    pub area: LifeArea,
    pub score: u8,
    #[serde(default)]
    pub what_went_well: String,
    #[serde(default)]
    pub what_can_be_improved: String,
    #[serde(default)]
    pub notes: String,
    pub month: MonthKey,
}

impl NewWheelEntry {
    /// Creates an entry payload with empty reflection text.
    pub fn new(area: LifeArea, month: MonthKey, score: u8) -> Self {
        Self {
            area,
            score,
            what_went_well: String::new(),
            what_can_be_improved: String::new(),
            notes: String::new(),
            month,
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_score(self.score)
    }
}

/// One area's assessment for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelEntry {
    /// `None` until the repository persists the entry.
    pub id: Option<EntryId>,
    pub area: LifeArea,
    pub score: u8,
    #[serde(default)]
    pub what_went_well: String,
    #[serde(default)]
    pub what_can_be_improved: String,
    #[serde(default)]
    pub notes: String,
    pub month: MonthKey,
}

impl WheelEntry {
    /// Attaches a persisted identity to submitted entry data.
    pub fn persisted(id: EntryId, entry: NewWheelEntry) -> Self {
        Self {
            id: Some(id),
            area: entry.area,
            score: entry.score,
            what_went_well: entry.what_went_well,
            what_can_be_improved: entry.what_can_be_improved,
            notes: entry.notes,
            month: entry.month,
        }
    }

    /// Id-less copy, used to prefill the edit form.
    pub fn to_new(&self) -> NewWheelEntry {
        NewWheelEntry {
            area: self.area,
            score: self.score,
            what_went_well: self.what_went_well.clone(),
            what_can_be_improved: self.what_can_be_improved.clone(),
            notes: self.notes.clone(),
            month: self.month,
        }
    }

    /// Whether this entry occupies the given `(area, month)` slot.
    pub fn is_slot(&self, area: LifeArea, month: MonthKey) -> bool {
        self.area == area && self.month == month
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_score(self.score)
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Descriptive satisfaction band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    VeryDissatisfied,
    Dissatisfied,
    Neutral,
    Satisfied,
    VerySatisfied,
}

impl ScoreBand {
    /// Maps a score to its band; 1-2, 3-4, 5-6, 7-8, 9-10.
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=2 => Self::VeryDissatisfied,
            3..=4 => Self::Dissatisfied,
            5..=6 => Self::Neutral,
            7..=8 => Self::Satisfied,
            _ => Self::VerySatisfied,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::VeryDissatisfied => "Very Dissatisfied",
            Self::Dissatisfied => "Dissatisfied",
            Self::Neutral => "Neutral",
            Self::Satisfied => "Satisfied",
            Self::VerySatisfied => "Very Satisfied",
        }
    }
}
