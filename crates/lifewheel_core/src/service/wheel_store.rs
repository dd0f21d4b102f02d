//! Per-session wheel state store.
//!
//! # Responsibility
//! - Own the cached entries of the currently viewed month.
//! - Route loads and saves through an `EntryRepository`.
//! - Translate repository failures into user-visible notices.
//!
//! # Invariants
//! - A load result is applied only when its ticket carries the latest issued
//!   token; older responses are discarded untouched.
//! - Failed loads and saves leave `current_entries` exactly as they were.
//! - Cached entries are keyed by `(area, month)`, matching storage.
//! - Saves made while a load for the same month is in flight are replayed
//!   over that load's result, so a snapshot taken before the save cannot
//!   hide it.
//! - Nothing here returns an error to the caller; failures become notices.

use crate::config::TrackerConfig;
use crate::model::area::LifeArea;
use crate::model::entry::{NewWheelEntry, WheelEntry, DEFAULT_SCORE};
use crate::model::month::MonthKey;
use crate::repo::wheel_repo::{EntryRepository, RepoError, RepoResult};
use crate::service::balance::{overall_balance, MonthSummary};
use log::{debug, error, info, warn};

const LOAD_FAILED_DESCRIPTION: &str = "Failed to fetch wheel entries";
const SAVE_FAILED_DESCRIPTION: &str = "Failed to save wheel entry";

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Recoverable, user-facing message produced by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn success(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    fn error(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

/// Handle for one issued month load.
///
/// Obtained from [`WheelStateStore::begin_load`] and handed back with the
/// fetch result to [`WheelStateStore::complete_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    month: MonthKey,
}

impl LoadTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }
}

/// Result of settling one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Cache replaced with `count` entries.
    Applied { count: usize },
    /// A newer load was issued; the response was discarded.
    Stale,
    /// Fetch failed; the previous cache was kept.
    Failed,
}

/// Result of one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(WheelEntry),
    /// Entry failed validation and never reached storage.
    Rejected,
    /// Storage failed; nothing changed locally.
    Failed,
}

/// Month-scoped entry cache owned by one viewing session.
///
/// Separate views (for example a calendar overview browsing another month)
/// construct separate stores.
pub struct WheelStateStore<R: EntryRepository> {
    repo: R,
    default_score: u8,
    current_entries: Vec<WheelEntry>,
    current_month: Option<MonthKey>,
    latest_token: u64,
    pending_load: Option<LoadTicket>,
    /// Successful saves for the pending load's month, replayed on apply.
    pending_saves: Vec<WheelEntry>,
    saving: bool,
    notices: Vec<Notice>,
}

impl<R: EntryRepository> WheelStateStore<R> {
    /// Creates an empty store reporting `DEFAULT_SCORE` for untracked areas.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            default_score: DEFAULT_SCORE,
            current_entries: Vec::new(),
            current_month: None,
            latest_token: 0,
            pending_load: None,
            pending_saves: Vec::new(),
            saving: false,
            notices: Vec::new(),
        }
    }

    /// Creates an empty store using configured defaults.
    pub fn with_config(repo: R, config: &TrackerConfig) -> Self {
        let mut store = Self::new(repo);
        store.default_score = config.default_score;
        store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Fetches `month` and applies it to the cache.
    pub fn load_month(&mut self, month: MonthKey) -> LoadOutcome {
        let ticket = self.begin_load(month);
        let result = self.repo.fetch_for_month(month);
        self.complete_load(ticket, result)
    }

    /// Issues a load for `month` and marks the store as loading.
    ///
    /// Every call supersedes all earlier tickets.
    pub fn begin_load(&mut self, month: MonthKey) -> LoadTicket {
        self.latest_token += 1;
        let ticket = LoadTicket {
            token: self.latest_token,
            month,
        };
        self.pending_load = Some(ticket);
        self.pending_saves.retain(|saved| saved.month == month);
        debug!(
            "event=wheel_load module=store status=start month={} token={}",
            month, ticket.token
        );
        ticket
    }

    /// Settles a load issued by `begin_load`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: RepoResult<Vec<WheelEntry>>,
    ) -> LoadOutcome {
        if ticket.token != self.latest_token {
            debug!(
                "event=wheel_load module=store status=stale month={} token={} latest_token={}",
                ticket.month, ticket.token, self.latest_token
            );
            return LoadOutcome::Stale;
        }
        self.pending_load = None;
        let replayed = std::mem::take(&mut self.pending_saves);

        match result {
            Ok(entries) => {
                let fetched = entries.len();
                let mut entries: Vec<WheelEntry> = entries
                    .into_iter()
                    .filter(|entry| entry.month == ticket.month)
                    .collect();
                if entries.len() != fetched {
                    warn!(
                        "event=wheel_load module=store status=filtered month={} dropped={}",
                        ticket.month,
                        fetched - entries.len()
                    );
                }

                for saved in replayed {
                    upsert_slot(&mut entries, saved);
                }

                let count = entries.len();
                self.current_entries = entries;
                self.current_month = Some(ticket.month);
                info!(
                    "event=wheel_load module=store status=ok month={} count={}",
                    ticket.month, count
                );
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                error!(
                    "event=wheel_load module=store status=error month={} error={}",
                    ticket.month, err
                );
                self.notices.push(Notice::error(LOAD_FAILED_DESCRIPTION));
                LoadOutcome::Failed
            }
        }
    }

    /// Persists one area's entry and mirrors it into the cache.
    ///
    /// The cache is updated only when `entry.month` is the viewed month; a
    /// save for the month of an in-flight load is held until that load
    /// settles.
    pub fn save(&mut self, entry: NewWheelEntry) -> SaveOutcome {
        self.saving = true;
        let outcome = self.save_inner(entry);
        self.saving = false;
        outcome
    }

    fn save_inner(&mut self, entry: NewWheelEntry) -> SaveOutcome {
        if let Err(err) = entry.validate() {
            warn!(
                "event=wheel_save module=store status=rejected area={} month={} error={}",
                entry.area, entry.month, err
            );
            self.notices
                .push(Notice::error(format!("{SAVE_FAILED_DESCRIPTION}: {err}")));
            return SaveOutcome::Rejected;
        }

        match self.repo.upsert(&entry) {
            Ok(stored) => {
                if self.current_month == Some(stored.month) {
                    upsert_slot(&mut self.current_entries, stored.clone());
                }
                if self
                    .pending_load
                    .is_some_and(|ticket| ticket.month == stored.month)
                {
                    upsert_slot(&mut self.pending_saves, stored.clone());
                }
                info!(
                    "event=wheel_save module=store status=ok area={} month={}",
                    stored.area, stored.month
                );
                self.notices.push(Notice::success(format!(
                    "{} entry saved successfully",
                    stored.area
                )));
                SaveOutcome::Saved(stored)
            }
            Err(RepoError::Validation(err)) => {
                warn!(
                    "event=wheel_save module=store status=rejected area={} month={} error={}",
                    entry.area, entry.month, err
                );
                self.notices
                    .push(Notice::error(format!("{SAVE_FAILED_DESCRIPTION}: {err}")));
                SaveOutcome::Rejected
            }
            Err(err) => {
                error!(
                    "event=wheel_save module=store status=error area={} month={} error={}",
                    entry.area, entry.month, err
                );
                self.notices.push(Notice::error(SAVE_FAILED_DESCRIPTION));
                SaveOutcome::Failed
            }
        }
    }

    /// Cached entry for `area` in the viewed month.
    pub fn entry_for(&self, area: LifeArea) -> Option<&WheelEntry> {
        self.current_entries.iter().find(|entry| entry.area == area)
    }

    /// Cached score for `area`, or the default score when untracked.
    pub fn score_for(&self, area: LifeArea) -> u8 {
        self.entry_for(area)
            .map_or(self.default_score, |entry| entry.score)
    }

    /// Prefill payload for the edit form: the cached entry, or a default one.
    pub fn draft_for(&self, area: LifeArea, month: MonthKey) -> NewWheelEntry {
        match self.entry_for(area) {
            Some(entry) if entry.month == month => entry.to_new(),
            _ => NewWheelEntry::new(area, month, self.default_score),
        }
    }

    pub fn entries(&self) -> &[WheelEntry] {
        &self.current_entries
    }

    pub fn tracked_count(&self) -> usize {
        self.current_entries.len()
    }

    pub fn overall_balance(&self) -> Option<u8> {
        overall_balance(&self.current_entries)
    }

    /// Summary of the viewed month; `None` before the first applied load.
    pub fn summary(&self) -> Option<MonthSummary> {
        self.current_month
            .map(|month| MonthSummary::from_entries(month, &self.current_entries))
    }

    /// Month of the last applied load.
    pub fn current_month(&self) -> Option<MonthKey> {
        self.current_month
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some() || self.saving
    }

    /// Drains pending notices in emission order.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Replaces the entry in `stored`'s `(area, month)` slot, or appends it.
fn upsert_slot(entries: &mut Vec<WheelEntry>, stored: WheelEntry) {
    match entries
        .iter_mut()
        .find(|cached| cached.is_slot(stored.area, stored.month))
    {
        Some(slot) => *slot = stored,
        None => entries.push(stored),
    }
}
