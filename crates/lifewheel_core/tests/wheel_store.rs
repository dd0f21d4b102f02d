use lifewheel_core::db::open_db_in_memory;
use lifewheel_core::db::DbError;
use lifewheel_core::{
    areas, EntryRepository, LifeArea, LoadOutcome, MonthKey, NewWheelEntry, NoticeLevel,
    RepoError, RepoResult, SaveOutcome, SqliteWheelRepository, TrackerConfig, WheelEntry,
    WheelStateStore,
};
use std::cell::Cell;

/// Wraps a repository and fails every call while `offline` is set.
struct FlakyRepository<R> {
    inner: R,
    offline: Cell<bool>,
}

impl<R> FlakyRepository<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            offline: Cell::new(false),
        }
    }

    fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    fn unavailable() -> RepoError {
        RepoError::StorageUnavailable(DbError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}

impl<R: EntryRepository> EntryRepository for FlakyRepository<R> {
    fn fetch_for_month(&self, month: MonthKey) -> RepoResult<Vec<WheelEntry>> {
        if self.offline.get() {
            return Err(Self::unavailable());
        }
        self.inner.fetch_for_month(month)
    }

    fn upsert(&self, entry: &NewWheelEntry) -> RepoResult<WheelEntry> {
        if self.offline.get() {
            return Err(Self::unavailable());
        }
        self.inner.upsert(entry)
    }
}

fn month(m: u32) -> MonthKey {
    MonthKey::from_ymd(2026, m).unwrap()
}

#[test]
fn untracked_areas_read_default_score() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);

    assert_eq!(store.load_month(month(3)), LoadOutcome::Applied { count: 0 });
    for descriptor in areas() {
        assert!(store.entry_for(descriptor.area).is_none());
        assert_eq!(store.score_for(descriptor.area), 5);
    }
    assert_eq!(store.overall_balance(), None);
}

#[test]
fn configured_default_score_is_used() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let config = TrackerConfig {
        default_score: 6,
        ..TrackerConfig::default()
    };
    let store = WheelStateStore::with_config(repo, &config);

    assert_eq!(store.score_for(LifeArea::Money), 6);
}

#[test]
fn save_persists_and_updates_cache() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);
    store.load_month(month(3));

    let outcome = store.save(NewWheelEntry {
        what_went_well: "ran twice a week".to_string(),
        ..NewWheelEntry::new(LifeArea::Health, month(3), 7)
    });
    let saved = match outcome {
        SaveOutcome::Saved(entry) => entry,
        other => panic!("expected saved outcome, got {other:?}"),
    };

    assert_eq!(store.score_for(LifeArea::Health), 7);
    assert_eq!(store.entry_for(LifeArea::Health), Some(&saved));
    assert!(!store.is_loading());

    let persisted = store.repository().fetch_for_month(month(3)).unwrap();
    assert_eq!(persisted, vec![saved]);

    let notices = store.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].description, "Health entry saved successfully");
}

#[test]
fn saving_same_area_twice_keeps_single_entry_with_latest_score() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);
    store.load_month(month(3));

    store.save(NewWheelEntry::new(LifeArea::Career, month(3), 4));
    store.save(NewWheelEntry::new(LifeArea::Career, month(3), 9));

    assert_eq!(store.tracked_count(), 1);
    assert_eq!(store.score_for(LifeArea::Career), 9);

    let persisted = store.repository().fetch_for_month(month(3)).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].score, 9);
}

#[test]
fn months_are_partitioned() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);

    store.load_month(month(3));
    store.save(NewWheelEntry::new(LifeArea::Career, month(3), 9));
    store.load_month(month(4));

    assert_eq!(store.current_month(), Some(month(4)));
    assert!(store.entry_for(LifeArea::Career).is_none());
    assert_eq!(store.score_for(LifeArea::Career), 5);

    store.load_month(month(3));
    assert_eq!(store.score_for(LifeArea::Career), 9);
}

#[test]
fn save_for_other_month_does_not_leak_into_viewed_month() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);
    store.load_month(month(4));

    let outcome = store.save(NewWheelEntry::new(LifeArea::Money, month(3), 2));
    assert!(matches!(outcome, SaveOutcome::Saved(_)));

    assert!(store.entry_for(LifeArea::Money).is_none());
    assert_eq!(store.tracked_count(), 0);
    assert_eq!(
        store.repository().fetch_for_month(month(3)).unwrap().len(),
        1
    );
}

#[test]
fn failed_load_keeps_previous_entries() {
    let conn = open_db_in_memory().unwrap();
    let repo = FlakyRepository::new(SqliteWheelRepository::try_new(&conn).unwrap());
    let mut store = WheelStateStore::new(repo);

    store.load_month(month(3));
    store.save(NewWheelEntry::new(LifeArea::Family, month(3), 8));
    store.save(NewWheelEntry::new(LifeArea::Emotions, month(3), 6));
    store.take_notices();
    let before = store.entries().to_vec();

    store.repository().set_offline(true);
    assert_eq!(store.load_month(month(4)), LoadOutcome::Failed);

    assert_eq!(store.entries(), before.as_slice());
    assert_eq!(store.current_month(), Some(month(3)));
    assert!(!store.is_loading());

    let notices = store.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].description, "Failed to fetch wheel entries");

    store.repository().set_offline(false);
    assert_eq!(store.load_month(month(4)), LoadOutcome::Applied { count: 0 });
}

#[test]
fn failed_save_leaves_cache_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = FlakyRepository::new(SqliteWheelRepository::try_new(&conn).unwrap());
    let mut store = WheelStateStore::new(repo);
    store.load_month(month(3));
    store.save(NewWheelEntry::new(LifeArea::Health, month(3), 4));
    store.take_notices();
    let before = store.entries().to_vec();

    store.repository().set_offline(true);
    let outcome = store.save(NewWheelEntry::new(LifeArea::Health, month(3), 10));
    assert_eq!(outcome, SaveOutcome::Failed);
    assert_eq!(store.entries(), before.as_slice());
    assert_eq!(store.score_for(LifeArea::Health), 4);
    assert!(!store.is_loading());

    let notices = store.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Error);

    store.repository().set_offline(false);
    assert!(matches!(
        store.save(NewWheelEntry::new(LifeArea::Health, month(3), 10)),
        SaveOutcome::Saved(_)
    ));
    assert_eq!(store.score_for(LifeArea::Health), 10);
}

#[test]
fn out_of_order_responses_apply_latest_month_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    repo.upsert(&NewWheelEntry::new(LifeArea::Career, month(1), 3))
        .unwrap();
    repo.upsert(&NewWheelEntry::new(LifeArea::Health, month(2), 8))
        .unwrap();
    let mut store = WheelStateStore::new(repo);

    let january = store.begin_load(month(1));
    let february = store.begin_load(month(2));
    let january_rows = store.repository().fetch_for_month(january.month());
    let february_rows = store.repository().fetch_for_month(february.month());

    assert_eq!(
        store.complete_load(february, february_rows),
        LoadOutcome::Applied { count: 1 }
    );
    assert_eq!(store.complete_load(january, january_rows), LoadOutcome::Stale);

    assert_eq!(store.current_month(), Some(month(2)));
    assert_eq!(store.score_for(LifeArea::Health), 8);
    assert!(store.entry_for(LifeArea::Career).is_none());
}

#[test]
fn save_during_pending_load_survives_earlier_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    repo.upsert(&NewWheelEntry::new(LifeArea::Health, month(4), 3))
        .unwrap();
    let mut store = WheelStateStore::new(repo);
    store.load_month(month(3));

    let april = store.begin_load(month(4));
    let april_rows = store.repository().fetch_for_month(april.month());
    assert!(matches!(
        store.save(NewWheelEntry::new(LifeArea::Career, month(4), 9)),
        SaveOutcome::Saved(_)
    ));
    assert!(matches!(
        store.save(NewWheelEntry::new(LifeArea::Health, month(4), 7)),
        SaveOutcome::Saved(_)
    ));

    assert_eq!(
        store.complete_load(april, april_rows),
        LoadOutcome::Applied { count: 2 }
    );
    assert_eq!(store.current_month(), Some(month(4)));
    assert_eq!(store.entry_for(LifeArea::Career).map(|e| e.score), Some(9));
    assert_eq!(store.score_for(LifeArea::Health), 7);
    assert_eq!(store.tracked_count(), 2);

    // Replayed saves do not carry over into a later load.
    store.load_month(month(5));
    assert_eq!(store.tracked_count(), 0);
}

#[test]
fn save_for_other_month_is_not_replayed_into_pending_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);

    let april = store.begin_load(month(4));
    let april_rows = store.repository().fetch_for_month(april.month());
    store.save(NewWheelEntry::new(LifeArea::Money, month(3), 2));

    assert_eq!(
        store.complete_load(april, april_rows),
        LoadOutcome::Applied { count: 0 }
    );
    assert!(store.entry_for(LifeArea::Money).is_none());
}

#[test]
fn stale_failure_does_not_raise_notice() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut store = WheelStateStore::new(repo);

    let first = store.begin_load(month(1));
    let second = store.begin_load(month(2));
    let outcome = store.complete_load(first, Err(RepoError::InvalidData("late".to_string())));

    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(store.take_notices().is_empty());
    assert!(store.is_loading());

    store.complete_load(second, Ok(Vec::new()));
    assert!(!store.is_loading());
}

#[test]
fn separate_stores_do_not_share_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWheelRepository::try_new(&conn).unwrap();
    let mut wheel = WheelStateStore::new(&repo);
    let mut calendar = WheelStateStore::new(&repo);

    wheel.load_month(month(3));
    wheel.save(NewWheelEntry::new(LifeArea::Recreation, month(3), 9));
    calendar.load_month(month(2));

    assert_eq!(wheel.score_for(LifeArea::Recreation), 9);
    assert_eq!(calendar.score_for(LifeArea::Recreation), 5);
    assert_eq!(calendar.summary().unwrap().balance_label(), "No data yet");
    assert_eq!(wheel.summary().unwrap().balance_label(), "90%");
}
