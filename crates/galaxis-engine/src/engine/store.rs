use std::collections::BTreeMap;

use serde::{Serialize, de::DeserializeOwned};

use super::{
    achievement::{Achievement, AchievementTracker},
    game_stats::LifetimeStats,
};

pub const HIGH_SCORE_KEY: &str = "galaxis.highScore";
pub const ACHIEVEMENTS_KEY: &str = "galaxis.achievements";
pub const GALAXY_POINTS_KEY: &str = "galaxis.galaxyPoints";
pub const STATS_KEY: &str = "galaxis.stats";
pub const TETRIS_COUNT_KEY: &str = "galaxis.tetrisCount";

/// All keys written by [`ProgressStore::save`].
pub const PROGRESS_KEYS: [&str; 5] = [
    HIGH_SCORE_KEY,
    ACHIEVEMENTS_KEY,
    GALAXY_POINTS_KEY,
    STATS_KEY,
    TETRIS_COUNT_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("failed to write {key:?} to the store: {reason}")]
pub struct StoreError {
    key: String,
    reason: String,
}

impl StoreError {
    #[must_use]
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// String key-value storage the engine persists its progress through.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T> KeyValueStore for &mut T
where
    T: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory [`KeyValueStore`], for tests and throwaway sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Progress that outlives a single game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub high_score: usize,
    pub achievements: AchievementTracker,
    pub lifetime: LifetimeStats,
    pub tetris_count: usize,
}

/// Typed access to the persisted [`Progress`] on top of a [`KeyValueStore`].
///
/// Loading never fails: absent keys yield defaults silently, malformed values
/// yield defaults with a warning.
///
/// # Example
///
/// ```
/// use galaxis_engine::{KeyValueStore, MemoryStore, ProgressStore};
///
/// let mut memory = MemoryStore::new();
/// memory.set("galaxis.highScore", "4200").unwrap();
/// memory.set("galaxis.stats", "not json").unwrap();
///
/// let progress = ProgressStore::new(memory).load();
/// assert_eq!(progress.high_score, 4200);
/// assert_eq!(progress.lifetime.total_pieces_placed, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S> ProgressStore<S>
where
    S: KeyValueStore,
{
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    #[must_use]
    pub fn load(&self) -> Progress {
        let achievements: Vec<Achievement> = self.load_json(ACHIEVEMENTS_KEY);
        let galaxy_points = self.load_number(GALAXY_POINTS_KEY);
        Progress {
            high_score: self.load_number(HIGH_SCORE_KEY),
            achievements: AchievementTracker::restore(&achievements, galaxy_points),
            lifetime: self.load_json(STATS_KEY),
            tetris_count: self.load_number(TETRIS_COUNT_KEY),
        }
    }

    /// Writes every progress key.
    ///
    /// A failing key does not stop the remaining keys from being written; the
    /// first error is returned.
    pub fn save(&mut self, progress: &Progress) -> Result<(), StoreError> {
        let values = [
            (HIGH_SCORE_KEY, progress.high_score.to_string()),
            (
                ACHIEVEMENTS_KEY,
                to_json(ACHIEVEMENTS_KEY, &progress.achievements.achievements())?,
            ),
            (
                GALAXY_POINTS_KEY,
                progress.achievements.galaxy_points().to_string(),
            ),
            (STATS_KEY, to_json(STATS_KEY, &progress.lifetime)?),
            (TETRIS_COUNT_KEY, progress.tetris_count.to_string()),
        ];
        let mut first_error = None;
        for (key, value) in &values {
            if let Err(e) = self.store.set(key, value) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn load_number(&self, key: &str) -> usize {
        let Some(raw) = self.store.get(key) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("ignoring malformed {key} value {raw:?}: {e}");
            0
        })
    }

    fn load_json<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.store.get(key) else {
            return T::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("ignoring malformed {key} value: {e}");
            T::default()
        })
    }
}

fn to_json<T>(key: &str, value: &T) -> Result<String, StoreError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(|e| StoreError::new(key, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::achievement::Milestones;

    #[derive(Debug, Default)]
    struct FailingStore {
        inner: MemoryStore,
        fail_key: &'static str,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.fail_key {
                return Err(StoreError::new(key, "disk full"));
            }
            self.inner.set(key, value)
        }
    }

    fn sample_progress() -> Progress {
        let mut achievements = AchievementTracker::new();
        achievements.evaluate(&Milestones {
            level: 5,
            ..Milestones::default()
        });
        Progress {
            high_score: 1234,
            achievements,
            lifetime: LifetimeStats {
                total_lines_cleared: 12,
                total_pieces_placed: 80,
                total_hard_drops: 9,
            },
            tetris_count: 2,
        }
    }

    #[test]
    fn test_load_empty_store_gives_defaults() {
        let progress = ProgressStore::new(MemoryStore::new()).load();
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = ProgressStore::new(MemoryStore::new());
        let progress = sample_progress();
        store.save(&progress).unwrap();
        assert_eq!(store.load(), progress);
    }

    #[test]
    fn test_saved_value_formats() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save(&sample_progress()).unwrap();
        let memory = store.into_inner();
        assert_eq!(memory.get(HIGH_SCORE_KEY).as_deref(), Some("1234"));
        assert_eq!(memory.get(GALAXY_POINTS_KEY).as_deref(), Some("20"));
        assert_eq!(memory.get(TETRIS_COUNT_KEY).as_deref(), Some("2"));
        assert_eq!(
            memory.get(STATS_KEY).as_deref(),
            Some(r#"{"totalLinesCleared":12,"totalPiecesPlaced":80,"totalHardDrops":9}"#)
        );
        let achievements: Vec<Achievement> =
            serde_json::from_str(&memory.get(ACHIEVEMENTS_KEY).unwrap()).unwrap();
        assert_eq!(achievements.len(), 7);
        assert_eq!(memory.entries().count(), PROGRESS_KEYS.len());
    }

    #[test]
    fn test_malformed_values_fall_back_to_defaults() {
        let mut memory = MemoryStore::new();
        memory.set(HIGH_SCORE_KEY, "lots").unwrap();
        memory.set(ACHIEVEMENTS_KEY, "{broken").unwrap();
        memory.set(GALAXY_POINTS_KEY, "-5").unwrap();
        memory.set(STATS_KEY, "[]").unwrap();
        memory.set(TETRIS_COUNT_KEY, "").unwrap();
        let progress = ProgressStore::new(memory).load();
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn test_partially_malformed_store_keeps_good_values() {
        let mut memory = MemoryStore::new();
        memory.set(HIGH_SCORE_KEY, " 77 ").unwrap();
        memory.set(STATS_KEY, "nope").unwrap();
        let progress = ProgressStore::new(memory).load();
        assert_eq!(progress.high_score, 77);
        assert_eq!(progress.lifetime, LifetimeStats::default());
    }

    #[test]
    fn test_save_failure_still_writes_other_keys() {
        let mut store = ProgressStore::new(FailingStore {
            inner: MemoryStore::new(),
            fail_key: STATS_KEY,
        });
        let err = store.save(&sample_progress()).unwrap_err();
        assert_eq!(err.key(), STATS_KEY);
        assert!(err.to_string().contains("disk full"));
        let memory = &store.store().inner;
        assert_eq!(memory.get(HIGH_SCORE_KEY).as_deref(), Some("1234"));
        assert_eq!(memory.get(TETRIS_COUNT_KEY).as_deref(), Some("2"));
        assert_eq!(memory.get(STATS_KEY), None);
    }

    #[test]
    fn test_store_through_mutable_reference() {
        let mut memory = MemoryStore::new();
        {
            let mut store = ProgressStore::new(&mut memory);
            store.save(&sample_progress()).unwrap();
        }
        assert_eq!(memory.get(HIGH_SCORE_KEY).as_deref(), Some("1234"));
    }
}
