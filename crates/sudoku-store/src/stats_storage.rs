//! Best-time records, one per (board size, difficulty) pair.

use crate::error::{StoreError, StoreResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use sudoku_core::Difficulty;

/// Best completion times in seconds; 0 denotes "no record yet"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub four_easy: u64,
    pub four_medium: u64,
    pub four_hard: u64,
    pub nine_easy: u64,
    pub nine_medium: u64,
    pub nine_hard: u64,
}

impl UserStatistics {
    /// The counter for a (boundary, difficulty) pair
    pub fn best_time(&self, boundary: u8, difficulty: Difficulty) -> StoreResult<u64> {
        self.counter(boundary, difficulty).copied()
    }

    fn counter(&self, boundary: u8, difficulty: Difficulty) -> StoreResult<&u64> {
        match (boundary, difficulty) {
            (4, Difficulty::Easy) => Ok(&self.four_easy),
            (4, Difficulty::Medium) => Ok(&self.four_medium),
            (4, Difficulty::Hard) => Ok(&self.four_hard),
            (9, Difficulty::Easy) => Ok(&self.nine_easy),
            (9, Difficulty::Medium) => Ok(&self.nine_medium),
            (9, Difficulty::Hard) => Ok(&self.nine_hard),
            (b, _) => Err(StoreError::InvalidBoundary(b)),
        }
    }

    fn counter_mut(&mut self, boundary: u8, difficulty: Difficulty) -> StoreResult<&mut u64> {
        match (boundary, difficulty) {
            (4, Difficulty::Easy) => Ok(&mut self.four_easy),
            (4, Difficulty::Medium) => Ok(&mut self.four_medium),
            (4, Difficulty::Hard) => Ok(&mut self.four_hard),
            (9, Difficulty::Easy) => Ok(&mut self.nine_easy),
            (9, Difficulty::Medium) => Ok(&mut self.nine_medium),
            (9, Difficulty::Hard) => Ok(&mut self.nine_hard),
            (b, _) => Err(StoreError::InvalidBoundary(b)),
        }
    }

    /// Apply a completion time; stores it and returns true iff it beats
    /// the existing record (or none exists)
    pub fn record(&mut self, time: u64, boundary: u8, difficulty: Difficulty) -> StoreResult<bool> {
        let counter = self.counter_mut(boundary, difficulty)?;
        if *counter == 0 || time < *counter {
            *counter = time;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Storage backend for [`UserStatistics`]
pub trait StatisticsStore {
    /// Read the statistics; empty counters on first run
    fn get_statistics(&mut self) -> StoreResult<UserStatistics>;

    /// Record a completion time for the given board size and difficulty.
    /// Returns whether the time is a new record; storage is left untouched
    /// when it is not.
    fn update_statistics(
        &mut self,
        time: u64,
        boundary: u8,
        difficulty: Difficulty,
    ) -> StoreResult<bool>;
}

/// File-backed statistics storage
pub struct FileStatisticsStore {
    path: PathBuf,
}

impl FileStatisticsStore {
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku_statistics.json");
        Self { path }
    }

    /// Storage rooted at an explicit file path (used by tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> StoreResult<UserStatistics> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                serde_json::from_str(&json).map_err(|e| StoreError::Corrupted(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(UserStatistics::default()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn write(&self, stats: &UserStatistics) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(stats).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl Default for FileStatisticsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsStore for FileStatisticsStore {
    fn get_statistics(&mut self) -> StoreResult<UserStatistics> {
        self.read()
    }

    fn update_statistics(
        &mut self,
        time: u64,
        boundary: u8,
        difficulty: Difficulty,
    ) -> StoreResult<bool> {
        let mut stats = self.read()?;
        let is_record = stats.record(time, boundary, difficulty)?;
        if is_record {
            debug!("new {}x{} {} record: {}s", boundary, boundary, difficulty, time);
            self.write(&stats)?;
        }
        Ok(is_record)
    }
}

/// In-memory statistics storage for tests; clones share the same counters
#[derive(Clone, Default)]
pub struct MemoryStatisticsStore {
    stats: Arc<Mutex<UserStatistics>>,
}

impl MemoryStatisticsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatisticsStore for MemoryStatisticsStore {
    fn get_statistics(&mut self) -> StoreResult<UserStatistics> {
        let guard = self
            .stats
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(*guard)
    }

    fn update_statistics(
        &mut self,
        time: u64,
        boundary: u8,
        difficulty: Difficulty,
    ) -> StoreResult<bool> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        guard.record(time, boundary, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_completion_is_record() {
        let mut store = MemoryStatisticsStore::new();
        assert!(store.update_statistics(120, 9, Difficulty::Easy).unwrap());
        assert_eq!(
            store
                .get_statistics()
                .unwrap()
                .best_time(9, Difficulty::Easy)
                .unwrap(),
            120
        );
    }

    #[test]
    fn test_faster_time_replaces_record() {
        let mut store = MemoryStatisticsStore::new();
        assert!(store.update_statistics(120, 4, Difficulty::Hard).unwrap());
        assert!(store.update_statistics(90, 4, Difficulty::Hard).unwrap());
        assert_eq!(
            store
                .get_statistics()
                .unwrap()
                .best_time(4, Difficulty::Hard)
                .unwrap(),
            90
        );
    }

    #[test]
    fn test_slower_or_equal_time_is_not_record() {
        let mut store = MemoryStatisticsStore::new();
        assert!(store.update_statistics(100, 9, Difficulty::Medium).unwrap());
        assert!(!store.update_statistics(100, 9, Difficulty::Medium).unwrap());
        assert!(!store.update_statistics(150, 9, Difficulty::Medium).unwrap());
        assert_eq!(
            store
                .get_statistics()
                .unwrap()
                .best_time(9, Difficulty::Medium)
                .unwrap(),
            100
        );
    }

    #[test]
    fn test_counters_are_independent() {
        let mut store = MemoryStatisticsStore::new();
        store.update_statistics(50, 4, Difficulty::Easy).unwrap();
        let stats = store.get_statistics().unwrap();
        assert_eq!(stats.best_time(4, Difficulty::Easy).unwrap(), 50);
        assert_eq!(stats.best_time(9, Difficulty::Easy).unwrap(), 0);
        assert_eq!(stats.best_time(4, Difficulty::Medium).unwrap(), 0);
    }

    #[test]
    fn test_unsupported_boundary() {
        let mut store = MemoryStatisticsStore::new();
        assert_eq!(
            store.update_statistics(10, 6, Difficulty::Easy).unwrap_err(),
            StoreError::InvalidBoundary(6)
        );
    }

    #[test]
    fn test_file_store_persists_only_records() {
        let path = std::env::temp_dir().join(format!(
            "sudoku-store-test-{}-stats.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut store = FileStatisticsStore::with_path(path.clone());
        assert_eq!(store.get_statistics().unwrap(), UserStatistics::default());

        assert!(store.update_statistics(77, 9, Difficulty::Hard).unwrap());
        assert!(!store.update_statistics(80, 9, Difficulty::Hard).unwrap());

        let reloaded = FileStatisticsStore::with_path(path.clone())
            .get_statistics()
            .unwrap();
        assert_eq!(reloaded.best_time(9, Difficulty::Hard).unwrap(), 77);

        let _ = fs::remove_file(path);
    }
}
