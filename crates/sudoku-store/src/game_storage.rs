//! Durable storage for the current game.

use crate::error::{StoreError, StoreResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use sudoku_core::{node_key, Difficulty, Node, Puzzle};

/// Storage backend for the single in-progress game
pub trait GameStorage {
    /// Read the current game; `NotFound` when none exists
    fn get_current_game(&self) -> StoreResult<Puzzle>;

    /// Replace the stored puzzle wholesale and return it. Used both for
    /// new games and elapsed-time-only saves.
    fn update_game(&mut self, game: Puzzle) -> StoreResult<Puzzle>;

    /// Write one cell and the elapsed time, persist, and return the
    /// resulting puzzle for completion checking by the caller. Refuses
    /// fixed cells.
    fn update_node(&mut self, x: u8, y: u8, value: u8, elapsed_time: u64) -> StoreResult<Puzzle>;
}

/// Apply a node mutation to a loaded puzzle, enforcing the fixed-cell
/// policy. Shared by the storage implementations.
fn apply_node_update(
    puzzle: &mut Puzzle,
    x: u8,
    y: u8,
    value: u8,
    elapsed_time: u64,
) -> StoreResult<()> {
    let node = puzzle
        .nodes
        .get_mut(&node_key(x, y))
        .ok_or(StoreError::UnknownCell { x, y })?;
    if node.is_fixed {
        return Err(StoreError::FixedCell { x, y });
    }
    node.value = value;
    puzzle.elapsed_time = elapsed_time;
    Ok(())
}

/// Persisted shape of the current game: `boundary^2` cells plus the
/// metadata listed in the save format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedGame {
    boundary: u8,
    difficulty: Difficulty,
    elapsed_time: u64,
    cells: Vec<SavedCell>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SavedCell {
    x: u8,
    y: u8,
    value: u8,
    is_fixed: bool,
}

impl SavedGame {
    fn from_puzzle(puzzle: &Puzzle) -> Self {
        let mut cells: Vec<SavedCell> = puzzle
            .nodes
            .values()
            .map(|n| SavedCell {
                x: n.x,
                y: n.y,
                value: n.value,
                is_fixed: n.is_fixed,
            })
            .collect();
        cells.sort_by_key(|c| (c.y, c.x));
        Self {
            boundary: puzzle.boundary,
            difficulty: puzzle.difficulty,
            elapsed_time: puzzle.elapsed_time,
            cells,
        }
    }

    fn into_puzzle(self) -> StoreResult<Puzzle> {
        let expected = usize::from(self.boundary) * usize::from(self.boundary);
        if self.cells.len() != expected {
            return Err(StoreError::Corrupted(format!(
                "expected {} cells, found {}",
                expected,
                self.cells.len()
            )));
        }

        let mut nodes = HashMap::with_capacity(expected);
        for cell in self.cells {
            nodes.insert(
                node_key(cell.x, cell.y),
                Node::new(cell.x, cell.y, cell.value, cell.is_fixed),
            );
        }
        if nodes.len() != expected {
            return Err(StoreError::Corrupted(
                "duplicate or out-of-range cell coordinates".to_string(),
            ));
        }
        Ok(Puzzle::new(
            self.boundary,
            self.difficulty,
            nodes,
            self.elapsed_time,
        ))
    }
}

/// File-backed game storage: one JSON document under the platform data
/// directory
pub struct FileGameStorage {
    path: PathBuf,
}

impl FileGameStorage {
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku_current_game.json");
        Self { path }
    }

    /// Storage rooted at an explicit file path (used by tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> StoreResult<Puzzle> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        let saved: SavedGame =
            serde_json::from_str(&json).map_err(|e| StoreError::Corrupted(e.to_string()))?;
        saved.into_puzzle()
    }

    fn write(&self, puzzle: &Puzzle) -> StoreResult<()> {
        let saved = SavedGame::from_puzzle(puzzle);
        let json =
            serde_json::to_string_pretty(&saved).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl Default for FileGameStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStorage for FileGameStorage {
    fn get_current_game(&self) -> StoreResult<Puzzle> {
        self.read()
    }

    fn update_game(&mut self, game: Puzzle) -> StoreResult<Puzzle> {
        self.write(&game)?;
        Ok(game)
    }

    fn update_node(&mut self, x: u8, y: u8, value: u8, elapsed_time: u64) -> StoreResult<Puzzle> {
        let mut puzzle = self.read()?;
        apply_node_update(&mut puzzle, x, y, value, elapsed_time)?;
        self.write(&puzzle)?;
        debug!("wrote {} at ({}, {})", value, x, y);
        Ok(puzzle)
    }
}

/// In-memory game storage for tests; clones share the same underlying game
#[derive(Clone, Default)]
pub struct MemoryGameStorage {
    current: Arc<Mutex<Option<Puzzle>>>,
}

impl MemoryGameStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStorage for MemoryGameStorage {
    fn get_current_game(&self) -> StoreResult<Puzzle> {
        let guard = self
            .current
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        guard.clone().ok_or(StoreError::NotFound)
    }

    fn update_game(&mut self, game: Puzzle) -> StoreResult<Puzzle> {
        let mut guard = self
            .current
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        *guard = Some(game.clone());
        Ok(game)
    }

    fn update_node(&mut self, x: u8, y: u8, value: u8, elapsed_time: u64) -> StoreResult<Puzzle> {
        let mut guard = self
            .current
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let puzzle = guard.as_mut().ok_or(StoreError::NotFound)?;
        apply_node_update(puzzle, x, y, value, elapsed_time)?;
        Ok(puzzle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_core::Generator;

    fn sample_puzzle() -> Puzzle {
        Generator::with_seed(5).generate(4, Difficulty::Easy).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sudoku-store-test-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_memory_not_found() {
        let storage = MemoryGameStorage::new();
        assert_eq!(storage.get_current_game().unwrap_err(), StoreError::NotFound);
    }

    #[test]
    fn test_memory_roundtrip_and_node_update() {
        let mut storage = MemoryGameStorage::new();
        let puzzle = sample_puzzle();
        storage.update_game(puzzle.clone()).unwrap();

        let loaded = storage.get_current_game().unwrap();
        assert_eq!(loaded, puzzle);

        let (x, y) = loaded
            .nodes
            .values()
            .find(|n| !n.is_fixed)
            .map(|n| (n.x, n.y))
            .unwrap();
        let updated = storage.update_node(x, y, 3, 17).unwrap();
        assert_eq!(updated.value(x, y), Some(3));
        assert_eq!(updated.elapsed_time, 17);
        assert_eq!(storage.get_current_game().unwrap(), updated);
    }

    #[test]
    fn test_fixed_cell_refused() {
        let mut storage = MemoryGameStorage::new();
        let puzzle = sample_puzzle();
        let fixed = puzzle.nodes.values().find(|n| n.is_fixed).copied().unwrap();
        storage.update_game(puzzle).unwrap();

        let err = storage.update_node(fixed.x, fixed.y, 1, 5).unwrap_err();
        assert_eq!(err, StoreError::FixedCell { x: fixed.x, y: fixed.y });

        // value and elapsed time are untouched
        let unchanged = storage.get_current_game().unwrap();
        assert_eq!(unchanged.value(fixed.x, fixed.y), Some(fixed.value));
        assert_eq!(unchanged.elapsed_time, 0);
    }

    #[test]
    fn test_unknown_cell_refused() {
        let mut storage = MemoryGameStorage::new();
        storage.update_game(sample_puzzle()).unwrap();
        assert_eq!(
            storage.update_node(9, 9, 1, 0).unwrap_err(),
            StoreError::UnknownCell { x: 9, y: 9 }
        );
    }

    #[test]
    fn test_file_roundtrip() {
        let path = temp_path("game-roundtrip");
        let mut storage = FileGameStorage::with_path(path.clone());

        assert_eq!(storage.get_current_game().unwrap_err(), StoreError::NotFound);

        let puzzle = sample_puzzle();
        storage.update_game(puzzle.clone()).unwrap();
        assert_eq!(storage.get_current_game().unwrap(), puzzle);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_corrupted() {
        let path = temp_path("game-corrupted");
        fs::write(&path, "not json").unwrap();
        let storage = FileGameStorage::with_path(path.clone());
        assert!(matches!(
            storage.get_current_game(),
            Err(StoreError::Corrupted(_))
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_saved_game_cell_count_validated() {
        let saved = SavedGame {
            boundary: 4,
            difficulty: Difficulty::Easy,
            elapsed_time: 0,
            cells: vec![SavedCell { x: 1, y: 1, value: 0, is_fixed: false }],
        };
        assert!(matches!(saved.into_puzzle(), Err(StoreError::Corrupted(_))));
    }
}
