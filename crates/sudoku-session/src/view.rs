//! UI-facing session state, owned by the controller and read by the
//! presentation layer.

use std::collections::HashMap;
use sudoku_core::{node_key, Difficulty, Puzzle};

/// Tri-state screen mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Loading,
    Active,
    Complete,
}

/// One board tile as the UI sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileState {
    pub x: u8,
    pub y: u8,
    pub value: u8,
    pub is_fixed: bool,
    pub has_focus: bool,
}

/// Snapshot of everything the game screen renders
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Board tiles keyed by [`node_key`]
    pub board: HashMap<i32, TileState>,
    /// Elapsed play time in seconds
    pub timer: u64,
    pub boundary: u8,
    pub difficulty: Difficulty,
    pub screen: ScreenState,
    pub is_new_record: bool,
    error_pending: bool,
}

impl SessionView {
    pub(crate) fn new() -> Self {
        Self {
            board: HashMap::new(),
            timer: 0,
            boundary: 9,
            difficulty: Difficulty::Medium,
            screen: ScreenState::Loading,
            is_new_record: false,
            error_pending: false,
        }
    }

    /// Rebuild the board snapshot from a loaded puzzle
    pub(crate) fn load_puzzle(&mut self, puzzle: &Puzzle) {
        self.board = puzzle
            .nodes
            .values()
            .map(|n| {
                (
                    n.key(),
                    TileState {
                        x: n.x,
                        y: n.y,
                        value: n.value,
                        is_fixed: n.is_fixed,
                        has_focus: false,
                    },
                )
            })
            .collect();
        self.boundary = puzzle.boundary;
        self.difficulty = puzzle.difficulty;
        self.timer = puzzle.elapsed_time;
        self.is_new_record = false;
    }

    /// The tile currently holding input focus, if any
    pub fn focused_tile(&self) -> Option<TileState> {
        self.board.values().find(|t| t.has_focus).copied()
    }

    /// Move focus to `(x, y)`; at most one tile has focus at any time
    pub(crate) fn set_focus(&mut self, x: u8, y: u8) {
        for tile in self.board.values_mut() {
            tile.has_focus = tile.x == x && tile.y == y;
        }
    }

    /// Write a value into the snapshot and drop focus from the tile
    pub(crate) fn set_tile_value(&mut self, x: u8, y: u8, value: u8) {
        if let Some(tile) = self.board.get_mut(&node_key(x, y)) {
            tile.value = value;
            tile.has_focus = false;
        }
    }

    pub(crate) fn flag_error(&mut self) {
        self.error_pending = true;
    }

    /// Consume the pending "something went wrong" notification, if any
    pub fn take_error(&mut self) -> bool {
        std::mem::take(&mut self.error_pending)
    }

    /// Elapsed time formatted for display
    pub fn timer_text(&self) -> String {
        format_time(self.timer)
    }
}

/// Format seconds as MM:SS
pub fn format_time(secs: u64) -> String {
    let mins = secs / 60;
    let secs = secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_core::{Generator, Puzzle};

    fn sample() -> Puzzle {
        Generator::with_seed(2)
            .generate(4, Difficulty::Easy)
            .unwrap()
    }

    #[test]
    fn test_load_puzzle_snapshots_board() {
        let mut view = SessionView::new();
        let puzzle = sample();
        view.load_puzzle(&puzzle);

        assert_eq!(view.board.len(), 16);
        assert_eq!(view.boundary, 4);
        assert!(view.focused_tile().is_none());
    }

    #[test]
    fn test_single_focus() {
        let mut view = SessionView::new();
        view.load_puzzle(&sample());

        view.set_focus(1, 1);
        view.set_focus(2, 3);

        let focused: Vec<_> = view.board.values().filter(|t| t.has_focus).collect();
        assert_eq!(focused.len(), 1);
        assert_eq!((focused[0].x, focused[0].y), (2, 3));
    }

    #[test]
    fn test_set_tile_value_clears_focus() {
        let mut view = SessionView::new();
        view.load_puzzle(&sample());

        view.set_focus(2, 2);
        view.set_tile_value(2, 2, 4);

        let tile = view.board[&sudoku_core::node_key(2, 2)];
        assert_eq!(tile.value, 4);
        assert!(!tile.has_focus);
        assert!(view.focused_tile().is_none());
    }

    #[test]
    fn test_take_error_consumes_flag() {
        let mut view = SessionView::new();
        assert!(!view.take_error());
        view.flag_error();
        assert!(view.take_error());
        assert!(!view.take_error());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(599), "09:59");
        assert_eq!(format_time(3600), "60:00");
    }
}
