//! Backtracking solver, shared by the generator (uniqueness checks) and by
//! callers that need the solution of a generated puzzle.

use crate::grid::box_size;
use crate::node::{node_key, Node};
use crate::puzzle::Puzzle;
use crate::CoreResult;
use std::collections::HashMap;

/// Flat row-major board used internally by the solver and the generator.
/// 0 means empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Board {
    pub boundary: u8,
    pub box_size: u8,
    pub cells: Vec<u8>,
}

impl Board {
    pub fn empty(boundary: u8) -> CoreResult<Self> {
        let size = box_size(boundary)?;
        Ok(Self {
            boundary,
            box_size: size,
            cells: vec![0; usize::from(boundary) * usize::from(boundary)],
        })
    }

    pub fn from_puzzle(puzzle: &Puzzle) -> CoreResult<Self> {
        let mut board = Self::empty(puzzle.boundary)?;
        for node in puzzle.nodes.values() {
            let idx = board.index(node.x, node.y);
            board.cells[idx] = node.value;
        }
        Ok(board)
    }

    /// Index of 1-based coordinates into the flat cell vector
    pub fn index(&self, x: u8, y: u8) -> usize {
        usize::from(y - 1) * usize::from(self.boundary) + usize::from(x - 1)
    }

    /// 1-based coordinates of a flat index
    pub fn coords(&self, idx: usize) -> (u8, u8) {
        let b = usize::from(self.boundary);
        ((idx % b) as u8 + 1, (idx / b) as u8 + 1)
    }

    /// Whether placing `value` at `(x, y)` keeps the row, column, and box
    /// free of duplicates. The cell itself is ignored.
    pub fn placement_ok(&self, x: u8, y: u8, value: u8) -> bool {
        for cx in 1..=self.boundary {
            if cx != x && self.cells[self.index(cx, y)] == value {
                return false;
            }
        }
        for cy in 1..=self.boundary {
            if cy != y && self.cells[self.index(x, cy)] == value {
                return false;
            }
        }
        let size = self.box_size;
        let box_x0 = ((x - 1) / size) * size + 1;
        let box_y0 = ((y - 1) / size) * size + 1;
        for cy in box_y0..box_y0 + size {
            for cx in box_x0..box_x0 + size {
                if (cx, cy) != (x, y) && self.cells[self.index(cx, cy)] == value {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the filled cells are free of row/column/box duplicates.
    /// Backtracking only validates the cells it places, so inconsistent
    /// clues must be rejected up front.
    pub fn clues_consistent(&self) -> bool {
        self.cells.iter().enumerate().all(|(idx, &value)| {
            let (x, y) = self.coords(idx);
            value == 0 || self.placement_ok(x, y, value)
        })
    }

    /// Count completions of the board by backtracking, stopping once
    /// `limit` solutions have been found.
    pub fn count_solutions(&mut self, limit: usize) -> usize {
        if !self.clues_consistent() {
            return 0;
        }
        let mut found = 0;
        self.count_from(0, limit, &mut found);
        found
    }

    fn count_from(&mut self, start: usize, limit: usize, found: &mut usize) {
        let Some(idx) = (start..self.cells.len()).find(|&i| self.cells[i] == 0) else {
            *found += 1;
            return;
        };
        let (x, y) = self.coords(idx);
        for value in 1..=self.boundary {
            if self.placement_ok(x, y, value) {
                self.cells[idx] = value;
                self.count_from(idx + 1, limit, found);
                self.cells[idx] = 0;
                if *found >= limit {
                    return;
                }
            }
        }
    }

    /// Fill every empty cell, trying candidates in ascending order.
    /// Returns false if the board has no completion.
    pub fn solve_in_place(&mut self) -> bool {
        self.clues_consistent() && self.solve_from(0)
    }

    fn solve_from(&mut self, start: usize) -> bool {
        let Some(idx) = (start..self.cells.len()).find(|&i| self.cells[i] == 0) else {
            return true;
        };
        let (x, y) = self.coords(idx);
        for value in 1..=self.boundary {
            if self.placement_ok(x, y, value) {
                self.cells[idx] = value;
                if self.solve_from(idx + 1) {
                    return true;
                }
                self.cells[idx] = 0;
            }
        }
        false
    }
}

/// Sudoku solver over [`Puzzle`] values
#[derive(Debug, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning a fully filled copy. `None` if the
    /// current board state admits no completion.
    pub fn solve(&self, puzzle: &Puzzle) -> CoreResult<Option<Puzzle>> {
        let mut board = Board::from_puzzle(puzzle)?;
        if !board.solve_in_place() {
            return Ok(None);
        }

        let mut nodes = HashMap::with_capacity(board.cells.len());
        for (idx, &value) in board.cells.iter().enumerate() {
            let (x, y) = board.coords(idx);
            let is_fixed = puzzle.node(x, y).map(|n| n.is_fixed).unwrap_or(false);
            nodes.insert(node_key(x, y), Node::new(x, y, value, is_fixed));
        }
        Ok(Some(Puzzle::new(
            puzzle.boundary,
            puzzle.difficulty,
            nodes,
            puzzle.elapsed_time,
        )))
    }

    /// Count the puzzle's solutions, up to `limit`
    pub fn count_solutions(&self, puzzle: &Puzzle, limit: usize) -> CoreResult<usize> {
        let mut board = Board::from_puzzle(puzzle)?;
        Ok(board.count_solutions(limit))
    }

    /// Whether the puzzle has exactly one completion
    pub fn has_unique_solution(&self, puzzle: &Puzzle) -> CoreResult<bool> {
        Ok(self.count_solutions(puzzle, 2)? == 1)
    }
}
