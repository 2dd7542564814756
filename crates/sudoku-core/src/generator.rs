//! Puzzle generation: randomized constructive backtracking followed by
//! uniqueness-checked clue removal.

use crate::node::{node_key, Node};
use crate::puzzle::{Difficulty, Puzzle};
use crate::solver::Board;
use crate::CoreResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// Full restarts before falling back to naive removal
const MAX_ATTEMPTS: usize = 100;

/// Backtracking steps allowed per constructive fill before restarting it
const FILL_STEP_LIMIT: usize = 500_000;

/// Puzzle generator for 4x4 and 9x9 boards
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a puzzle of the given size and difficulty.
    ///
    /// Clue cells form a valid partial assignment with exactly one
    /// completion, and their count equals
    /// `round(boundary^2 * difficulty.modifier())`.
    pub fn generate(&mut self, boundary: u8, difficulty: Difficulty) -> CoreResult<Puzzle> {
        let target = Puzzle::target_fixed_count(boundary, difficulty);

        for _ in 0..MAX_ATTEMPTS {
            let solution = self.fill_board(boundary)?;
            if let Some(board) = self.remove_clues_unique(&solution, target) {
                return Ok(board_to_puzzle(&board, difficulty));
            }
        }

        // Every attempt got stuck before reaching the target clue count.
        // Fall back to naive removal, which keeps the count exact at the
        // cost of the uniqueness guarantee.
        let solution = self.fill_board(boundary)?;
        let board = self.remove_clues_naive(&solution, target);
        Ok(board_to_puzzle(&board, difficulty))
    }

    /// Produce a fully solved board: fill cells in row-major order, trying
    /// candidate values in randomized order and backtracking on dead ends.
    /// A solution always exists for boundaries 4 and 9, but the step limit
    /// guards against pathological backtracking by restarting the fill.
    fn fill_board(&mut self, boundary: u8) -> CoreResult<Board> {
        loop {
            let mut board = Board::empty(boundary)?;
            let mut steps = 0usize;
            if self.fill_from(&mut board, 0, &mut steps) {
                return Ok(board);
            }
        }
    }

    fn fill_from(&mut self, board: &mut Board, idx: usize, steps: &mut usize) -> bool {
        if idx == board.cells.len() {
            return true;
        }
        if *steps > FILL_STEP_LIMIT {
            return false;
        }

        let (x, y) = board.coords(idx);
        let mut candidates: Vec<u8> = (1..=board.boundary).collect();
        candidates.shuffle(&mut self.rng);

        for value in candidates {
            *steps += 1;
            if board.placement_ok(x, y, value) {
                board.cells[idx] = value;
                if self.fill_from(board, idx + 1, steps) {
                    return true;
                }
                board.cells[idx] = 0;
            }
        }
        false
    }

    /// Clear random cells until `target` clues remain, keeping a removal
    /// only if the puzzle still has exactly one solution. A cell that
    /// cannot be removed now stays unremovable (removing others only loses
    /// constraints), so each cell is tried once. Returns `None` when the
    /// pass gets stuck above the target count.
    fn remove_clues_unique(&mut self, solution: &Board, target: usize) -> Option<Board> {
        let mut board = solution.clone();
        let mut remaining = board.cells.len();

        let mut order: Vec<usize> = (0..board.cells.len()).collect();
        order.shuffle(&mut self.rng);

        for idx in order {
            if remaining == target {
                break;
            }
            let value = board.cells[idx];
            board.cells[idx] = 0;
            if board.count_solutions(2) == 1 {
                remaining -= 1;
            } else {
                board.cells[idx] = value;
            }
        }

        (remaining == target).then_some(board)
    }

    /// Clear random cells until `target` clues remain, without re-checking
    /// uniqueness
    fn remove_clues_naive(&mut self, solution: &Board, target: usize) -> Board {
        let mut board = solution.clone();
        let mut order: Vec<usize> = (0..board.cells.len()).collect();
        order.shuffle(&mut self.rng);

        for idx in order.into_iter().take(board.cells.len() - target) {
            board.cells[idx] = 0;
        }
        board
    }
}

/// Convert a carved board into a puzzle: surviving cells become fixed
/// clues, cleared cells become empty player cells.
fn board_to_puzzle(board: &Board, difficulty: Difficulty) -> Puzzle {
    let mut nodes = HashMap::with_capacity(board.cells.len());
    for (idx, &value) in board.cells.iter().enumerate() {
        let (x, y) = board.coords(idx);
        nodes.insert(node_key(x, y), Node::new(x, y, value, value != 0));
    }
    Puzzle::new(board.boundary, difficulty, nodes, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solver;
    use crate::validation::{is_complete, is_valid_partial};
    use crate::CoreError;

    #[test]
    fn test_generate_invalid_boundary() {
        let mut generator = Generator::with_seed(1);
        assert_eq!(
            generator.generate(5, Difficulty::Easy).unwrap_err(),
            CoreError::InvalidBoundary(5)
        );
    }

    #[test]
    fn test_fill_board_is_complete_solution() {
        let mut generator = Generator::with_seed(42);
        for boundary in [4u8, 9] {
            let board = generator.fill_board(boundary).unwrap();
            let puzzle = board_to_puzzle(&board, Difficulty::Easy);
            assert!(is_complete(&puzzle), "{}x{} fill not valid", boundary, boundary);
        }
    }

    #[test]
    fn test_generate_fixed_counts_and_validity() {
        let mut generator = Generator::with_seed(7);
        for boundary in [4u8, 9] {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let puzzle = generator.generate(boundary, difficulty).unwrap();

                assert_eq!(puzzle.nodes.len(), usize::from(boundary) * usize::from(boundary));
                assert_eq!(
                    puzzle.fixed_count(),
                    Puzzle::target_fixed_count(boundary, difficulty)
                );
                assert!(is_valid_partial(&puzzle));

                // Non-fixed cells start empty
                assert!(puzzle
                    .nodes
                    .values()
                    .all(|n| n.is_fixed == (n.value != 0)));
            }
        }
    }

    #[test]
    fn test_generated_puzzle_has_unique_solution() {
        let mut generator = Generator::with_seed(11);
        let solver = Solver::new();
        for boundary in [4u8, 9] {
            let puzzle = generator.generate(boundary, Difficulty::Hard).unwrap();
            assert!(solver.has_unique_solution(&puzzle).unwrap());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = Generator::with_seed(3).generate(9, Difficulty::Medium).unwrap();
        let b = Generator::with_seed(3).generate(9, Difficulty::Medium).unwrap();
        assert_eq!(a, b);
    }
}
