//! Completion and validity checks for a board state.

use crate::grid::box_size;
use crate::puzzle::Puzzle;

/// Whether the puzzle is a valid, complete solution: every cell holds a
/// nonzero value and every row, column, and box contains each value in
/// `1..=boundary` exactly once.
pub fn is_complete(puzzle: &Puzzle) -> bool {
    puzzle.nodes.values().all(|n| n.value != 0) && houses_free_of_duplicates(puzzle)
}

/// Whether the filled cells form a valid partial assignment: no duplicate
/// nonzero value in any row, column, or box. Empty cells are ignored.
pub fn is_valid_partial(puzzle: &Puzzle) -> bool {
    puzzle.nodes.len() == usize::from(puzzle.boundary) * usize::from(puzzle.boundary)
        && houses_free_of_duplicates(puzzle)
}

fn houses_free_of_duplicates(puzzle: &Puzzle) -> bool {
    let boundary = puzzle.boundary;
    let Ok(size) = box_size(boundary) else {
        return false;
    };

    // Rows and columns
    for a in 1..=boundary {
        let mut row_seen = vec![false; usize::from(boundary) + 1];
        let mut col_seen = vec![false; usize::from(boundary) + 1];
        for b in 1..=boundary {
            if !mark(&mut row_seen, puzzle.value(b, a)) {
                return false;
            }
            if !mark(&mut col_seen, puzzle.value(a, b)) {
                return false;
            }
        }
    }

    // Boxes
    for box_y in 0..size {
        for box_x in 0..size {
            let mut seen = vec![false; usize::from(boundary) + 1];
            for dy in 0..size {
                for dx in 0..size {
                    let x = box_x * size + dx + 1;
                    let y = box_y * size + dy + 1;
                    if !mark(&mut seen, puzzle.value(x, y)) {
                        return false;
                    }
                }
            }
        }
    }

    true
}

/// Mark a value as seen; false on a duplicate or a missing node
fn mark(seen: &mut [bool], value: Option<u8>) -> bool {
    match value {
        None => false,
        Some(0) => true,
        Some(v) => {
            let slot = usize::from(v);
            if slot >= seen.len() || seen[slot] {
                return false;
            }
            seen[slot] = true;
            true
        }
    }
}
