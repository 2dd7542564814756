use crate::node::{node_key, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Puzzle difficulty, expressed as the fraction of cells kept as clues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fill-ratio modifier: the fraction of cells that stay fixed
    pub fn modifier(self) -> f64 {
        match self {
            Self::Easy => 0.50,
            Self::Medium => 0.44,
            Self::Hard => 0.38,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// An in-progress puzzle: one node per cell, keyed by [`node_key`]
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Side length of the board (4 or 9)
    pub boundary: u8,
    pub difficulty: Difficulty,
    /// Exactly `boundary * boundary` entries, one per coordinate pair
    pub nodes: HashMap<i32, Node>,
    /// Elapsed play time in seconds
    pub elapsed_time: u64,
}

impl Puzzle {
    pub fn new(
        boundary: u8,
        difficulty: Difficulty,
        nodes: HashMap<i32, Node>,
        elapsed_time: u64,
    ) -> Self {
        Self {
            boundary,
            difficulty,
            nodes,
            elapsed_time,
        }
    }

    /// Number of clue cells a generated puzzle keeps for this size and
    /// difficulty: `round(boundary^2 * modifier)`
    pub fn target_fixed_count(boundary: u8, difficulty: Difficulty) -> usize {
        let cells = f64::from(boundary) * f64::from(boundary);
        (cells * difficulty.modifier()).round() as usize
    }

    /// All coordinate pairs of a board in row-major order
    pub fn coords(boundary: u8) -> impl Iterator<Item = (u8, u8)> {
        (1..=boundary).flat_map(move |y| (1..=boundary).map(move |x| (x, y)))
    }

    pub fn node(&self, x: u8, y: u8) -> Option<&Node> {
        self.nodes.get(&node_key(x, y))
    }

    /// Value at `(x, y)`; 0 for an empty cell, `None` for a coordinate
    /// outside the board
    pub fn value(&self, x: u8, y: u8) -> Option<u8> {
        self.node(x, y).map(|n| n.value)
    }

    /// Write a value into a cell. Returns false if the coordinate does not
    /// exist on this board; fixed-cell policy is enforced by the storage
    /// layer, not here.
    pub fn set_value(&mut self, x: u8, y: u8, value: u8) -> bool {
        match self.nodes.get_mut(&node_key(x, y)) {
            Some(node) => {
                node.value = value;
                true
            }
            None => false,
        }
    }

    /// Number of clue cells
    pub fn fixed_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_fixed).count()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.nodes.values().filter(|n| n.value == 0).count()
    }
}
