use serde::{Deserialize, Serialize};

/// A single cell of the board.
///
/// Coordinates are 1-based: the top-left cell is `(1, 1)` and the
/// bottom-right cell is `(boundary, boundary)`. A `value` of 0 means the
/// cell is empty; fixed cells are the generated clues and may never be
/// overwritten by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub x: u8,
    pub y: u8,
    pub value: u8,
    pub is_fixed: bool,
}

impl Node {
    pub fn new(x: u8, y: u8, value: u8, is_fixed: bool) -> Self {
        Self {
            x,
            y,
            value,
            is_fixed,
        }
    }

    /// Lookup key of this node in the board mapping
    pub fn key(&self) -> i32 {
        node_key(self.x, self.y)
    }
}

/// Composite coordinate key: `x * 100` concatenated with `y`, read as an
/// integer. `(3, 7)` becomes 3007. Injective for all coordinates up to the
/// largest supported boundary (9), where `y` is a single digit.
pub fn node_key(x: u8, y: u8) -> i32 {
    let prefix = i32::from(x) * 100;
    let y = i32::from(y);
    let mut magnitude = 10;
    while magnitude <= y {
        magnitude *= 10;
    }
    prefix * magnitude + y
}
