//! Row, column, and box addressing for square boards.

use crate::{CoreError, CoreResult};

/// Side length of a box for the given boundary: 2 for 4x4, 3 for 9x9.
/// Fails when the boundary has no integer square root.
pub fn box_size(boundary: u8) -> CoreResult<u8> {
    let target = u16::from(boundary);
    let mut root = 1u16;
    while root * root < target {
        root += 1;
    }
    if root * root == target && boundary > 0 {
        Ok(root as u8)
    } else {
        Err(CoreError::InvalidBoundary(boundary))
    }
}

/// The cells sharing a house with some cell, excluding the cell itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbors {
    pub row: Vec<(u8, u8)>,
    pub column: Vec<(u8, u8)>,
    pub box_cells: Vec<(u8, u8)>,
}

/// Compute the row, column, and `sqrt(boundary) x sqrt(boundary)` box
/// neighbors of `(x, y)` on a board of the given boundary.
pub fn neighbors(x: u8, y: u8, boundary: u8) -> CoreResult<Neighbors> {
    let size = box_size(boundary)?;

    let row = (1..=boundary)
        .filter(|&cx| cx != x)
        .map(|cx| (cx, y))
        .collect();

    let column = (1..=boundary)
        .filter(|&cy| cy != y)
        .map(|cy| (x, cy))
        .collect();

    let box_x0 = ((x - 1) / size) * size + 1;
    let box_y0 = ((y - 1) / size) * size + 1;
    let mut box_cells = Vec::with_capacity(usize::from(boundary) - 1);
    for cy in box_y0..box_y0 + size {
        for cx in box_x0..box_x0 + size {
            if (cx, cy) != (x, y) {
                box_cells.push((cx, cy));
            }
        }
    }

    Ok(Neighbors {
        row,
        column,
        box_cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_size() {
        assert_eq!(box_size(4), Ok(2));
        assert_eq!(box_size(9), Ok(3));
        assert_eq!(box_size(6), Err(CoreError::InvalidBoundary(6)));
        assert_eq!(box_size(0), Err(CoreError::InvalidBoundary(0)));
    }

    #[test]
    fn test_neighbors_counts() {
        let n = neighbors(5, 5, 9).unwrap();
        assert_eq!(n.row.len(), 8);
        assert_eq!(n.column.len(), 8);
        assert_eq!(n.box_cells.len(), 8);
        assert!(!n.row.contains(&(5, 5)));
        assert!(!n.box_cells.contains(&(5, 5)));
    }

    #[test]
    fn test_neighbors_box_corners() {
        // (1, 1) on a 4x4 board sits in the top-left 2x2 box
        let n = neighbors(1, 1, 4).unwrap();
        assert_eq!(n.box_cells, vec![(2, 1), (1, 2), (2, 2)]);

        // (9, 9) on a 9x9 board sits in the bottom-right 3x3 box
        let n = neighbors(9, 9, 9).unwrap();
        assert!(n.box_cells.contains(&(7, 7)));
        assert!(n.box_cells.contains(&(8, 9)));
        assert!(!n.box_cells.contains(&(6, 9)));
    }

    #[test]
    fn test_neighbors_invalid_boundary() {
        assert!(neighbors(1, 1, 5).is_err());
    }
}
