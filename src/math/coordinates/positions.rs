//! Boundary sides and grid directions.

use crate::maze::grid::Cell;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// One of the four sides of the maze boundary ring.
///
/// Sides are numbered clockwise from the top, so the opposite side is always
/// `(index + 2) % 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Heading (radians) of a unit walking from outside the maze through this side.
    pub fn inward_heading(self) -> f32 {
        match self {
            Side::Top => FRAC_PI_2,
            Side::Right => PI,
            Side::Bottom => -FRAC_PI_2,
            Side::Left => 0.0,
        }
    }
}

/// Orthogonal grid directions, in the order the pathfinder expands them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column delta of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Gets the cell `steps` cells away from `cell` in `direction`.
///
/// # Returns
/// `None` if the result would fall outside a `columns` × `rows` grid
pub fn offset_cell(
    cell: Cell,
    direction: Direction,
    steps: usize,
    dimensions: (usize, usize),
) -> Option<Cell> {
    let (columns, rows) = dimensions;
    let (dr, dc) = direction.delta();
    let row = cell.row.checked_add_signed(dr * steps as isize)?;
    let col = cell.col.checked_add_signed(dc * steps as isize)?;
    (row < rows && col < columns).then_some(Cell::new(row, col))
}

/// Iterates the in-bounds orthogonal neighbours of a cell (up, right, down, left).
pub fn neighbors(cell: Cell, dimensions: (usize, usize)) -> impl Iterator<Item = Cell> {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| offset_cell(cell, direction, 1, dimensions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_sides() {
        for side in Side::ALL {
            assert_eq!(side.opposite().index(), (side.index() + 2) % 4);
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn offset_cell_respects_bounds() {
        let dims = (5, 5);
        assert_eq!(offset_cell(Cell::new(0, 0), Direction::Up, 1, dims), None);
        assert_eq!(offset_cell(Cell::new(0, 0), Direction::Left, 1, dims), None);
        assert_eq!(
            offset_cell(Cell::new(1, 1), Direction::Right, 2, dims),
            Some(Cell::new(1, 3))
        );
        assert_eq!(offset_cell(Cell::new(3, 3), Direction::Down, 2, dims), None);
    }

    #[test]
    fn corner_has_two_neighbors() {
        let around: Vec<Cell> = neighbors(Cell::new(0, 0), (3, 3)).collect();
        assert_eq!(around, vec![Cell::new(0, 1), Cell::new(1, 0)]);
    }
}
