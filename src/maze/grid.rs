//! Grid storage for the maze.

use crate::math::coordinates::neighbors;

/// Represents a cell in the maze grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index of the cell
    pub row: usize,
    /// Column index of the cell
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Open,
}

/// Rectangular grid of wall/open cells stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates a grid with every cell set to [`CellKind::Wall`]
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Wall; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` in cells
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Returns the cell contents, or `None` outside the grid
    pub fn get(&self, cell: Cell) -> Option<CellKind> {
        self.contains(cell)
            .then(|| self.cells[cell.row * self.width + cell.col])
    }

    pub fn set(&mut self, cell: Cell, kind: CellKind) {
        if self.contains(cell) {
            self.cells[cell.row * self.width + cell.col] = kind;
        }
    }

    pub fn open(&mut self, cell: Cell) {
        self.set(cell, CellKind::Open);
    }

    /// True only for in-bounds open cells
    pub fn is_open(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellKind::Open)
    }

    /// True only for in-bounds wall cells
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellKind::Wall)
    }

    /// True for cells on the outer ring
    pub fn is_boundary(&self, cell: Cell) -> bool {
        cell.row == 0 || cell.col == 0 || cell.row + 1 == self.height || cell.col + 1 == self.width
    }

    /// Number of open orthogonal neighbours of a cell
    pub fn open_neighbor_count(&self, cell: Cell) -> usize {
        neighbors(cell, self.dimensions())
            .filter(|&n| self.is_open(n))
            .count()
    }

    /// Number of open cells in the square window of the given radius around a cell
    pub fn open_count_around(&self, center: Cell, radius: usize) -> usize {
        let row_start = center.row.saturating_sub(radius);
        let col_start = center.col.saturating_sub(radius);
        let row_end = (center.row + radius).min(self.height.saturating_sub(1));
        let col_end = (center.col + radius).min(self.width.saturating_sub(1));

        (row_start..=row_end)
            .flat_map(|row| (col_start..=col_end).map(move |col| Cell::new(row, col)))
            .filter(|&cell| self.is_open(cell))
            .count()
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellKind::Open).count()
    }

    /// Fraction of cells that are open
    pub fn open_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.open_count() as f64 / self.cells.len() as f64
    }

    /// Iterates every cell coordinate with its contents
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &kind)| (Cell::new(i / self.width, i % self.width), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_grid_is_all_wall() {
        let grid = Grid::filled(5, 7);
        assert_eq!(grid.dimensions(), (5, 7));
        assert_eq!(grid.open_count(), 0);
        assert!(grid.is_wall(Cell::new(6, 4)));
        assert_eq!(grid.get(Cell::new(7, 0)), None);
    }

    #[test]
    fn neighbor_and_window_counts() {
        let mut grid = Grid::filled(5, 5);
        grid.open(Cell::new(1, 2));
        grid.open(Cell::new(2, 1));
        grid.open(Cell::new(2, 3));
        assert_eq!(grid.open_neighbor_count(Cell::new(2, 2)), 3);
        assert_eq!(grid.open_count_around(Cell::new(2, 2), 2), 3);
        assert_eq!(grid.open_count_around(Cell::new(0, 0), 1), 0);
    }

    #[test]
    fn boundary_detection() {
        let grid = Grid::filled(5, 5);
        assert!(grid.is_boundary(Cell::new(0, 2)));
        assert!(grid.is_boundary(Cell::new(2, 4)));
        assert!(!grid.is_boundary(Cell::new(2, 2)));
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut grid = Grid::filled(5, 5);
        grid.open(Cell::new(9, 9));
        assert_eq!(grid.open_count(), 0);
    }
}
