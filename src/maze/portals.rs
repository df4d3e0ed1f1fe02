//! Entrance and exit openings carved through the boundary ring.

use crate::math::coordinates::{GridLayout, Side};
use crate::math::rect::Rect;
use crate::maze::grid::{Cell, Grid};
use rand::Rng;

/// Cells an opening spans along its side
pub const OPENING_SPAN: usize = 2;

/// A carved gap in the boundary ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    pub side: Side,
    /// Top-left cell of the opening
    pub anchor: Cell,
    pub width_cells: usize,
    pub height_cells: usize,
}

impl Opening {
    /// Builds the opening for `side` with its anchor `offset` cells along that side.
    pub fn on_side(side: Side, offset: usize, dimensions: (usize, usize)) -> Self {
        let (width, height) = dimensions;
        match side {
            Side::Top => Self::new(side, Cell::new(0, offset), OPENING_SPAN, 1),
            Side::Right => Self::new(side, Cell::new(offset, width - 1), 1, OPENING_SPAN),
            Side::Bottom => Self::new(side, Cell::new(height - 1, offset), OPENING_SPAN, 1),
            Side::Left => Self::new(side, Cell::new(offset, 0), 1, OPENING_SPAN),
        }
    }

    pub fn new(side: Side, anchor: Cell, width_cells: usize, height_cells: usize) -> Self {
        Self {
            side,
            anchor,
            width_cells,
            height_cells,
        }
    }

    /// Every cell the opening covers.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height_cells).flat_map(move |dr| {
            (0..self.width_cells).map(move |dc| Cell::new(self.anchor.row + dr, self.anchor.col + dc))
        })
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.anchor.row..self.anchor.row + self.height_cells).contains(&cell.row)
            && (self.anchor.col..self.anchor.col + self.width_cells).contains(&cell.col)
    }

    /// Interior cell just inside the ring, centred on the opening.
    pub fn connector(&self) -> Cell {
        let Cell { row, col } = self.anchor;
        match self.side {
            Side::Top => Cell::new(row + 1, col + self.width_cells / 2),
            Side::Bottom => Cell::new(row.saturating_sub(1), col + self.width_cells / 2),
            Side::Right => Cell::new(row + self.height_cells / 2, col.saturating_sub(1)),
            Side::Left => Cell::new(row + self.height_cells / 2, col + self.width_cells),
        }
    }

    /// Opening cell in line with the connector.
    pub fn mouth(&self) -> Cell {
        let Cell { row, col } = self.anchor;
        match self.side {
            Side::Top | Side::Bottom => Cell::new(row, col + self.width_cells / 2),
            Side::Left | Side::Right => Cell::new(row + self.height_cells / 2, col),
        }
    }

    /// World rectangle covered by the opening.
    pub fn world_rect(&self, layout: &GridLayout) -> Rect {
        layout.block_rect(self.anchor, self.width_cells, self.height_cells)
    }
}

/// Places an entrance on a random side and the exit on the opposite side.
///
/// Both openings are carved into `grid` and spliced into the interior through their
/// connector cells.
///
/// # Returns
/// `(entrance, exit)`
pub fn place_entrance_exit<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> (Opening, Opening) {
    let entrance_side = Side::from_index(rng.gen_range(0..4));
    let exit_side = entrance_side.opposite();

    let entrance = random_opening(entrance_side, grid.dimensions(), rng);
    let exit = random_opening(exit_side, grid.dimensions(), rng);

    carve_opening(grid, &entrance);
    carve_opening(grid, &exit);

    log::debug!(
        "Entrance on {:?} at {:?}, exit on {:?} at {:?}",
        entrance.side,
        entrance.anchor,
        exit.side,
        exit.anchor
    );

    (entrance, exit)
}

fn random_opening<R: Rng + ?Sized>(side: Side, dimensions: (usize, usize), rng: &mut R) -> Opening {
    let (width, height) = dimensions;
    let length = match side {
        Side::Top | Side::Bottom => width,
        Side::Right | Side::Left => height,
    };
    // Leave the corners alone and keep both cells of the opening on the side.
    let offset = rng.gen_range(1..=length - 1 - OPENING_SPAN);
    Opening::on_side(side, offset, dimensions)
}

/// Opens the opening's cells and its connector cell.
pub fn carve_opening(grid: &mut Grid, opening: &Opening) {
    for cell in opening.cells() {
        grid.open(cell);
    }
    grid.open(opening.connector());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::maze::generator::MazeGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn exit_is_always_opposite() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::filled(9, 7);
            let (entrance, exit) = place_entrance_exit(&mut grid, &mut rng);
            assert_eq!(exit.side.index(), (entrance.side.index() + 2) % 4);
        }
    }

    #[test]
    fn openings_stay_off_the_corners() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::filled(7, 5);
            let (entrance, exit) = place_entrance_exit(&mut grid, &mut rng);
            for cell in entrance.cells().chain(exit.cells()) {
                assert!(grid.is_boundary(cell));
                let corner_row = cell.row == 0 || cell.row == 4;
                let corner_col = cell.col == 0 || cell.col == 6;
                assert!(!(corner_row && corner_col), "corner carved: {cell:?}");
            }
        }
    }

    #[test]
    fn connector_sits_inside_the_ring() {
        let dims = (9, 9);
        let top = Opening::on_side(Side::Top, 3, dims);
        assert_eq!(top.connector(), Cell::new(1, 4));
        let bottom = Opening::on_side(Side::Bottom, 3, dims);
        assert_eq!(bottom.connector(), Cell::new(7, 4));
        let right = Opening::on_side(Side::Right, 2, dims);
        assert_eq!(right.connector(), Cell::new(3, 7));
        let left = Opening::on_side(Side::Left, 2, dims);
        assert_eq!(left.connector(), Cell::new(3, 1));
    }

    #[test]
    fn mouth_lines_up_with_connector() {
        let dims = (9, 9);
        for side in Side::ALL {
            let opening = Opening::on_side(side, 3, dims);
            let mouth = opening.mouth();
            assert!(opening.contains(mouth));
            assert_eq!(mouth.manhattan(&opening.connector()), 1, "{side:?}");
        }
    }

    #[test]
    fn only_openings_break_the_ring() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = MazeGenerator::new(15, 11, Difficulty::Normal)
            .unwrap()
            .generate(&mut rng);
        let (entrance, exit) = place_entrance_exit(&mut grid, &mut rng);

        for (cell, _) in grid.iter().filter(|&(c, _)| grid.is_boundary(c)) {
            let carved = entrance.contains(cell) || exit.contains(cell);
            assert_eq!(grid.is_open(cell), carved, "{cell:?}");
        }
        assert!(grid.is_open(entrance.connector()));
        assert!(grid.is_open(exit.connector()));
    }

    #[test]
    fn world_rect_spans_two_cells() {
        let layout = GridLayout::new(crate::math::vec::Vec2::new(0.0, 0.0), 30.0, 20.0, 9, 9);
        let opening = Opening::on_side(Side::Right, 4, (9, 9));
        assert_eq!(opening.world_rect(&layout), Rect::new(240.0, 80.0, 30.0, 40.0));
    }
}
