//! Coordinate system transformations between grid cells and world space.
//!
//! This module provides functions to convert between maze grid coordinates and
//! world coordinates, making it clear how to map between these systems.

use super::constants::BORDER_OFFSET;
use crate::maze::grid::Cell;
use crate::math::rect::Rect;
use crate::math::vec::Vec2;

/// Placement of the maze grid in world space.
///
/// # Coordinate System
/// - `origin` is the world position of the top-left corner of cell (0, 0)
/// - X increases to the right (columns)
/// - Y increases downwards (rows)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: Vec2,
    pub cell_width: f32,
    pub cell_height: f32,
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn new(origin: Vec2, cell_width: f32, cell_height: f32, columns: usize, rows: usize) -> Self {
        Self {
            origin,
            cell_width,
            cell_height,
            columns,
            rows,
        }
    }

    /// Fits a `columns` × `rows` grid into a canvas.
    ///
    /// Cells get whole-unit sizes, and the grid is centred inside the canvas
    /// minus a [`BORDER_OFFSET`] frame on every side.
    pub fn fit(columns: usize, rows: usize, canvas_width: f32, canvas_height: f32) -> Self {
        let area_width = canvas_width - BORDER_OFFSET * 2.0;
        let area_height = canvas_height - BORDER_OFFSET * 2.0;

        let cell_width = (area_width / columns as f32).floor().max(1.0);
        let cell_height = (area_height / rows as f32).floor().max(1.0);

        let total_width = columns as f32 * cell_width;
        let total_height = rows as f32 * cell_height;

        let origin = Vec2::new(
            BORDER_OFFSET + ((area_width - total_width) / 2.0).floor(),
            BORDER_OFFSET + ((area_height - total_height) / 2.0).floor(),
        );

        Self::new(origin, cell_width, cell_height, columns, rows)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Converts world coordinates to a grid cell.
    ///
    /// Positions outside the grid saturate to the nearest edge cell, so callers
    /// always get a usable cell.
    pub fn world_to_cell(&self, position: Vec2) -> Cell {
        let col = ((position.x() - self.origin.x()) / self.cell_width).floor();
        let row = ((position.y() - self.origin.y()) / self.cell_height).floor();

        // `as usize` saturates negatives (and NaN) to 0
        let col = (col as usize).min(self.columns.saturating_sub(1));
        let row = (row as usize).min(self.rows.saturating_sub(1));

        Cell::new(row, col)
    }

    /// Like [`world_to_cell`](Self::world_to_cell) but returns `None` outside the grid.
    pub fn world_to_cell_checked(&self, position: Vec2) -> Option<Cell> {
        let col = ((position.x() - self.origin.x()) / self.cell_width).floor();
        let row = ((position.y() - self.origin.y()) / self.cell_height).floor();
        if col < 0.0 || row < 0.0 || col >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }

    /// World position of the top-left corner of a cell.
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            self.origin.x() + cell.col as f32 * self.cell_width,
            self.origin.y() + cell.row as f32 * self.cell_height,
        )
    }

    /// World position of the centre of a cell.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.cell_origin(cell) + Vec2::new(self.cell_width / 2.0, self.cell_height / 2.0)
    }

    /// World rectangle covered by a cell.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::from_position(
            self.cell_origin(cell),
            Vec2::new(self.cell_width, self.cell_height),
        )
    }

    /// World rectangle covered by a block of cells anchored at `cell`.
    pub fn block_rect(&self, cell: Cell, width_cells: usize, height_cells: usize) -> Rect {
        Rect::from_position(
            self.cell_origin(cell),
            Vec2::new(
                width_cells as f32 * self.cell_width,
                height_cells as f32 * self.cell_height,
            ),
        )
    }

    /// World rectangle covered by the whole grid.
    pub fn bounds(&self) -> Rect {
        self.block_rect(Cell::new(0, 0), self.columns, self.rows)
    }
}
