//! Maze generation, storage and the text maze format.
//!
//! [`Maze`] bundles a generated [`Grid`] with its world [`GridLayout`] and the two
//! boundary openings. It answers the geometric questions the host asks every
//! frame (wall collision, exit detection) using the same exclusive-edge
//! [`Rect::overlaps`] test the pursuer uses for its catch check.

pub mod generator;
pub mod grid;
pub mod portals;

use self::generator::{MazeGenerator, validate_dimensions};
use self::grid::{Cell, CellKind, Grid};
use self::portals::{Opening, place_entrance_exit};
use crate::config::{Difficulty, GameConfig, GenerationTuning};
use crate::error::{MazeError, Result};
use crate::math::coordinates::{GridLayout, Side};
use crate::math::rect::Rect;
use crate::math::vec::Vec2;
use chrono::Local;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// A generated level: grid contents, world placement and boundary openings.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    pub grid: Grid,
    pub layout: GridLayout,
    pub entrance: Opening,
    pub exit: Opening,
}

impl Maze {
    /// Generates a maze for the configured size and difficulty.
    ///
    /// # Errors
    /// Returns [`MazeError::InvalidDimensions`] for even or too-small grids.
    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        let layout = GridLayout::fit(
            config.columns,
            config.rows,
            config.canvas_width,
            config.canvas_height,
        );
        Self::generate(layout, config.difficulty, config.active_tuning().generation, rng)
    }

    /// Generates a maze laid out with `layout`.
    pub fn generate<R: Rng + ?Sized>(
        layout: GridLayout,
        difficulty: Difficulty,
        tuning: GenerationTuning,
        rng: &mut R,
    ) -> Result<Self> {
        let mut generator =
            MazeGenerator::with_tuning(layout.columns, layout.rows, difficulty, tuning)?;
        let mut grid = generator.generate(rng);
        let (entrance, exit) = place_entrance_exit(&mut grid, rng);

        Ok(Self {
            grid,
            layout,
            entrance,
            exit,
        })
    }

    pub fn entrance_rect(&self) -> Rect {
        self.entrance.world_rect(&self.layout)
    }

    pub fn exit_rect(&self) -> Rect {
        self.exit.world_rect(&self.layout)
    }

    /// Top-left position for a player box waiting `offset` units outside the entrance.
    pub fn player_start_position(&self, player_size: Vec2, offset: f32) -> Vec2 {
        let rect = self.entrance_rect();
        let centered_x = rect.x + rect.width / 2.0 - player_size.x() / 2.0;
        let centered_y = rect.y + rect.height / 2.0 - player_size.y() / 2.0;

        match self.entrance.side {
            Side::Top => Vec2::new(centered_x, rect.y - offset),
            Side::Right => Vec2::new(rect.x + offset, centered_y),
            Side::Bottom => Vec2::new(centered_x, rect.y + offset),
            Side::Left => Vec2::new(rect.x - offset, centered_y),
        }
    }

    /// Whether a world point lies inside a wall cell. Points outside the grid are free.
    pub fn is_wall_at(&self, point: Vec2) -> bool {
        self.layout
            .world_to_cell_checked(point)
            .is_some_and(|cell| self.grid.is_wall(cell))
    }

    /// Whether a box overlaps any wall cell.
    pub fn collides(&self, rect: &Rect) -> bool {
        let layout = &self.layout;
        let to_index = |value: f32, origin: f32, size: f32| ((value - origin) / size).floor() as i64;

        let col_start = to_index(rect.x, layout.origin.x(), layout.cell_width).max(0);
        let col_end = to_index(rect.right(), layout.origin.x(), layout.cell_width)
            .min(layout.columns as i64 - 1);
        let row_start = to_index(rect.y, layout.origin.y(), layout.cell_height).max(0);
        let row_end = to_index(rect.bottom(), layout.origin.y(), layout.cell_height)
            .min(layout.rows as i64 - 1);

        (row_start..=row_end).any(|row| {
            (col_start..=col_end).any(|col| {
                let cell = Cell::new(row as usize, col as usize);
                self.grid.is_wall(cell) && layout.cell_rect(cell).overlaps(rect)
            })
        })
    }

    /// Whether a box overlaps the exit opening.
    pub fn is_at_exit(&self, rect: &Rect) -> bool {
        self.exit_rect().overlaps(rect)
    }

    /// Renders the maze in the text format.
    ///
    /// # File Format
    /// One line per row:
    /// - `#` for a wall cell
    /// - ` `(space) for an open cell
    /// - `I` for an entrance cell, `O` for an exit cell
    ///
    /// # Example Output
    /// ```text
    /// #II####
    /// #   # #
    /// # # # #
    /// # #   #
    /// ####OO#
    /// ```
    pub fn to_mz_string(&self) -> String {
        let mut out = String::with_capacity((self.grid.width() + 1) * self.grid.height());
        for (cell, kind) in self.grid.iter() {
            let symbol = if self.entrance.contains(cell) {
                'I'
            } else if self.exit.contains(cell) {
                'O'
            } else if kind == CellKind::Wall {
                '#'
            } else {
                ' '
            };
            out.push(symbol);
            if cell.col + 1 == self.grid.width() {
                out.push('\n');
            }
        }
        out
    }

    /// Parses the text format produced by [`to_mz_string`](Self::to_mz_string).
    ///
    /// # Errors
    /// Returns [`MazeError::InvalidMazeData`] for ragged rows, unknown symbols, or
    /// missing/misplaced openings, and [`MazeError::InvalidDimensions`] for bad sizes.
    pub fn parse_mz(text: &str, layout_for: impl FnOnce(usize, usize) -> GridLayout) -> Result<Self> {
        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        let height = lines.len();
        let width = lines.first().map_or(0, |line| line.chars().count());
        validate_dimensions(width, height)?;

        let mut grid = Grid::filled(width, height);
        let mut entrance_cells = Vec::new();
        let mut exit_cells = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(invalid(format!(
                    "row {row} has {} cells, expected {width}",
                    line.chars().count()
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::new(row, col);
                match symbol {
                    '#' => {}
                    ' ' | '.' => grid.open(cell),
                    'I' => {
                        grid.open(cell);
                        entrance_cells.push(cell);
                    }
                    'O' => {
                        grid.open(cell);
                        exit_cells.push(cell);
                    }
                    other => {
                        return Err(invalid(format!("unknown symbol '{other}' at {row},{col}")));
                    }
                }
            }
        }

        let entrance = opening_from_cells(&grid, &entrance_cells, "entrance")?;
        let exit = opening_from_cells(&grid, &exit_cells, "exit")?;
        let layout = layout_for(width, height);

        Ok(Self {
            grid,
            layout,
            entrance,
            exit,
        })
    }

    /// Saves the maze to a timestamped `.mz` file in `dir`.
    ///
    /// # File Naming
    /// `Maze_MM-DD-YY_HH-MM-SSPM.mz` (e.g. `Maze_06-24-25_11-24-03PM.mz`).
    ///
    /// # Errors
    /// Returns [`MazeError::Io`] if the directory or file cannot be written.
    pub fn save_to_file(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let timestamp = Local::now().format("Maze_%m-%d-%y_%I-%M-%S%p.mz").to_string();
        let output_path = dir.join(timestamp);

        fs::create_dir_all(dir)?;
        fs::write(&output_path, self.to_mz_string())?;

        log::info!("Maze saved to: {}", output_path.display());
        Ok(output_path)
    }

    /// One-line description used in logs.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} maze, {:.1}% open, entrance {:?}, exit {:?}",
            self.grid.width(),
            self.grid.height(),
            self.grid.open_fraction() * 100.0,
            self.entrance.side,
            self.exit.side
        )
    }
}

fn invalid(reason: String) -> MazeError {
    MazeError::InvalidMazeData { reason }
}

/// Rebuilds an opening from the boundary cells marked for it.
fn opening_from_cells(grid: &Grid, cells: &[Cell], name: &str) -> Result<Opening> {
    let Some(&first) = cells.iter().min() else {
        return Err(invalid(format!("no {name} cells marked")));
    };
    if let Some(stray) = cells.iter().find(|&&cell| !grid.is_boundary(cell)) {
        return Err(invalid(format!("{name} cell {stray:?} is not on the boundary")));
    }

    let side = if first.row == 0 {
        Side::Top
    } else if first.row + 1 == grid.height() {
        Side::Bottom
    } else if first.col == 0 {
        Side::Left
    } else {
        Side::Right
    };

    let max_row = cells.iter().map(|c| c.row).max().unwrap_or(first.row);
    let max_col = cells.iter().map(|c| c.col).max().unwrap_or(first.col);
    let opening = Opening::new(side, first, max_col - first.col + 1, max_row - first.row + 1);

    if opening.cells().count() != cells.len() {
        return Err(invalid(format!("{name} cells do not form a rectangle")));
    }
    Ok(opening)
}
