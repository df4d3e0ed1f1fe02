//! Maze generation using a randomized depth-first carve.
//!
//! This module builds a perfect maze (a spanning tree over the odd-indexed cells) and
//! then perforates it according to the difficulty: extra wall removals, loop-closing
//! shortcuts and corridor widening. None of the post-processing passes can fail; a
//! pass that runs out of attempts simply leaves the wall in place.
//!
//! # Examples
//!
//! ```rust
//! use maze_chase::config::Difficulty;
//! use maze_chase::maze::generator::MazeGenerator;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut generator = MazeGenerator::new(21, 21, Difficulty::Hard).unwrap();
//! let grid = generator.generate(&mut rng);
//!
//! // A hard maze is the carve alone: the start cell plus one cell per carve step.
//! assert_eq!(grid.open_count(), generator.carve_steps() + 1);
//! ```
use crate::config::{DifficultyTable, Difficulty, GenerationTuning, Shortcuts, WallRemoval};
use crate::error::{MazeError, Result};
use crate::math::coordinates::{Direction, offset_cell};
use crate::maze::grid::{Cell, Grid};
use rand::Rng;
use rand::seq::SliceRandom;

/// Radius of the window used to measure local openness while widening
const WIDEN_WINDOW_RADIUS: usize = 2;

/// One pending step of the depth-first carve
struct CarveFrame {
    cell: Cell,
    directions: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn new<R: Rng + ?Sized>(cell: Cell, rng: &mut R) -> Self {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Maze generator for a fixed size and difficulty
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
    difficulty: Difficulty,
    tuning: GenerationTuning,
    carve_steps: usize,
}

impl MazeGenerator {
    /// Creates a generator using the default tuning for `difficulty`.
    ///
    /// # Errors
    /// Returns [`MazeError::InvalidDimensions`] unless both dimensions are odd and at least 5.
    pub fn new(width: usize, height: usize, difficulty: Difficulty) -> Result<Self> {
        let tuning = DifficultyTable::default().get(difficulty).generation;
        Self::with_tuning(width, height, difficulty, tuning)
    }

    /// Creates a generator with explicit post-processing tuning.
    pub fn with_tuning(
        width: usize,
        height: usize,
        difficulty: Difficulty,
        tuning: GenerationTuning,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            difficulty,
            tuning,
            carve_steps: 0,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of cells opened by the carve in the last [`generate`](Self::generate) call,
    /// not counting the start cell.
    ///
    /// Each tree edge takes two steps: the wall between two passage cells, then the
    /// new passage cell.
    pub fn carve_steps(&self) -> usize {
        self.carve_steps
    }

    /// Generates a new grid.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Grid {
        let mut grid = Grid::filled(self.width, self.height);

        let start = Cell::new(
            1 + 2 * rng.gen_range(0..(self.height - 1) / 2),
            1 + 2 * rng.gen_range(0..(self.width - 1) / 2),
        );
        self.carve(&mut grid, start, rng);

        if let Some(removal) = self.tuning.wall_removal {
            self.remove_walls(&mut grid, removal, rng);
        }
        if let Some(shortcuts) = self.tuning.shortcuts {
            self.add_shortcuts(&mut grid, shortcuts, rng);
        }
        if self.tuning.widen_probability > 0.0 {
            self.widen_corridors(&mut grid, rng);
        }

        log::info!(
            "Generated {}x{} {} maze: {} carve steps, {} open cells",
            self.width,
            self.height,
            self.difficulty,
            self.carve_steps,
            grid.open_count()
        );

        grid
    }

    /// Randomized depth-first carve over the odd sublattice.
    ///
    /// Uses an explicit stack instead of recursion; each frame shuffles its
    /// directions when it is entered, so the random draws happen in the same order
    /// a recursive carve would make them.
    fn carve<R: Rng + ?Sized>(&mut self, grid: &mut Grid, start: Cell, rng: &mut R) {
        self.carve_steps = 0;
        grid.open(start);
        let mut stack = vec![CarveFrame::new(start, rng)];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.directions.len() {
                stack.pop();
                continue;
            }
            let direction = frame.directions[frame.next];
            frame.next += 1;
            let cell = frame.cell;

            let Some(next) = offset_cell(cell, direction, 2, grid.dimensions()) else {
                continue;
            };
            if grid.is_boundary(next) || !grid.is_wall(next) {
                continue;
            }

            if let Some(between) = offset_cell(cell, direction, 1, grid.dimensions()) {
                grid.open(between);
                self.carve_steps += 1;
            }
            grid.open(next);
            self.carve_steps += 1;
            stack.push(CarveFrame::new(next, rng));
        }
    }

    /// Opens extra interior walls whose open-neighbour count is within the tuning range.
    fn remove_walls<R: Rng + ?Sized>(&self, grid: &mut Grid, removal: WallRemoval, rng: &mut R) {
        let to_remove = (self.width as f64 * self.height as f64 * removal.ratio).floor() as usize;

        for _ in 0..to_remove {
            for _ in 0..removal.max_attempts {
                let cell = Cell::new(
                    rng.gen_range(2..self.height - 2),
                    rng.gen_range(2..self.width - 2),
                );
                if !grid.is_wall(cell) {
                    continue;
                }
                let open = grid.open_neighbor_count(cell);
                if (removal.min_open_neighbors..=removal.max_open_neighbors).contains(&open) {
                    grid.open(cell);
                    break;
                }
            }
        }
    }

    /// Opens a few walls that join two existing passages, closing a loop.
    fn add_shortcuts<R: Rng + ?Sized>(&self, grid: &mut Grid, shortcuts: Shortcuts, rng: &mut R) {
        // Candidates keep a three-cell margin from the edge.
        if self.width < 7 || self.height < 7 {
            return;
        }
        let count = rng.gen_range(shortcuts.min_count..=shortcuts.max_count.max(shortcuts.min_count));

        for _ in 0..count {
            for _ in 0..shortcuts.max_attempts {
                let cell = Cell::new(
                    rng.gen_range(3..self.height - 3),
                    rng.gen_range(3..self.width - 3),
                );
                if grid.is_wall(cell) && closes_loop(grid, cell) {
                    grid.open(cell);
                    break;
                }
            }
        }
    }

    /// Thickens cramped single-width corridors.
    fn widen_corridors<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let probability = self.tuning.widen_probability.clamp(0.0, 1.0);

        for row in 2..self.height - 2 {
            for col in 2..self.width - 2 {
                let cell = Cell::new(row, col);
                if !grid.is_open(cell) || !rng.gen_bool(probability) {
                    continue;
                }
                if grid.open_count_around(cell, WIDEN_WINDOW_RADIUS)
                    >= self.tuning.widen_density_limit
                {
                    continue;
                }

                let (ahead, behind) = if rng.gen_bool(0.5) {
                    (Cell::new(row, col + 1), Cell::new(row, col - 1))
                } else {
                    (Cell::new(row + 1, col), Cell::new(row - 1, col))
                };
                if grid.is_wall(ahead) && grid.is_open(behind) {
                    grid.open(ahead);
                }
            }
        }
    }
}

/// Checks the dimension contract shared by every maze constructor.
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width < 5 || height < 5 || width % 2 == 0 || height % 2 == 0 {
        return Err(MazeError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// A wall closes a loop when it separates exactly two open passages.
fn closes_loop(grid: &Grid, cell: Cell) -> bool {
    grid.open_neighbor_count(cell) == 2
}
