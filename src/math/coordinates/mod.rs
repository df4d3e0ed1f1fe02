//! Coordinate system transformations for the maze.
//!
//! This module provides utilities to convert between the coordinate systems used in the game:
//! - Maze Grid Coordinates: Used for maze generation and pathfinding (rows/columns)
//! - World Coordinates: 2D space where the player and the pursuer move (x, y)
//!
//! It also holds the boundary [`Side`] and grid [`Direction`] helpers shared by
//! the generator, the portals and the pathfinder.

mod positions;
mod transformations;

pub use positions::*;
pub use transformations::*;

/// Constants for the default world layout
pub mod constants {
    /// Gap between the canvas edge and the maze area, in world units
    pub const BORDER_OFFSET: f32 = 10.0;
}
