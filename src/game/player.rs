//! Player box movement and the route-following autopilot.
//!
//! The player is an axis-aligned box steered by a [`MoveIntent`]. Movement is
//! resolved one axis at a time so a box pressed diagonally into a wall slides
//! along it instead of stopping dead.

use crate::config::PlayerConfig;
use crate::game::pathfinding::find_path;
use crate::math::rect::Rect;
use crate::math::vec::Vec2;
use crate::maze::Maze;

/// Directional input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const IDLE: MoveIntent = MoveIntent {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Unit direction for the held keys, or zero when idle or cancelled out.
    pub fn direction(&self) -> Vec2 {
        let axis = |negative: bool, positive: bool| positive as i8 as f32 - negative as i8 as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize()
    }

    pub fn is_idle(&self) -> bool {
        self.direction() == Vec2::ZERO
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the player's box
    position: Vec2,
    size: Vec2,
    /// World units per second
    speed: f32,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            position,
            size,
            speed,
        }
    }

    /// Places a player `spawn_offset` units outside the maze entrance.
    pub fn at_entrance(maze: &Maze, config: &PlayerConfig, speed: f32) -> Self {
        let size = Vec2::new(config.width, config.height);
        Self::new(maze.player_start_position(size, config.spawn_offset), size, speed)
    }

    /// Moves the box for one tick, axis by axis.
    ///
    /// Each axis step is undone if `blocked` reports the moved box as colliding, and
    /// the result is clamped so the box stays inside `arena`.
    ///
    /// # Returns
    /// The displacement actually applied
    pub fn step(
        &mut self,
        intent: MoveIntent,
        dt: f32,
        arena: &Rect,
        blocked: impl Fn(&Rect) -> bool,
    ) -> Vec2 {
        let start = self.position;
        let motion = intent.direction() * (self.speed * dt);

        for axis_motion in [Vec2::new(motion.x(), 0.0), Vec2::new(0.0, motion.y())] {
            if axis_motion == Vec2::ZERO {
                continue;
            }
            let before = self.position;
            self.position += axis_motion;
            self.clamp_to(arena);
            if blocked(&self.bounds()) {
                self.position = before;
            }
        }

        self.position - start
    }

    fn clamp_to(&mut self, arena: &Rect) {
        let max_x = (arena.right() - self.size.x()).max(arena.x);
        let max_y = (arena.bottom() - self.size.y()).max(arena.y);
        self.position = Vec2::new(
            self.position.x().clamp(arena.x, max_x),
            self.position.y().clamp(arena.y, max_y),
        );
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_position(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// Steers a player through the maze along a precomputed A* route.
///
/// The route runs from the entrance mouth through every cell of the shortest
/// connector-to-connector path and finishes at the exit mouth. Steering is one
/// axis at a time with a small deadzone, so the box stays centred in corridors.
#[derive(Debug, Clone)]
pub struct Autopilot {
    waypoints: Vec<Vec2>,
    next: usize,
    deadzone: f32,
}

impl Autopilot {
    const DEFAULT_DEADZONE: f32 = 1.0;

    /// Plans a route through `maze`. Returns `None` if the exit is unreachable.
    pub fn plan(maze: &Maze) -> Option<Self> {
        let cells = find_path(&maze.grid, maze.entrance.connector(), maze.exit.connector());
        if cells.is_empty() {
            log::warn!("Autopilot found no route from entrance to exit");
            return None;
        }

        let mut waypoints = Vec::with_capacity(cells.len() + 2);
        waypoints.push(maze.layout.cell_center(maze.entrance.mouth()));
        waypoints.extend(cells.into_iter().map(|cell| maze.layout.cell_center(cell)));
        waypoints.push(maze.layout.cell_center(maze.exit.mouth()));

        log::debug!("Autopilot route has {} waypoints", waypoints.len());
        Some(Self {
            waypoints,
            next: 0,
            deadzone: Self::DEFAULT_DEADZONE,
        })
    }

    /// Intent that moves a box centred at `center` toward the next waypoint.
    pub fn steer(&mut self, center: Vec2) -> MoveIntent {
        while let Some(&waypoint) = self.waypoints.get(self.next) {
            let delta = waypoint - center;
            if delta.x().abs() <= self.deadzone && delta.y().abs() <= self.deadzone {
                self.next += 1;
                continue;
            }
            return MoveIntent {
                up: delta.y() < -self.deadzone,
                down: delta.y() > self.deadzone,
                left: delta.x() < -self.deadzone,
                right: delta.x() > self.deadzone,
            };
        }
        MoveIntent::IDLE
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.waypoints.len()
    }
}
