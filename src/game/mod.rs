//! Round state: the maze, the player and the pursuer, advanced one tick at a time.
//!
//! A [`GameSession`] owns everything about a single round, so several rounds can
//! run side by side. The host feeds it elapsed time and a [`MoveIntent`] each tick
//! and reads back a [`SessionStatus`].

pub mod pathfinding;
pub mod player;
pub mod pursuer;

use self::player::{MoveIntent, Player};
use self::pursuer::Pursuer;
use crate::config::GameConfig;
use crate::error::Result;
use crate::math::coordinates::Side;
use crate::math::rect::Rect;
use crate::math::vec::Vec2;
use crate::maze::Maze;
use rand::Rng;

/// Outcome of a round so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    /// The player reached the exit
    Escaped,
    /// The pursuer touched the player
    Caught,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    maze: Maze,
    player: Player,
    pursuer: Pursuer,
    /// Area the player may move in: the grid plus a margin for the approach
    arena: Rect,
    status: SessionStatus,
    elapsed: f32,
}

impl GameSession {
    /// Generates a maze from `config` and sets up a new round.
    ///
    /// # Errors
    /// Returns [`MazeError::InvalidDimensions`](crate::error::MazeError::InvalidDimensions)
    /// if the configured grid cannot be generated.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let maze = Maze::from_config(&config, rng)?;
        log::info!("New {} round: {}", config.difficulty, maze.summary());
        Ok(Self::with_maze(config, maze))
    }

    /// Sets up a round on an existing maze, e.g. one loaded from a `.mz` file.
    pub fn with_maze(config: GameConfig, maze: Maze) -> Self {
        let speed = config.active_tuning().speed;
        let player = Player::at_entrance(&maze, &config.player, speed.player_speed);
        let pursuer = Pursuer::new(&maze, config.pursuer.clone(), speed.pursuer_speed);
        let arena = maze.layout.bounds().expanded(config.player.arena_margin);

        Self {
            config,
            maze,
            player,
            pursuer,
            arena,
            status: SessionStatus::Playing,
            elapsed: 0.0,
        }
    }

    /// Advances the round by `dt` seconds.
    ///
    /// The player moves first (walls block it, and the exit cannot be re-entered
    /// from outside), then the exit is checked, then the pursuer moves and the catch
    /// is checked. Once the round is decided further calls change nothing.
    pub fn update(&mut self, dt: f32, intent: MoveIntent) -> SessionStatus {
        if self.status != SessionStatus::Playing {
            return self.status;
        }
        self.elapsed += dt;

        let start = self.player.position();
        let maze = &self.maze;
        let moved = self
            .player
            .step(intent, dt, &self.arena, |rect| maze.collides(rect));

        if self.maze.is_at_exit(&self.player.bounds())
            && heads_back_inside(self.maze.exit.side, moved)
        {
            self.player.set_position(start);
        }

        if self.maze.is_at_exit(&self.player.bounds()) {
            log::info!("Player escaped after {:.2}s", self.elapsed);
            self.status = SessionStatus::Escaped;
            return self.status;
        }

        let target = self.player.bounds();
        self.pursuer.update(dt, &target, &self.maze);
        if self.pursuer.catches(&target) {
            log::info!("Player caught after {:.2}s", self.elapsed);
            self.status = SessionStatus::Caught;
        }

        self.status
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Seconds simulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pursuer(&self) -> &Pursuer {
        &self.pursuer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Whether a move across the exit on `side` points back into the maze.
fn heads_back_inside(side: Side, moved: Vec2) -> bool {
    match side {
        Side::Top => moved.y() > 0.0,
        Side::Right => moved.x() < 0.0,
        Side::Bottom => moved.y() < 0.0,
        Side::Left => moved.x() > 0.0,
    }
}
