//! Maze Chase - maze generation and an A* pursuer for a top-down escape game.
//!
//! The player enters a procedurally generated maze through one side and must leave
//! through the opposite side before the pursuer, released a few seconds later,
//! tracks them down.
//!
//! # Features
//! - **Maze Generation**: Randomized depth-first carve with difficulty-dependent
//!   loops, shortcuts and widened corridors
//! - **Pursuer AI**: Dormant, warning and hunting phases with A* replanning and
//!   smoothed steering
//! - **Collision**: Exclusive-edge box tests shared by walls, exit and catch checks
//! - **Maze Files**: A plain-text `.mz` format with timestamped saves
//!
//! # Architecture
//! - `maze/`: Grid storage, the generator, boundary openings and the [`maze::Maze`] aggregate
//! - `game/`: Pathfinding, the player, the pursuer and the [`game::GameSession`] tick
//! - `math/`: Vectors, rectangles, angles and grid/world coordinate conversions
//! - `config`: Difficulty table and tunable constants, loadable from JSON
//!
//! # Usage
//! ```no_run
//! use maze_chase::config::GameConfig;
//! use maze_chase::game::{GameSession, SessionStatus};
//! use maze_chase::game::player::MoveIntent;
//!
//! let mut rng = rand::thread_rng();
//! let mut session = GameSession::new(GameConfig::default(), &mut rng)?;
//! while session.update(1.0 / 60.0, MoveIntent::IDLE) == SessionStatus::Playing {}
//! # Ok::<(), maze_chase::error::MazeError>(())
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
