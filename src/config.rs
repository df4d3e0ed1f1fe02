//! Tunable parameters for generation, pursuit and player movement.
//!
//! Every numeric knob the game uses lives here rather than in the algorithms, so a
//! host can rebalance difficulty by loading a JSON file. Missing fields fall back to
//! the defaults below.

use crate::error::{MazeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Difficulty tag supplied once at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(MazeError::InvalidMazeData {
                reason: format!("unknown difficulty '{other}'"),
            }),
        }
    }
}

/// Extra-wall-removal pass settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRemoval {
    /// Fraction of `width * height` to remove
    pub ratio: f64,
    /// Random candidates tried per removal before giving up on it
    pub max_attempts: usize,
    /// Inclusive range of open orthogonal neighbours a candidate must have
    pub min_open_neighbors: usize,
    pub max_open_neighbors: usize,
}

/// Loop-closing shortcut pass settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shortcuts {
    pub min_count: usize,
    pub max_count: usize,
    pub max_attempts: usize,
}

/// Post-processing applied on top of the spanning-tree carve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationTuning {
    pub wall_removal: Option<WallRemoval>,
    pub shortcuts: Option<Shortcuts>,
    /// Per-open-cell probability of a widening trial (0 disables widening)
    pub widen_probability: f64,
    /// Widening only happens while the 5×5 open count is below this
    pub widen_density_limit: usize,
}

/// Movement speeds in world units per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTuning {
    pub player_speed: f32,
    pub pursuer_speed: f32,
}

/// Everything that changes with the difficulty tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    pub generation: GenerationTuning,
    pub speed: SpeedTuning,
}

/// Per-difficulty parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: DifficultyTuning,
    pub normal: DifficultyTuning,
    pub hard: DifficultyTuning,
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyTuning {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyTuning {
                generation: GenerationTuning {
                    wall_removal: Some(WallRemoval {
                        ratio: 0.06,
                        max_attempts: 40,
                        min_open_neighbors: 2,
                        max_open_neighbors: 3,
                    }),
                    shortcuts: None,
                    widen_probability: 0.06,
                    widen_density_limit: 6,
                },
                speed: SpeedTuning {
                    player_speed: 100.0,
                    pursuer_speed: 80.0,
                },
            },
            normal: DifficultyTuning {
                generation: GenerationTuning {
                    wall_removal: Some(WallRemoval {
                        ratio: 0.03,
                        max_attempts: 30,
                        min_open_neighbors: 2,
                        max_open_neighbors: 2,
                    }),
                    shortcuts: Some(Shortcuts {
                        min_count: 2,
                        max_count: 4,
                        max_attempts: 20,
                    }),
                    widen_probability: 0.02,
                    widen_density_limit: 6,
                },
                speed: SpeedTuning {
                    player_speed: 100.0,
                    pursuer_speed: 80.0,
                },
            },
            hard: DifficultyTuning {
                generation: GenerationTuning {
                    wall_removal: None,
                    shortcuts: None,
                    widen_probability: 0.0,
                    widen_density_limit: 6,
                },
                speed: SpeedTuning {
                    player_speed: 90.9,
                    pursuer_speed: 80.0,
                },
            },
        }
    }
}

/// Pursuer ("arrow") behaviour. Times are in seconds, distances in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuerConfig {
    pub width: f32,
    pub height: f32,
    /// Distance at which a waypoint counts as reached
    pub arrival_tolerance: f32,
    /// Proportional heading gain, per second
    pub rotation_gain: f32,
    /// Residual heading error below which the heading snaps to target
    pub rotation_epsilon: f32,
    pub activation_delay: f32,
    pub warning_duration: f32,
    /// Distance outside the entrance where the pursuer waits while dormant
    pub spawn_offset: f32,
    /// Distance inside the entrance opening of the first waypoint
    pub entry_inset: f32,
    pub trail_length: usize,
    pub trail_age_step: f32,
    pub trail_max_age: f32,
}

impl Default for PursuerConfig {
    fn default() -> Self {
        Self {
            width: 22.0,
            height: 0.5,
            arrival_tolerance: 5.0,
            rotation_gain: 10.0,
            rotation_epsilon: 0.01,
            activation_delay: 5.0,
            warning_duration: 2.5,
            spawn_offset: 50.0,
            entry_inset: 10.0,
            trail_length: 12,
            trail_age_step: 0.08,
            trail_max_age: 1.0,
        }
    }
}

/// Player box and arena settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Distance outside the entrance where the player starts
    pub spawn_offset: f32,
    /// How far beyond the grid the player may wander
    pub arena_margin: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 18.0,
            height: 18.0,
            spawn_offset: 40.0,
            arena_margin: 60.0,
        }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: usize,
    pub rows: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub difficulty: Difficulty,
    pub pursuer: PursuerConfig,
    pub player: PlayerConfig,
    pub tuning: DifficultyTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 31,
            rows: 19,
            canvas_width: 960.0,
            canvas_height: 600.0,
            difficulty: Difficulty::Normal,
            pursuer: PursuerConfig::default(),
            player: PlayerConfig::default(),
            tuning: DifficultyTable::default(),
        }
    }
}

impl GameConfig {
    /// Parses a configuration from JSON. Missing fields take default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Tuning for the configured difficulty.
    pub fn active_tuning(&self) -> &DifficultyTuning {
        self.tuning.get(self.difficulty)
    }
}
