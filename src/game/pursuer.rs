//! The pursuer ("arrow"): a dormant hunter that enters the maze and chases the
//! player along repeatedly replanned A* routes.
//!
//! # Lifecycle
//!
//! - **Dormant**: waits outside the entrance until the activation delay elapses.
//! - **Warning**: on activation its path is a single entry point just inside the
//!   entrance, and the warning flag is raised for a fixed duration.
//! - **Hunting**: once the entry point is reached, every tick maps the target to a
//!   grid cell and replans when that cell changes.
//!
//! There is no terminal state; the session decides when the round ends.

use crate::config::PursuerConfig;
use crate::game::pathfinding::find_path;
use crate::math::coordinates::Side;
use crate::math::rect::Rect;
use crate::math::vec::Vec2;
use crate::math::wrap_angle;
use crate::maze::Maze;
use crate::maze::grid::Cell;
use std::collections::VecDeque;
use std::f32::consts::PI;

/// A tail position left behind while moving, aged every tick.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TrailSample {
    pub position: Vec2,
    pub age: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuerPhase {
    Dormant,
    Warning,
    Hunting,
}

#[derive(Debug, Clone)]
pub struct Pursuer {
    /// Top-left corner of the pursuer's box
    position: Vec2,
    size: Vec2,
    heading: f32,
    target_heading: f32,
    speed: f32,
    path: Vec<Vec2>,
    path_index: usize,
    active: bool,
    has_entered_maze: bool,
    is_moving: bool,
    elapsed: f32,
    warning_visible: bool,
    warning_elapsed: f32,
    last_target_cell: Option<Cell>,
    trail: VecDeque<TrailSample>,
    entry_point: Vec2,
    config: PursuerConfig,
}

impl Pursuer {
    /// Creates a dormant pursuer posed outside the maze entrance.
    pub fn new(maze: &Maze, config: PursuerConfig, speed: f32) -> Self {
        let size = Vec2::new(config.width, config.height);
        let entrance = maze.entrance_rect();
        let side = maze.entrance.side;
        let position = spawn_position(&entrance, side, size, config.spawn_offset);
        let entry_point = entry_point(&entrance, side, config.entry_inset);
        let heading = side.inward_heading();

        Self {
            position,
            size,
            heading,
            target_heading: heading,
            speed,
            path: Vec::new(),
            path_index: 0,
            active: false,
            has_entered_maze: false,
            is_moving: false,
            elapsed: 0.0,
            warning_visible: false,
            warning_elapsed: 0.0,
            last_target_cell: None,
            trail: VecDeque::with_capacity(config.trail_length + 1),
            entry_point,
            config,
        }
    }

    /// Advances the pursuer by `dt` seconds toward the target box.
    pub fn update(&mut self, dt: f32, target: &Rect, maze: &Maze) {
        self.elapsed += dt;

        let just_activated = !self.active && self.elapsed >= self.config.activation_delay;
        if just_activated {
            self.activate();
        }
        if !self.active {
            return;
        }

        if self.warning_visible && !just_activated {
            self.warning_elapsed += dt;
            if self.warning_elapsed > self.config.warning_duration {
                self.warning_visible = false;
            }
        }

        if self.has_entered_maze {
            self.track_target(target.center(), maze);
        }

        self.move_along_path(dt);
        self.update_heading(dt);
        self.update_trail();
    }

    fn activate(&mut self) {
        self.active = true;
        self.warning_visible = true;
        self.warning_elapsed = 0.0;
        self.path = vec![self.entry_point];
        self.path_index = 0;
        log::info!(
            "Pursuer activated after {:.2}s, heading for entry point ({:.1}, {:.1})",
            self.elapsed,
            self.entry_point.x(),
            self.entry_point.y()
        );
    }

    /// Replans when the target has moved into a different grid cell.
    ///
    /// # Returns
    /// `true` if a replan was attempted this call
    pub fn track_target(&mut self, target_center: Vec2, maze: &Maze) -> bool {
        let target_cell = maze.layout.world_to_cell(target_center);
        if self.last_target_cell == Some(target_cell) {
            return false;
        }
        self.last_target_cell = Some(target_cell);
        self.replan(target_cell, maze);
        true
    }

    /// Replaces the path with a fresh route to `target_cell`.
    ///
    /// An unreachable target keeps the previous path.
    fn replan(&mut self, target_cell: Cell, maze: &Maze) {
        let current_cell = maze.layout.world_to_cell(self.center());
        let cells = find_path(&maze.grid, current_cell, target_cell);

        if cells.is_empty() {
            log::warn!(
                "No route from {:?} to {:?}; keeping previous path",
                current_cell,
                target_cell
            );
            return;
        }

        log::debug!(
            "Replanned {:?} -> {:?}: {} waypoints",
            current_cell,
            target_cell,
            cells.len()
        );
        self.path = cells
            .into_iter()
            .map(|cell| maze.layout.cell_center(cell))
            .collect();
        self.path_index = 0;
    }

    fn move_along_path(&mut self, dt: f32) {
        let Some(&waypoint) = self.path.get(self.path_index) else {
            self.is_moving = false;
            return;
        };

        let delta = waypoint - self.center();
        let distance = delta.length();

        if distance < self.config.arrival_tolerance {
            self.path_index += 1;
            self.is_moving = false;
            if !self.has_entered_maze && self.path_index == 1 {
                self.has_entered_maze = true;
                log::info!("Pursuer entered the maze, hunting begins");
            }
            return;
        }

        self.is_moving = true;
        let direction = delta * (1.0 / distance);
        self.target_heading = direction.angle();
        self.position += direction * (self.speed * dt);
    }

    /// Eases the heading toward the target heading with a proportional step.
    pub fn update_heading(&mut self, dt: f32) {
        let difference = wrap_angle(self.target_heading - self.heading);

        if difference.abs() > self.config.rotation_epsilon {
            self.heading += difference * self.config.rotation_gain * dt;
        } else {
            self.heading = self.target_heading;
        }
    }

    fn update_trail(&mut self) {
        if self.is_moving {
            let tail = self.center() + Vec2::from_angle(self.heading + PI) * (self.size.x() / 2.0);
            self.trail.push_front(TrailSample {
                position: tail,
                age: 0.0,
            });
            self.trail.truncate(self.config.trail_length);
        }

        for sample in self.trail.iter_mut() {
            sample.age += self.config.trail_age_step;
        }
        let max_age = self.config.trail_max_age;
        self.trail.retain(|sample| sample.age < max_age);
    }

    /// Whether the pursuer's box overlaps the target box. Always false while dormant.
    pub fn catches(&self, target: &Rect) -> bool {
        self.active && self.bounds().overlaps(target)
    }

    pub fn phase(&self) -> PursuerPhase {
        if !self.active {
            PursuerPhase::Dormant
        } else if self.has_entered_maze {
            PursuerPhase::Hunting
        } else {
            PursuerPhase::Warning
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_position(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn target_heading(&self) -> f32 {
        self.target_heading
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn has_entered_maze(&self) -> bool {
        self.has_entered_maze
    }

    pub fn warning_visible(&self) -> bool {
        self.warning_visible
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    /// Trail samples, newest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = &TrailSample> {
        self.trail.iter()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// Dormant pose: `offset` units outside the entrance, centred on it.
fn spawn_position(entrance: &Rect, side: Side, size: Vec2, offset: f32) -> Vec2 {
    let centered_x = entrance.x + entrance.width / 2.0 - size.x() / 2.0;
    let centered_y = entrance.y + entrance.height / 2.0 - size.y() / 2.0;

    match side {
        Side::Top => Vec2::new(centered_x, entrance.y - offset),
        Side::Right => Vec2::new(entrance.right() + offset, centered_y),
        Side::Bottom => Vec2::new(centered_x, entrance.bottom() + offset),
        Side::Left => Vec2::new(entrance.x - offset, centered_y),
    }
}

/// First waypoint: `inset` units in from the outer edge of the entrance opening.
fn entry_point(entrance: &Rect, side: Side, inset: f32) -> Vec2 {
    let mid_x = entrance.x + entrance.width / 2.0;
    let mid_y = entrance.y + entrance.height / 2.0;

    match side {
        Side::Top => Vec2::new(mid_x, entrance.y + inset),
        Side::Right => Vec2::new(entrance.right() - inset, mid_y),
        Side::Bottom => Vec2::new(mid_x, entrance.bottom() - inset),
        Side::Left => Vec2::new(entrance.x + inset, mid_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::math::coordinates::GridLayout;
    use crate::maze::grid::Grid;
    use crate::maze::portals::Opening;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    fn generated_maze(seed: u64) -> Maze {
        let layout = GridLayout::fit(21, 15, 700.0, 500.0);
        let tuning = crate::config::DifficultyTable::default()
            .get(Difficulty::Normal)
            .generation;
        Maze::generate(layout, Difficulty::Normal, tuning, &mut StdRng::seed_from_u64(seed))
            .unwrap()
    }

    /// Small hand-made maze with a left entrance and right exit.
    fn corridor_maze() -> Maze {
        let text = "\
#######
I     #
I ### O
#     O
#######
";
        Maze::parse_mz(text, |w, h| {
            GridLayout::new(Vec2::new(0.0, 0.0), 30.0, 30.0, w, h)
        })
        .unwrap()
    }

    fn target_box_at(center: Vec2) -> Rect {
        Rect::new(center.x() - 9.0, center.y() - 9.0, 18.0, 18.0)
    }

    fn fast_config() -> PursuerConfig {
        PursuerConfig {
            activation_delay: 0.5,
            ..PursuerConfig::default()
        }
    }

    /// Runs until the pursuer has reached its entry point.
    fn enter_maze(pursuer: &mut Pursuer, target: &Rect, maze: &Maze) {
        for _ in 0..2_000 {
            if pursuer.has_entered_maze() {
                return;
            }
            pursuer.update(DT, target, maze);
        }
        panic!("pursuer never entered the maze");
    }

    #[test]
    fn dormant_until_activation_delay() {
        let maze = generated_maze(1);
        let mut pursuer = Pursuer::new(&maze, PursuerConfig::default(), 80.0);
        let start = pursuer.position();
        let far = Rect::new(-500.0, -500.0, 18.0, 18.0);

        for _ in 0..(4.9 / DT) as usize {
            pursuer.update(DT, &far, &maze);
        }
        assert_eq!(pursuer.phase(), PursuerPhase::Dormant);
        assert_eq!(pursuer.position(), start);
        assert!(!pursuer.catches(&pursuer.bounds()));

        for _ in 0..12 {
            pursuer.update(DT, &far, &maze);
        }
        assert_eq!(pursuer.phase(), PursuerPhase::Warning);
        assert!(pursuer.warning_visible());
        assert_eq!(pursuer.path().len(), 1);
    }

    #[test]
    fn spawn_pose_faces_into_the_maze() {
        let maze = corridor_maze();
        let pursuer = Pursuer::new(&maze, PursuerConfig::default(), 80.0);
        // Left entrance at x = 0: waits 50 units further left, pointing right.
        assert_eq!(pursuer.position().x(), -50.0);
        assert_eq!(pursuer.heading(), 0.0);
        assert_eq!(pursuer.center().y(), 60.0);
    }

    #[test]
    fn warning_expires_after_its_duration() {
        let maze = corridor_maze();
        let config = PursuerConfig {
            activation_delay: 0.0,
            warning_duration: 1.0,
            ..PursuerConfig::default()
        };
        let mut pursuer = Pursuer::new(&maze, config, 80.0);
        let target = target_box_at(Vec2::new(1000.0, 1000.0));

        pursuer.update(DT, &target, &maze);
        assert!(pursuer.warning_visible());
        for _ in 0..55 {
            pursuer.update(DT, &target, &maze);
        }
        assert!(pursuer.warning_visible());
        for _ in 0..10 {
            pursuer.update(DT, &target, &maze);
        }
        assert!(!pursuer.warning_visible());
        assert!(pursuer.is_active());
    }

    #[test]
    fn enters_maze_then_hunts() {
        let maze = corridor_maze();
        let target = target_box_at(maze.layout.cell_center(Cell::new(3, 5)));
        let mut pursuer = Pursuer::new(&maze, fast_config(), 80.0);

        enter_maze(&mut pursuer, &target, &maze);
        assert_eq!(pursuer.phase(), PursuerPhase::Hunting);

        pursuer.update(DT, &target, &maze);
        let path = pursuer.path();
        assert_eq!(path.last(), Some(&maze.layout.cell_center(Cell::new(3, 5))));
        assert_eq!(path[0], maze.layout.cell_center(maze.layout.world_to_cell(pursuer.center())));
    }

    #[test]
    fn replanning_is_idempotent_for_same_cell() {
        let maze = corridor_maze();
        let goal = maze.layout.cell_center(Cell::new(3, 5));
        let mut pursuer = Pursuer::new(&maze, fast_config(), 80.0);
        enter_maze(&mut pursuer, &target_box_at(goal), &maze);

        assert!(pursuer.track_target(goal, &maze));
        let path = pursuer.path().to_vec();
        let index = pursuer.path_index();

        // Moving within the same cell must not replan.
        assert!(!pursuer.track_target(goal + Vec2::new(4.0, -4.0), &maze));
        assert_eq!(pursuer.path(), path.as_slice());
        assert_eq!(pursuer.path_index(), index);

        assert!(pursuer.track_target(maze.layout.cell_center(Cell::new(1, 5)), &maze));
        assert_eq!(pursuer.path_index(), 0);
    }

    #[test]
    fn unreachable_target_keeps_previous_path() {
        let maze = corridor_maze();
        let mut pursuer = Pursuer::new(&maze, fast_config(), 80.0);
        let goal = maze.layout.cell_center(Cell::new(3, 5));
        enter_maze(&mut pursuer, &target_box_at(goal), &maze);
        pursuer.track_target(goal, &maze);
        let before = pursuer.path().to_vec();

        // (2, 3) is a wall in the middle block
        let wall = maze.layout.cell_center(Cell::new(2, 3));
        assert!(pursuer.track_target(wall, &maze));
        assert_eq!(pursuer.path(), before.as_slice());
    }

    #[test]
    fn target_in_same_cell_gives_single_waypoint_and_catch() {
        let maze = corridor_maze();
        let mut pursuer = Pursuer::new(&maze, fast_config(), 80.0);
        let far = target_box_at(maze.layout.cell_center(Cell::new(3, 5)));
        enter_maze(&mut pursuer, &far, &maze);

        let here = pursuer.center();
        let target = target_box_at(here);
        assert!(pursuer.track_target(here, &maze));
        assert_eq!(pursuer.path().len(), 1);
        assert!(pursuer.catches(&target));
    }

    #[test]
    fn chase_reaches_a_stationary_target() {
        let maze = corridor_maze();
        let target = target_box_at(maze.layout.cell_center(Cell::new(3, 5)));
        let mut pursuer = Pursuer::new(&maze, fast_config(), 80.0);

        let caught = (0..2_000).any(|_| {
            pursuer.update(DT, &target, &maze);
            pursuer.catches(&target)
        });
        assert!(caught);
    }

    #[test]
    fn heading_eases_instead_of_snapping() {
        let maze = corridor_maze();
        let mut pursuer = Pursuer::new(&maze, PursuerConfig::default(), 80.0);
        pursuer.heading = 0.0;
        pursuer.target_heading = PI;

        let dt = 0.01;
        pursuer.update_heading(dt);
        let expected = PI * pursuer.config.rotation_gain * dt;
        assert!((pursuer.heading() - expected).abs() < 1e-5);
        assert!(pursuer.heading() < PI);
    }

    #[test]
    fn heading_takes_the_short_way_round() {
        let maze = corridor_maze();
        let mut pursuer = Pursuer::new(&maze, PursuerConfig::default(), 80.0);
        pursuer.heading = 0.9 * PI;
        pursuer.target_heading = -0.9 * PI;
        pursuer.update_heading(0.01);
        assert!(pursuer.heading() > 0.9 * PI);
    }

    #[test]
    fn heading_snaps_below_epsilon() {
        let maze = corridor_maze();
        let mut pursuer = Pursuer::new(&maze, PursuerConfig::default(), 80.0);
        pursuer.heading = 1.0;
        pursuer.target_heading = 1.005;
        pursuer.update_heading(0.01);
        assert_eq!(pursuer.heading(), 1.005);
    }

    #[test]
    fn trail_ages_out() {
        let maze = corridor_maze();
        let config = PursuerConfig {
            activation_delay: 0.0,
            ..PursuerConfig::default()
        };
        let mut pursuer = Pursuer::new(&maze, config, 80.0);
        let far = target_box_at(Vec2::new(1000.0, 1000.0));

        for _ in 0..20 {
            pursuer.update(DT, &far, &maze);
        }
        assert!(pursuer.is_moving());
        assert!(pursuer.trail().len() <= 12);
        assert!(pursuer.trail().len() > 0);
        let ages: Vec<f32> = pursuer.trail().map(|s| s.age).collect();
        assert!(ages.windows(2).all(|w| w[0] <= w[1]), "newest first");
        assert!(ages.iter().all(|&a| a < 1.0));

        // With no movement the trail drains: 1.0 / 0.08 ticks at most.
        pursuer.is_moving = false;
        pursuer.path.clear();
        for _ in 0..13 {
            pursuer.update_trail();
        }
        assert_eq!(pursuer.trail().len(), 0);
    }

    #[test]
    fn trail_samples_cast_to_floats() {
        let sample = TrailSample {
            position: Vec2::new(1.0, 2.0),
            age: 0.5,
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&sample));
        assert_eq!(floats, &[1.0, 2.0, 0.5]);
    }

    #[test]
    fn entry_point_is_inside_the_opening() {
        let grid = Grid::filled(9, 9);
        let layout = GridLayout::new(Vec2::new(0.0, 0.0), 30.0, 30.0, 9, 9);
        for side in Side::ALL {
            let opening = Opening::on_side(side, 3, grid.dimensions());
            let rect = opening.world_rect(&layout);
            let point = entry_point(&rect, side, 10.0);
            assert!(rect.overlaps(&Rect::new(point.x(), point.y(), 0.01, 0.01)), "{side:?}");
        }
    }
}
