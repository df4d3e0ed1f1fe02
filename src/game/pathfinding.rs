//! Grid A* search used by the pursuer.
//!
//! The frontier is a binary heap keyed by `(f-score, insertion order)`, so among
//! equal f-scores the node discovered first is expanded first. Stale heap entries
//! (nodes already closed, or superseded by a cheaper route) are skipped on pop.

use crate::math::coordinates::neighbors;
use crate::maze::grid::{Cell, Grid};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Finds a shortest 4-connected path of open cells from `start` to `goal`.
///
/// Uniform step cost 1 with a Manhattan heuristic. The start cell is expanded
/// even if it is a wall; every other step must land on an open cell.
///
/// # Returns
/// The cells from `start` to `goal` inclusive, or an empty vector when the goal
/// cannot be reached (or either cell lies outside the grid).
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    if !grid.contains(start) || !grid.contains(goal) {
        return Vec::new();
    }

    let width = grid.width();
    let index = |cell: Cell| cell.row * width + cell.col;
    let cell_count = width * grid.height();

    let mut g_score = vec![usize::MAX; cell_count];
    let mut came_from: Vec<Option<Cell>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut open = BinaryHeap::new();
    let mut sequence = 0u64;

    g_score[index(start)] = 0;
    open.push(Reverse((start.manhattan(&goal), sequence, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == goal {
            return reconstruct_path(&came_from, index, current);
        }
        if closed[index(current)] {
            continue;
        }
        closed[index(current)] = true;

        let tentative = g_score[index(current)] + 1;
        for neighbor in neighbors(current, grid.dimensions()) {
            if !grid.is_open(neighbor) || closed[index(neighbor)] {
                continue;
            }
            if tentative >= g_score[index(neighbor)] {
                continue;
            }

            came_from[index(neighbor)] = Some(current);
            g_score[index(neighbor)] = tentative;
            sequence += 1;
            open.push(Reverse((
                tentative + neighbor.manhattan(&goal),
                sequence,
                neighbor,
            )));
        }
    }

    Vec::new()
}

fn reconstruct_path(
    came_from: &[Option<Cell>],
    index: impl Fn(Cell) -> usize,
    mut current: Cell,
) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(previous) = came_from[index(current)] {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
