//! Math utilities for the 2D maze world.
//!
//! This module provides the small vector type used for world positions, the
//! axis-aligned rectangle used for every overlap test, and the transforms between
//! maze grid cells and world coordinates.
//!
//! # Module Organization
//!
//! - [`vec`] contains the [`vec::Vec2`] type and its operators
//! - [`rect`] contains [`rect::Rect`] and the exclusive-edge overlap test
//! - [`coordinates`] contains grid/world transforms and side/direction helpers
//! - Angle helpers are provided at root level

pub mod coordinates;
pub mod rect;
pub mod vec;

use std::f32::consts::PI;

/// Wraps an angle difference into the range [-π, π].
///
/// Values already inside the range (including exactly ±π) are returned unchanged,
/// so a half-turn stays a half-turn instead of flipping sign.
///
/// # Example
/// ```
/// use maze_chase::math::wrap_angle;
/// use std::f32::consts::PI;
///
/// assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
/// assert_eq!(wrap_angle(PI), PI);
/// ```
pub fn wrap_angle(mut radians: f32) -> f32 {
    while radians > PI {
        radians -= 2.0 * PI;
    }
    while radians < -PI {
        radians += 2.0 * PI;
    }
    radians
}
