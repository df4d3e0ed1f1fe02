use std::ops::{Add, AddAssign, Mul, Sub};

/*
Layout requirements so a renderer can upload positions without copying:
   1. Standard layout (like C structs).
   2. Can be safely cast to [f32; 2] or bytes.
*/

/// A 2D world-space vector (x grows right, y grows down).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec2([f32; 2]);

impl Vec2 {
    pub const ZERO: Vec2 = Vec2([0.0, 0.0]);

    pub fn new(x: f32, y: f32) -> Self {
        Vec2([x, y])
    }

    /// Unit vector pointing along `angle` (radians, measured from +x toward +y).
    pub fn from_angle(angle: f32) -> Self {
        Vec2([angle.cos(), angle.sin()])
    }

    pub fn length(&self) -> f32 {
        (self.x().powi(2) + self.y().powi(2)).sqrt()
    }

    /// Returns the unit vector, or zero when the length is zero.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::ZERO;
        }

        Self([self.x() / length, self.y() / length])
    }

    /// Angle of the vector in radians, as returned by `atan2(y, x)`.
    pub fn angle(&self) -> f32 {
        self.y().atan2(self.x())
    }

    pub fn x(&self) -> f32 {
        self.0[0]
    }
    pub fn y(&self) -> f32 {
        self.0[1]
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self([self.x() + other.x(), self.y() + other.y()])
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self([self.x() - other.x(), self.y() - other.y()])
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self([self.x() * scalar, self.y() * scalar])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn length_and_angle() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert!((Vec2::new(0.0, 1.0).angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn casts_to_bytes() {
        let points = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        let floats: &[f32] = bytemuck::cast_slice(&points);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }
}
