use std::ops::{Add, Div, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (the z component of the 3D cross of two planar vectors).
    ///
    /// This is the edge function primitive: for an edge A->B and a point P,
    /// `(B - A).cross(P - A)` is positive when P lies to the left of the edge,
    /// negative to the right, and zero exactly on the edge line.
    #[inline]
    pub fn cross(&self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Clamp both components to [min, max].
    pub fn clamp(&self, min: f32, max: f32) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign_tells_side_of_edge() {
        let edge = Vec2::new(1.0, 0.0);
        assert!(edge.cross(Vec2::new(0.5, 1.0)) > 0.0);
        assert!(edge.cross(Vec2::new(0.5, -1.0)) < 0.0);
        assert_eq!(edge.cross(Vec2::new(0.5, 0.0)), 0.0);
    }
}
