use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use crate::utils::EPSILON;

/// A 2D vector used for positions, displacements and accelerations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates the vector counter-clockwise (in a y-up frame) by `angle` radians.
    ///
    /// # Example
    /// ```
    /// use rs_verlet::models::Vector2;
    ///
    /// let v = Vector2::new(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
    /// assert!((v.x - 0.0).abs() < 1e-12);
    /// assert!((v.y - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Returns the unit vector and the clamped length.
    ///
    /// The length is never smaller than `EPSILON`. A degenerate vector yields `fallback`
    /// so callers always get a usable separating direction.
    pub fn normalized_or(&self, fallback: Vector2) -> (Vector2, f64) {
        let length_squared = self.length_squared();
        if length_squared < EPSILON * EPSILON {
            return (fallback, EPSILON);
        }
        let length = length_squared.sqrt();
        (*self / length, length)
    }

    /// Linear interpolation between `self` (at `t = 0`) and `other` (at `t = 1`).
    pub fn lerp(&self, other: Vector2, t: f64) -> Self {
        *self + (other - *self) * t
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from(coordinates: (f64, f64)) -> Self {
        Self::new(coordinates.0, coordinates.1)
    }
}
