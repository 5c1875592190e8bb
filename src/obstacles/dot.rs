use crate::models::{Color, Vector2};
use crate::obstacles::Kinematics;
use crate::utils::SolverError;

/// Cycle period given to new dot obstacles, in seconds.
pub const DEFAULT_DOT_PERIOD: f64 = 10.0;

/// A circular kinematic obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct DotObstacle {
    pub kinematics: Kinematics,
    pub radius: f64,
    pub color: Color,
}

impl DotObstacle {
    /// Creates a dot travelling between `start` and `end`; pass the same point twice for a
    /// stationary dot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRadius` unless `radius` is positive and finite.
    pub fn new(radius: f64, start: Vector2, end: Vector2) -> Result<Self, SolverError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SolverError::InvalidRadius);
        }
        Ok(DotObstacle {
            kinematics: Kinematics::new(start, end, DEFAULT_DOT_PERIOD),
            radius,
            color: Color::WHITE,
        })
    }

    pub fn position(&self) -> Vector2 {
        self.kinematics.position()
    }

    pub fn update(&mut self, dt: f64) {
        self.kinematics.advance(dt);
    }
}
