use std::f64::consts::PI;
use crate::models::Vector2;
use crate::utils::SolverError;

/// How a kinematic obstacle travels between its start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionProfile {
    /// Never moves; sits at `start`.
    Stationary,
    /// Smooth back-and-forth: `start + (end - start) * 0.5 * (1 - cos(2πt / period))`.
    #[default]
    Oscillating,
    /// Sawtooth conveyor: `start + (end - start) * frac(t / period)`. Jumps back to `start`
    /// at every cycle boundary.
    LinearRamp,
}

/// Time-driven position of an obstacle. Collisions never feed back into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub start: Vector2,
    pub end: Vector2,
    /// Length of one motion cycle in seconds. Must be positive.
    pub period: f64,
    /// Time accumulated so far. Setting it before the run offsets the phase.
    pub elapsed: f64,
    pub profile: MotionProfile,
}

impl Kinematics {
    pub fn new(start: Vector2, end: Vector2, period: f64) -> Self {
        Kinematics {
            start,
            end,
            period,
            elapsed: 0.0,
            profile: MotionProfile::default(),
        }
    }

    /// True when the obstacle can never move.
    pub fn is_stationary(&self) -> bool {
        self.profile == MotionProfile::Stationary || self.start == self.end
    }

    /// Fraction of the way from `start` to `end` at time `t`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_verlet::models::Vector2;
    /// use rs_verlet::obstacles::{Kinematics, MotionProfile};
    ///
    /// let mut kinematics = Kinematics::new(Vector2::ZERO, Vector2::new(10.0, 0.0), 4.0);
    /// assert!((kinematics.progress_at(2.0) - 1.0).abs() < 1e-12);
    /// kinematics.profile = MotionProfile::LinearRamp;
    /// assert!((kinematics.progress_at(5.0) - 0.25).abs() < 1e-12);
    /// ```
    pub fn progress_at(&self, t: f64) -> f64 {
        if self.is_stationary() || !self.period.is_finite() || self.period <= 0.0 {
            return 0.0;
        }
        match self.profile {
            MotionProfile::Stationary => 0.0,
            MotionProfile::Oscillating => 0.5 * (1.0 - (2.0 * PI * t / self.period).cos()),
            MotionProfile::LinearRamp => (t / self.period).rem_euclid(1.0),
        }
    }

    pub fn position_at(&self, t: f64) -> Vector2 {
        self.start.lerp(self.end, self.progress_at(t))
    }

    /// Current position, evaluated from `elapsed`.
    pub fn position(&self) -> Vector2 {
        self.position_at(self.elapsed)
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    /// Changes the cycle period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` unless `period` is positive and finite.
    pub fn set_period(&mut self, period: f64) -> Result<(), SolverError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(SolverError::InvalidPeriod);
        }
        self.period = period;
        Ok(())
    }
}
