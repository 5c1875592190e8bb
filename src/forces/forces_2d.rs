use log::warn;
use crate::models::{Particle, Vector2};
use crate::utils::SolverError;

/// Axis-aligned directions gravity can be switched to. `Down` is `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityDirection {
    Up,
    Down,
    Left,
    Right,
}

impl GravityDirection {
    pub fn unit(self) -> Vector2 {
        match self {
            GravityDirection::Up => Vector2::new(0.0, -1.0),
            GravityDirection::Down => Vector2::new(0.0, 1.0),
            GravityDirection::Left => Vector2::new(-1.0, 0.0),
            GravityDirection::Right => Vector2::new(1.0, 0.0),
        }
    }
}

/// Uniform acceleration applied to every particle each sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    acceleration: Vector2,
}

impl Gravity {
    pub fn new(acceleration: Vector2) -> Self {
        Gravity { acceleration }
    }

    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn magnitude(&self) -> f64 {
        self.acceleration.length()
    }

    /// Replaces the acceleration vector.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoefficient` if either component is not finite; the old value is kept.
    pub fn set(&mut self, acceleration: Vector2) -> Result<(), SolverError> {
        if !acceleration.is_finite() {
            warn!("Rejected non-finite gravity {:?}", acceleration);
            return Err(SolverError::InvalidCoefficient);
        }
        self.acceleration = acceleration;
        Ok(())
    }

    /// Points gravity along `direction` without changing its strength.
    ///
    /// # Example
    /// ```
    /// use rs_verlet::forces::{Gravity, GravityDirection};
    /// use rs_verlet::models::Vector2;
    ///
    /// let mut gravity = Gravity::new(Vector2::new(0.0, 150.0));
    /// gravity.toggle(GravityDirection::Left);
    /// assert_eq!(gravity.acceleration(), Vector2::new(-150.0, 0.0));
    /// ```
    pub fn toggle(&mut self, direction: GravityDirection) {
        self.acceleration = direction.unit() * self.magnitude();
    }

    pub fn apply(&self, particle: &mut Particle) {
        particle.accelerate(self.acceleration);
    }
}

/// Whether a pointer force draws particles in or drives them away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    Pull,
    Push,
}

/// A radial force around a point, queued by pointer input for one frame.
///
/// Inside `radius` a particle at distance `d` is accelerated by
/// `strength * (radius - d)` towards the point (`Pull`) or away from it (`Push`).
/// Particles on or outside the radius are unaffected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointForce {
    pub point: Vector2,
    pub radius: f64,
    pub mode: PointerMode,
}

impl PointForce {
    /// # Errors
    ///
    /// Returns `InvalidRadius` unless `radius` is positive and finite, and
    /// `InvalidCoefficient` for a non-finite point.
    pub fn new(point: Vector2, radius: f64, mode: PointerMode) -> Result<Self, SolverError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SolverError::InvalidRadius);
        }
        if !point.is_finite() {
            return Err(SolverError::InvalidCoefficient);
        }
        Ok(PointForce { point, radius, mode })
    }

    /// Acceleration felt by a particle at `position`.
    ///
    /// # Example
    /// ```
    /// use rs_verlet::forces::{PointForce, PointerMode};
    /// use rs_verlet::models::Vector2;
    ///
    /// let pull = PointForce::new(Vector2::ZERO, 100.0, PointerMode::Pull).unwrap();
    /// let a = pull.acceleration_at(Vector2::new(60.0, 0.0), 2.0);
    /// assert!((a.x + 80.0).abs() < 1e-9);
    /// ```
    pub fn acceleration_at(&self, position: Vector2, strength: f64) -> Vector2 {
        let offset = self.point - position;
        let distance = offset.length();
        let falloff = (self.radius - distance).max(0.0);
        if falloff == 0.0 {
            return Vector2::ZERO;
        }
        // A particle sitting on the point has no direction to move in.
        let (direction, _) = offset.normalized_or(Vector2::ZERO);
        let toward = direction * (strength * falloff);
        match self.mode {
            PointerMode::Pull => toward,
            PointerMode::Push => -toward,
        }
    }

    pub fn apply(&self, particle: &mut Particle, strength: f64) {
        particle.accelerate(self.acceleration_at(particle.position, strength));
    }
}
