use crate::models::{Color, Vector2};
use crate::utils::SolverError;

/// Grid cell coordinates `(column, row)`. Signed so positions left of or above the
/// world origin map to coordinates the grid can reject.
pub type CellCoord = (i64, i64);

/// A circular particle integrated with position Verlet.
///
/// Velocity is never stored: it is the difference between `position` and
/// `position_last`, measured per sub-step.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Index in the particle store. Never changes.
    pub(crate) id: usize,
    pub position: Vector2,
    pub position_last: Vector2,
    pub acceleration: Vector2,
    pub radius: f64,
    pub color: Color,
    /// Cell the particle was filed under at the last coordinate refresh.
    pub(crate) cell: CellCoord,
}

impl Particle {
    /// Creates a resting particle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRadius` if `radius` is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_verlet::models::{Particle, Vector2};
    ///
    /// let particle = Particle::new(0, Vector2::new(10.0, 20.0), 4.0).expect("valid particle");
    /// assert_eq!(particle.displacement(), Vector2::ZERO);
    /// assert!(Particle::new(1, Vector2::ZERO, -1.0).is_err());
    /// ```
    pub fn new(id: usize, position: Vector2, radius: f64) -> Result<Self, SolverError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SolverError::InvalidRadius);
        }
        Ok(Particle {
            id,
            position,
            position_last: position,
            acceleration: Vector2::ZERO,
            radius,
            color: Color::default(),
            cell: (0, 0),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Cell computed by the last [`Particle::refresh_cell`].
    pub fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Advances the particle by one step of length `dt`.
    ///
    /// The motion since the previous step is carried over, the accumulated acceleration
    /// is applied as `a * dt²`, and the acceleration is reset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_verlet::models::{Particle, Vector2};
    ///
    /// let mut particle = Particle::new(0, Vector2::new(0.0, 0.0), 1.0).unwrap();
    /// particle.set_displacement(Vector2::new(1.0, 0.0));
    /// particle.integrate(0.01);
    /// assert_eq!(particle.position, Vector2::new(1.0, 0.0));
    /// ```
    pub fn integrate(&mut self, dt: f64) {
        let displacement = self.displacement();
        self.position_last = self.position;
        self.position = self.position + displacement + self.acceleration * (dt * dt);
        self.acceleration = Vector2::ZERO;
    }

    pub fn accelerate(&mut self, acceleration: Vector2) {
        self.acceleration += acceleration;
    }

    /// Distance travelled during the last step.
    pub fn displacement(&self) -> Vector2 {
        self.position - self.position_last
    }

    /// Rewrites the previous position so the next step travels `displacement`.
    pub fn set_displacement(&mut self, displacement: Vector2) {
        self.position_last = self.position - displacement;
    }

    /// Velocity in world units per second for a step of length `dt`.
    pub fn velocity(&self, dt: f64) -> Vector2 {
        self.displacement() / dt
    }

    /// Sets the velocity, in world units per second, for a step of length `dt`.
    pub fn set_velocity(&mut self, velocity: Vector2, dt: f64) {
        self.set_displacement(velocity * dt);
    }

    /// Moves the particle without changing its velocity.
    pub fn translate(&mut self, offset: Vector2) {
        self.position += offset;
    }

    /// Places the particle at `position` at rest.
    pub fn teleport(&mut self, position: Vector2) {
        self.position = position;
        self.position_last = position;
    }

    /// Recomputes the cached cell as `floor(position / cell_size)`.
    /// Non-finite positions map to a cell no grid contains.
    pub fn refresh_cell(&mut self, cell_size: f64) {
        if !self.position.is_finite() {
            self.cell = (i64::MIN, i64::MIN);
            return;
        }
        self.cell = (
            (self.position.x / cell_size).floor() as i64,
            (self.position.y / cell_size).floor() as i64,
        );
    }
}
