use std::f64::consts::TAU;
use crate::models::{Color, Vector2};
use crate::obstacles::Kinematics;
use crate::utils::SolverError;

/// Cycle period given to new box obstacles, in seconds.
pub const DEFAULT_BOX_PERIOD: f64 = TAU;
/// Hits a new breakable box survives.
pub const DEFAULT_DURABILITY: u32 = 2000;

/// What happens to a particle that touches a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoxBehavior {
    /// The particle bounces off.
    #[default]
    Solid,
    /// The particle is moved to `target` and stopped.
    Goal { target: Vector2 },
    /// The particle is moved to the penalty point `target` and stopped.
    Hazard { target: Vector2 },
}

/// A rotated rectangular kinematic obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxObstacle {
    /// Motion of the rectangle's center.
    pub kinematics: Kinematics,
    /// Full width and height.
    pub dimensions: Vector2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Spin in radians per second.
    pub rotation_speed: f64,
    pub breakable: bool,
    /// Remaining hits. Only consulted when `breakable` is set.
    pub durability: u32,
    /// Durability the box started with; used to fade it out while it wears down.
    pub total_durability: u32,
    pub behavior: BoxBehavior,
    pub color: Color,
}

impl BoxObstacle {
    /// Creates an unbreakable solid box centered at `start`, travelling towards `end`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` unless both dimensions are positive and finite.
    pub fn new(dimensions: Vector2, start: Vector2, end: Vector2) -> Result<Self, SolverError> {
        if !dimensions.is_finite() || dimensions.x <= 0.0 || dimensions.y <= 0.0 {
            return Err(SolverError::InvalidDimensions);
        }
        Ok(BoxObstacle {
            kinematics: Kinematics::new(start, end, DEFAULT_BOX_PERIOD),
            dimensions,
            rotation: 0.0,
            rotation_speed: 0.0,
            breakable: false,
            durability: DEFAULT_DURABILITY,
            total_durability: DEFAULT_DURABILITY,
            behavior: BoxBehavior::Solid,
            color: Color::WHITE,
        })
    }

    pub fn position(&self) -> Vector2 {
        self.kinematics.position()
    }

    pub fn half_extents(&self) -> Vector2 {
        self.dimensions * 0.5
    }

    pub fn update(&mut self, dt: f64) {
        self.kinematics.advance(dt);
        self.rotation += self.rotation_speed * dt;
    }

    /// Makes the box breakable with `hits` remaining.
    pub fn set_durability(&mut self, hits: u32) {
        self.breakable = true;
        self.durability = hits;
        self.total_durability = hits;
    }

    /// Whether the box still takes part in collisions.
    pub fn is_active(&self) -> bool {
        !self.breakable || self.durability > 0
    }

    /// Records one sub-step with at least one contact. Durability never drops below zero.
    pub fn register_contact(&mut self) {
        if self.breakable {
            self.durability = self.durability.saturating_sub(1);
        }
    }

    /// Display color, faded by the fraction of durability left for breakable boxes.
    pub fn render_color(&self) -> Color {
        if !self.breakable || self.total_durability == 0 {
            return if self.is_active() { self.color } else { self.color.with_alpha(0) };
        }
        let remaining = self.durability.min(self.total_durability) as f64 / self.total_durability as f64;
        self.color.with_alpha((self.color.a as f64 * remaining).round() as u8)
    }

    /// Maps a world-space point into the box frame (center at the origin, unrotated).
    pub fn to_local(&self, point: Vector2) -> Vector2 {
        (point - self.position()).rotated(-self.rotation)
    }

    /// Maps a box-frame point back to world space.
    pub fn to_world(&self, point: Vector2) -> Vector2 {
        point.rotated(self.rotation) + self.position()
    }

    /// World-space corners, counter-clockwise from the local `(-w/2, -h/2)` corner.
    pub fn corners(&self) -> [Vector2; 4] {
        let half = self.half_extents();
        [
            self.to_world(Vector2::new(-half.x, -half.y)),
            self.to_world(Vector2::new(half.x, -half.y)),
            self.to_world(Vector2::new(half.x, half.y)),
            self.to_world(Vector2::new(-half.x, half.y)),
        ]
    }
}
