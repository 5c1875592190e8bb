use crate::interactions::{collide_box, collide_circle};
use crate::models::{Particle, Vector2};
use crate::obstacles::{BoxBehavior, BoxObstacle, DotObstacle};

/// Outcome of testing one particle against one obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// The particle was pushed out and its velocity reflected.
    Deflected,
    /// The particle was moved to a goal or hazard target and stopped.
    Relocated,
}

impl Contact {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Contact::None)
    }
}

/// Every obstacle the solver knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    Dot(DotObstacle),
    Box(BoxObstacle),
}

impl Obstacle {
    pub fn position(&self) -> Vector2 {
        match self {
            Obstacle::Dot(dot) => dot.position(),
            Obstacle::Box(obstacle) => obstacle.position(),
        }
    }

    /// Advances the obstacle's motion by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        match self {
            Obstacle::Dot(dot) => dot.update(dt),
            Obstacle::Box(obstacle) => obstacle.update(dt),
        }
    }

    /// Whether the obstacle still collides. Only worn-out breakable boxes return `false`.
    pub fn is_active(&self) -> bool {
        match self {
            Obstacle::Dot(_) => true,
            Obstacle::Box(obstacle) => obstacle.is_active(),
        }
    }

    /// World-space bounding box of every particle center that could touch the obstacle,
    /// grown by `margin` on each side.
    pub fn bounds(&self, margin: f64) -> (Vector2, Vector2) {
        match self {
            Obstacle::Dot(dot) => {
                let reach = Vector2::new(dot.radius + margin, dot.radius + margin);
                let center = dot.position();
                (center - reach, center + reach)
            }
            Obstacle::Box(obstacle) => {
                let corners = obstacle.corners();
                let mut min = corners[0];
                let mut max = corners[0];
                for corner in &corners[1..] {
                    min = Vector2::new(min.x.min(corner.x), min.y.min(corner.y));
                    max = Vector2::new(max.x.max(corner.x), max.y.max(corner.y));
                }
                let reach = Vector2::new(margin, margin);
                (min - reach, max + reach)
            }
        }
    }

    /// Resolves `particle` against the obstacle.
    pub fn collide(&self, particle: &mut Particle, dampening: f64) -> Contact {
        if !self.is_active() {
            return Contact::None;
        }
        match self {
            Obstacle::Dot(dot) => {
                if collide_circle(particle, dot.position(), dot.radius, dampening) {
                    Contact::Deflected
                } else {
                    Contact::None
                }
            }
            Obstacle::Box(obstacle) => {
                if !collide_box(particle, obstacle, dampening) {
                    return Contact::None;
                }
                match obstacle.behavior {
                    BoxBehavior::Solid => Contact::Deflected,
                    BoxBehavior::Goal { target } | BoxBehavior::Hazard { target } => {
                        particle.teleport(target);
                        Contact::Relocated
                    }
                }
            }
        }
    }

    pub fn as_dot(&self) -> Option<&DotObstacle> {
        match self {
            Obstacle::Dot(dot) => Some(dot),
            Obstacle::Box(_) => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxObstacle> {
        match self {
            Obstacle::Box(obstacle) => Some(obstacle),
            Obstacle::Dot(_) => None,
        }
    }

    pub fn as_box_mut(&mut self) -> Option<&mut BoxObstacle> {
        match self {
            Obstacle::Box(obstacle) => Some(obstacle),
            Obstacle::Dot(_) => None,
        }
    }
}
