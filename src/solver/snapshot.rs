use crate::models::{Color, Particle, Vector2};
use crate::obstacles::Obstacle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub id: usize,
    pub position: Vector2,
    pub radius: f64,
    pub color: Color,
}

impl From<&Particle> for ParticleView {
    fn from(particle: &Particle) -> Self {
        ParticleView {
            id: particle.id,
            position: particle.position,
            radius: particle.radius,
            color: particle.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Dot,
    Box,
}

/// Everything a renderer needs to draw one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub position: Vector2,
    /// Radians. Always zero for dots.
    pub rotation: f64,
    /// Full width and height; a dot reports its diameter on both axes.
    pub dimensions: Vector2,
    /// Includes the durability fade of breakable boxes.
    pub color: Color,
    pub active: bool,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        match obstacle {
            Obstacle::Dot(dot) => ObstacleView {
                kind: ObstacleKind::Dot,
                position: dot.position(),
                rotation: 0.0,
                dimensions: Vector2::new(2.0 * dot.radius, 2.0 * dot.radius),
                color: dot.color,
                active: true,
            },
            Obstacle::Box(obstacle) => ObstacleView {
                kind: ObstacleKind::Box,
                position: obstacle.position(),
                rotation: obstacle.rotation,
                dimensions: obstacle.dimensions,
                color: obstacle.render_color(),
                active: obstacle.is_active(),
            },
        }
    }
}

/// Owned copy of the drawable state at the end of a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameSnapshot {
    pub time: f64,
    pub particles: Vec<ParticleView>,
    pub obstacles: Vec<ObstacleView>,
}

impl FrameSnapshot {
    pub fn capture(time: f64, particles: &[Particle], obstacles: &[Obstacle]) -> Self {
        FrameSnapshot {
            time,
            particles: particles.iter().map(ParticleView::from).collect(),
            obstacles: obstacles.iter().map(ObstacleView::from).collect(),
        }
    }
}
