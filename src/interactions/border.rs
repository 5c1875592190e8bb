use crate::models::{Particle, Vector2};
use crate::utils::BorderPolicy;

/// Keeps `particle` inside the world boundary. Returns `true` if it had to be moved.
///
/// With a rectangular border the position is clamped to `[r, extent - r]` on each axis,
/// and the velocity component on a clamped axis is reversed and scaled by `dampening`
/// if it still points outwards. With a circular border the particle is pulled back onto
/// the circle of radius `R - r` and the outward part of its velocity is reflected.
///
/// # Examples
///
/// ```
/// use rs_verlet::interactions::apply_border;
/// use rs_verlet::models::{Particle, Vector2};
/// use rs_verlet::utils::BorderPolicy;
///
/// let mut particle = Particle::new(0, Vector2::new(98.0, 50.0), 4.0).unwrap();
/// particle.set_displacement(Vector2::new(3.0, 0.0));
/// let world = Vector2::new(100.0, 100.0);
/// assert!(apply_border(&mut particle, &BorderPolicy::Rectangular, world, 0.5));
/// assert_eq!(particle.position.x, 96.0);
/// assert!((particle.displacement().x + 1.5).abs() < 1e-12);
/// ```
pub fn apply_border(particle: &mut Particle, border: &BorderPolicy, world_size: Vector2, dampening: f64) -> bool {
    match *border {
        BorderPolicy::Rectangular => apply_rectangular(particle, world_size, dampening),
        BorderPolicy::Circular { center, radius } => apply_circular(particle, center, radius, dampening),
    }
}

fn apply_rectangular(particle: &mut Particle, world_size: Vector2, dampening: f64) -> bool {
    let r = particle.radius;
    let mut displacement = particle.displacement();
    let mut moved = false;

    if particle.position.x < r {
        particle.position.x = r;
        if displacement.x < 0.0 {
            displacement.x = -displacement.x * dampening;
        }
        moved = true;
    } else if particle.position.x > world_size.x - r {
        particle.position.x = world_size.x - r;
        if displacement.x > 0.0 {
            displacement.x = -displacement.x * dampening;
        }
        moved = true;
    }

    if particle.position.y < r {
        particle.position.y = r;
        if displacement.y < 0.0 {
            displacement.y = -displacement.y * dampening;
        }
        moved = true;
    } else if particle.position.y > world_size.y - r {
        particle.position.y = world_size.y - r;
        if displacement.y > 0.0 {
            displacement.y = -displacement.y * dampening;
        }
        moved = true;
    }

    if moved {
        particle.set_displacement(displacement);
    }
    moved
}

fn apply_circular(particle: &mut Particle, center: Vector2, radius: f64, dampening: f64) -> bool {
    let limit = radius - particle.radius;
    let offset = center - particle.position;
    if offset.length_squared() <= limit * limit {
        return false;
    }
    // Inward normal.
    let (normal, _) = offset.normalized_or(Vector2::new(0.0, -1.0));
    let mut displacement = particle.displacement();
    particle.position = center - normal * limit;
    let along = displacement.dot(normal);
    if along < 0.0 {
        displacement -= normal * (along * (1.0 + dampening));
    }
    particle.set_displacement(displacement);
    true
}
