use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::grid::SpatialGrid;
use crate::models::{Particle, Vector2};
use crate::obstacles::{BoxObstacle, Obstacle};
use crate::parallel::SharedParticles;

/// Pushes `particle` out of a circle of `radius` around `center` and reflects the
/// velocity component pointing into the circle, scaled by `dampening`.
///
/// Returns `true` on contact. The push itself does not add velocity. A radius of zero
/// turns the circle into a point, which is how box corners are rounded.
///
/// # Examples
///
/// ```
/// use rs_verlet::interactions::collide_circle;
/// use rs_verlet::models::{Particle, Vector2};
///
/// let mut particle = Particle::new(0, Vector2::new(0.0, -12.0), 5.0).unwrap();
/// particle.set_displacement(Vector2::new(0.0, 2.0));
/// assert!(collide_circle(&mut particle, Vector2::ZERO, 10.0, 1.0));
/// assert!((particle.position.y + 15.0).abs() < 1e-9);
/// assert!((particle.displacement().y + 2.0).abs() < 1e-9);
/// ```
pub fn collide_circle(particle: &mut Particle, center: Vector2, radius: f64, dampening: f64) -> bool {
    let min_distance = radius + particle.radius;
    let offset = center - particle.position;
    if offset.length_squared() >= min_distance * min_distance {
        return false;
    }
    let (normal, _) = offset.normalized_or(Vector2::new(0.0, 1.0));
    let mut displacement = particle.displacement();
    particle.position = center - normal * min_distance;
    let along = displacement.dot(normal);
    if along > 0.0 {
        displacement -= normal * (along * (1.0 + dampening));
    }
    particle.set_displacement(displacement);
    true
}

/// Resolves `particle` against a rotated rectangle.
///
/// Corners are handled as zero-radius circles first. The rest of the test runs in the box
/// frame, where each side owns a band one particle radius deep on the outside that
/// reaches to the box center on the inside. A particle inside a band is pushed onto the
/// outer edge of that band, and its normal velocity is flipped if it points into the box.
/// Bands are checked top, bottom, left, right against the already corrected position.
pub fn collide_box(particle: &mut Particle, obstacle: &BoxObstacle, dampening: f64) -> bool {
    let mut hit = false;
    for corner in obstacle.corners() {
        hit |= collide_circle(particle, corner, 0.0, dampening);
    }

    let half = obstacle.half_extents();
    let r = particle.radius;
    let mut local = obstacle.to_local(particle.position);
    let mut velocity = particle.displacement().rotated(-obstacle.rotation);
    let mut pushed = false;

    if -half.x < local.x && local.x < half.x {
        if -half.y - r < local.y && local.y <= 0.0 {
            local.y = -half.y - r;
            if velocity.y > 0.0 {
                velocity.y = -velocity.y * dampening;
            }
            pushed = true;
        }
        if 0.0 < local.y && local.y < half.y + r {
            local.y = half.y + r;
            if velocity.y < 0.0 {
                velocity.y = -velocity.y * dampening;
            }
            pushed = true;
        }
    }
    if -half.y < local.y && local.y < half.y {
        if -half.x - r < local.x && local.x <= 0.0 {
            local.x = -half.x - r;
            if velocity.x > 0.0 {
                velocity.x = -velocity.x * dampening;
            }
            pushed = true;
        }
        if 0.0 < local.x && local.x < half.x + r {
            local.x = half.x + r;
            if velocity.x < 0.0 {
                velocity.x = -velocity.x * dampening;
            }
            pushed = true;
        }
    }

    if pushed {
        particle.position = obstacle.to_world(local);
        particle.set_displacement(velocity.rotated(obstacle.rotation));
    }
    hit || pushed
}

/// Tests every obstacle against the particles filed in `columns` and flags the obstacles
/// that were touched in `contacts`, which is indexed like `obstacles`.
///
/// Only the cells overlapped by an obstacle's bounds, grown by one cell, are visited.
///
/// # Safety
///
/// No other task may touch particles filed in `columns` while this runs.
pub unsafe fn collide_obstacles_in_columns(
    particles: &SharedParticles,
    grid: &SpatialGrid,
    obstacles: &[Obstacle],
    contacts: &[AtomicBool],
    columns: Range<usize>,
    dampening: f64,
) {
    let (first_column, last_column) = (columns.start as i64, columns.end as i64 - 1);
    for (obstacle, contact) in obstacles.iter().zip(contacts) {
        if !obstacle.is_active() {
            continue;
        }
        let (min, max) = obstacle.bounds(grid.cell_size());
        let Some((first, last)) = grid.clipped_range(min, max) else {
            continue;
        };
        for column in first.0.max(first_column)..=last.0.min(last_column) {
            for row in first.1..=last.1 {
                for &id in grid.cell(column, row) {
                    let Some(particle) = particles.get_mut(id) else {
                        continue;
                    };
                    if obstacle.collide(particle, dampening).is_hit() {
                        contact.store(true, Ordering::Relaxed);
                    }
                }
            }
        }
    }
}
