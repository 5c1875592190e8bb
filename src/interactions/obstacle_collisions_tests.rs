use std::f64::consts::FRAC_PI_2;
use std::sync::atomic::{AtomicBool, Ordering};
use approx::assert_relative_eq;
use crate::grid::SpatialGrid;
use crate::interactions::{collide_box, collide_circle, collide_obstacles_in_columns};
use crate::models::{Particle, Vector2};
use crate::obstacles::{BoxObstacle, DotObstacle, Obstacle};
use crate::parallel::SharedParticles;

fn moving_particle(x: f64, y: f64, radius: f64, displacement: Vector2) -> Particle {
    let mut particle = Particle::new(0, Vector2::new(x, y), radius).expect("Failed to create particle");
    particle.set_displacement(displacement);
    particle
}

fn still_box(width: f64, height: f64, center: Vector2) -> BoxObstacle {
    BoxObstacle::new(Vector2::new(width, height), center, center).expect("Failed to create box")
}

#[test]
fn test_collide_circle_misses_distant_particle() {
    let mut particle = moving_particle(0.0, -20.0, 5.0, Vector2::new(0.0, 1.0));
    assert!(!collide_circle(&mut particle, Vector2::ZERO, 10.0, 1.0));
    assert_eq!(particle.position, Vector2::new(0.0, -20.0));
    assert_eq!(particle.displacement(), Vector2::new(0.0, 1.0));
}

#[test]
fn test_collide_circle_reflects_with_dampening() {
    let mut particle = moving_particle(0.0, -12.0, 5.0, Vector2::new(0.0, 2.0));
    assert!(collide_circle(&mut particle, Vector2::ZERO, 10.0, 0.5));
    assert_relative_eq!(particle.position.y, -15.0, epsilon = 1e-12);
    assert_relative_eq!(particle.displacement().y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_collide_circle_keeps_outgoing_velocity() {
    let mut particle = moving_particle(12.0, 0.0, 5.0, Vector2::new(1.5, 0.5));
    assert!(collide_circle(&mut particle, Vector2::ZERO, 10.0, 1.0));
    assert_relative_eq!(particle.position.x, 15.0, epsilon = 1e-12);
    assert_relative_eq!(particle.displacement().x, 1.5, epsilon = 1e-12);
    assert_relative_eq!(particle.displacement().y, 0.5, epsilon = 1e-12);
}

#[test]
fn test_collide_box_top_face() {
    let obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));
    let mut particle = moving_particle(50.0, 44.0, 2.0, Vector2::new(0.25, 1.0));
    assert!(collide_box(&mut particle, &obstacle, 1.0));
    assert_relative_eq!(particle.position.y, 43.0, epsilon = 1e-12);
    assert_relative_eq!(particle.displacement().x, 0.25, epsilon = 1e-12);
    assert_relative_eq!(particle.displacement().y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_collide_box_bottom_and_side_faces() {
    let obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));

    let mut below = moving_particle(45.0, 56.0, 2.0, Vector2::new(0.0, -2.0));
    assert!(collide_box(&mut below, &obstacle, 0.5));
    assert_relative_eq!(below.position.y, 57.0, epsilon = 1e-12);
    assert_relative_eq!(below.displacement().y, 1.0, epsilon = 1e-12);

    let mut left = moving_particle(39.0, 52.0, 2.0, Vector2::new(1.0, 0.0));
    assert!(collide_box(&mut left, &obstacle, 1.0));
    assert_relative_eq!(left.position.x, 38.0, epsilon = 1e-12);
    assert_relative_eq!(left.displacement().x, -1.0, epsilon = 1e-12);

    let mut right = moving_particle(61.0, 48.0, 2.0, Vector2::new(-1.0, 0.0));
    assert!(collide_box(&mut right, &obstacle, 1.0));
    assert_relative_eq!(right.position.x, 62.0, epsilon = 1e-12);
    assert_relative_eq!(right.displacement().x, 1.0, epsilon = 1e-12);
}

#[test]
fn test_collide_box_misses_particle_clear_of_faces() {
    let obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));
    let mut particle = moving_particle(50.0, 42.0, 2.0, Vector2::new(0.0, 1.0));
    assert!(!collide_box(&mut particle, &obstacle, 1.0));
    assert_eq!(particle.position, Vector2::new(50.0, 42.0));
}

#[test]
fn test_collide_box_ejects_particle_at_center() {
    let obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));
    let mut particle = moving_particle(50.0, 50.0, 2.0, Vector2::ZERO);
    assert!(collide_box(&mut particle, &obstacle, 1.0));
    assert_relative_eq!(particle.position.y, 43.0, epsilon = 1e-12);
}

#[test]
fn test_collide_box_rotated_frame() {
    let mut obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));
    obstacle.rotation = FRAC_PI_2;
    // The short side now faces +x, five units from the center.
    let mut particle = moving_particle(56.0, 50.0, 2.0, Vector2::new(-1.0, 0.0));
    assert!(collide_box(&mut particle, &obstacle, 1.0));
    assert_relative_eq!(particle.position.x, 57.0, epsilon = 1e-9);
    assert_relative_eq!(particle.position.y, 50.0, epsilon = 1e-9);
    assert_relative_eq!(particle.displacement().x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(particle.displacement().y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_collide_box_rounds_corners() {
    let obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));
    let corner = Vector2::new(60.0, 55.0);
    let mut particle = moving_particle(61.0, 56.0, 2.0, Vector2::new(-0.5, -0.5));
    assert!(collide_box(&mut particle, &obstacle, 1.0));
    assert_relative_eq!((particle.position - corner).length(), 2.0, epsilon = 1e-9);
    // Moving straight at the corner, so the velocity is fully reversed.
    assert_relative_eq!(particle.displacement().x, 0.5, epsilon = 1e-9);
    assert_relative_eq!(particle.displacement().y, 0.5, epsilon = 1e-9);
}

fn filed(particles: &mut [Particle], grid: &mut SpatialGrid) {
    for particle in particles.iter_mut() {
        particle.refresh_cell(grid.cell_size());
    }
    grid.rebuild(particles);
}

#[test]
fn test_collide_obstacles_in_columns_flags_contact() {
    let mut grid = SpatialGrid::new(Vector2::new(100.0, 100.0), 10.0).unwrap();
    let mut particles = vec![Particle::new(0, Vector2::new(50.0, 38.0), 5.0).unwrap()];
    filed(&mut particles, &mut grid);
    let center = Vector2::new(50.0, 50.0);
    let obstacles = vec![Obstacle::Dot(DotObstacle::new(10.0, center, center).unwrap())];
    let contacts = vec![AtomicBool::new(false)];

    {
        let shared = SharedParticles::new(&mut particles);
        unsafe { collide_obstacles_in_columns(&shared, &grid, &obstacles, &contacts, 0..3, 1.0) };
    }
    assert!(!contacts[0].load(Ordering::Relaxed));
    assert_eq!(particles[0].position, Vector2::new(50.0, 38.0));

    {
        let shared = SharedParticles::new(&mut particles);
        unsafe { collide_obstacles_in_columns(&shared, &grid, &obstacles, &contacts, 3..10, 1.0) };
    }
    assert!(contacts[0].load(Ordering::Relaxed));
    assert_relative_eq!(particles[0].position.y, 35.0, epsilon = 1e-12);
}

#[test]
fn test_collide_obstacles_in_columns_skips_broken_boxes() {
    let mut grid = SpatialGrid::new(Vector2::new(100.0, 100.0), 10.0).unwrap();
    let mut particles = vec![Particle::new(0, Vector2::new(50.0, 50.0), 2.0).unwrap()];
    filed(&mut particles, &mut grid);
    let mut obstacle = still_box(20.0, 10.0, Vector2::new(50.0, 50.0));
    obstacle.set_durability(0);
    let obstacles = vec![Obstacle::Box(obstacle)];
    let contacts = vec![AtomicBool::new(false)];

    {
        let shared = SharedParticles::new(&mut particles);
        unsafe { collide_obstacles_in_columns(&shared, &grid, &obstacles, &contacts, 0..10, 1.0) };
    }
    assert!(!contacts[0].load(Ordering::Relaxed));
    assert_eq!(particles[0].position, Vector2::new(50.0, 50.0));
}
