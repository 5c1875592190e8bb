use approx::assert_relative_eq;
use crate::forces::{Gravity, GravityDirection, PointForce, PointerMode};
use crate::models::{Particle, Vector2};
use crate::utils::SolverError;

#[test]
fn test_gravity_toggle_keeps_magnitude() {
    let mut gravity = Gravity::new(Vector2::new(0.0, 150.0));
    gravity.toggle(GravityDirection::Up);
    assert_eq!(gravity.acceleration(), Vector2::new(0.0, -150.0));
    gravity.toggle(GravityDirection::Right);
    assert_eq!(gravity.acceleration(), Vector2::new(150.0, 0.0));
    gravity.toggle(GravityDirection::Down);
    assert_eq!(gravity.acceleration(), Vector2::new(0.0, 150.0));
}

#[test]
fn test_gravity_toggle_uses_diagonal_magnitude() {
    let mut gravity = Gravity::new(Vector2::new(30.0, 40.0));
    gravity.toggle(GravityDirection::Left);
    assert_relative_eq!(gravity.acceleration().x, -50.0, epsilon = 1e-12);
    assert_relative_eq!(gravity.acceleration().y, 0.0);
}

#[test]
fn test_gravity_set_rejects_non_finite() {
    let mut gravity = Gravity::new(Vector2::new(0.0, 10.0));
    assert_eq!(gravity.set(Vector2::new(f64::NAN, 0.0)), Err(SolverError::InvalidCoefficient));
    assert_eq!(gravity.acceleration(), Vector2::new(0.0, 10.0));
    assert!(gravity.set(Vector2::new(1.0, 2.0)).is_ok());
    assert_eq!(gravity.acceleration(), Vector2::new(1.0, 2.0));
}

#[test]
fn test_gravity_apply_accumulates() {
    let gravity = Gravity::new(Vector2::new(0.0, 150.0));
    let mut particle = Particle::new(0, Vector2::ZERO, 1.0).unwrap();
    gravity.apply(&mut particle);
    gravity.apply(&mut particle);
    assert_eq!(particle.acceleration, Vector2::new(0.0, 300.0));
}

#[test]
fn test_pull_points_toward_center_and_scales_with_depth() {
    let pull = PointForce::new(Vector2::new(100.0, 100.0), 50.0, PointerMode::Pull).unwrap();
    let near = pull.acceleration_at(Vector2::new(100.0, 80.0), 300.0);
    assert_relative_eq!(near.x, 0.0);
    assert_relative_eq!(near.y, 300.0 * 30.0, epsilon = 1e-9);
    let far = pull.acceleration_at(Vector2::new(100.0, 60.0), 300.0);
    assert!(far.y > 0.0 && far.y < near.y);
}

#[test]
fn test_push_points_away_from_center() {
    let push = PointForce::new(Vector2::new(100.0, 100.0), 50.0, PointerMode::Push).unwrap();
    let a = push.acceleration_at(Vector2::new(120.0, 100.0), 10.0);
    assert_relative_eq!(a.x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(a.y, 0.0);
}

#[test]
fn test_pointer_force_ignores_particles_outside_radius() {
    let pull = PointForce::new(Vector2::ZERO, 10.0, PointerMode::Pull).unwrap();
    assert_eq!(pull.acceleration_at(Vector2::new(10.0, 0.0), 300.0), Vector2::ZERO);
    assert_eq!(pull.acceleration_at(Vector2::new(0.0, 25.0), 300.0), Vector2::ZERO);
}

#[test]
fn test_pointer_force_at_center_is_zero() {
    let push = PointForce::new(Vector2::new(5.0, 5.0), 10.0, PointerMode::Push).unwrap();
    let mut particle = Particle::new(0, Vector2::new(5.0, 5.0), 1.0).unwrap();
    push.apply(&mut particle, 300.0);
    assert_eq!(particle.acceleration, Vector2::ZERO);
}

#[test]
fn test_pointer_force_validates_input() {
    assert_eq!(
        PointForce::new(Vector2::ZERO, 0.0, PointerMode::Pull).unwrap_err(),
        SolverError::InvalidRadius
    );
    assert_eq!(
        PointForce::new(Vector2::new(f64::INFINITY, 0.0), 5.0, PointerMode::Push).unwrap_err(),
        SolverError::InvalidCoefficient
    );
}
