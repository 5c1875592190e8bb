use approx::assert_relative_eq;
use crate::models::Vector2;
use crate::obstacles::{Kinematics, MotionProfile};
use crate::utils::SolverError;

fn kinematics(profile: MotionProfile) -> Kinematics {
    let mut kinematics = Kinematics::new(Vector2::new(100.0, 200.0), Vector2::new(300.0, 200.0), 10.0);
    kinematics.profile = profile;
    kinematics
}

#[test]
fn test_oscillating_starts_at_start_and_turns_at_end() {
    let kinematics = kinematics(MotionProfile::Oscillating);
    assert_eq!(kinematics.position_at(0.0), Vector2::new(100.0, 200.0));
    let halfway = kinematics.position_at(5.0);
    assert_relative_eq!(halfway.x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(halfway.y, 200.0, epsilon = 1e-9);
    let quarter = kinematics.position_at(2.5);
    assert_relative_eq!(quarter.x, 200.0, epsilon = 1e-9);
    let full = kinematics.position_at(10.0);
    assert_relative_eq!(full.x, 100.0, epsilon = 1e-9);
}

#[test]
fn test_linear_ramp_is_a_sawtooth() {
    let kinematics = kinematics(MotionProfile::LinearRamp);
    assert_relative_eq!(kinematics.position_at(0.0).x, 100.0);
    assert_relative_eq!(kinematics.position_at(5.0).x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(kinematics.position_at(9.0).x, 280.0, epsilon = 1e-9);
    // Wraps back to the start at the cycle boundary.
    assert_relative_eq!(kinematics.position_at(10.0).x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(kinematics.position_at(12.5).x, 150.0, epsilon = 1e-9);
}

#[test]
fn test_stationary_profiles_never_move() {
    let kinematics = kinematics(MotionProfile::Stationary);
    assert!(kinematics.is_stationary());
    assert_eq!(kinematics.position_at(3.7), Vector2::new(100.0, 200.0));

    let point = Vector2::new(5.0, 5.0);
    let same_ends = Kinematics::new(point, point, 10.0);
    assert!(same_ends.is_stationary());
    assert_eq!(same_ends.position_at(1.0), point);
}

#[test]
fn test_advance_accumulates_elapsed_time() {
    let mut kinematics = kinematics(MotionProfile::Oscillating);
    for _ in 0..50 {
        kinematics.advance(0.1);
    }
    assert_relative_eq!(kinematics.elapsed, 5.0, epsilon = 1e-9);
    assert_relative_eq!(kinematics.position().x, 300.0, epsilon = 1e-6);
}

#[test]
fn test_elapsed_offsets_the_phase() {
    let mut kinematics = kinematics(MotionProfile::Oscillating);
    kinematics.elapsed = 5.0;
    assert_relative_eq!(kinematics.position().x, 300.0, epsilon = 1e-9);
}

#[test]
fn test_set_period_validates() {
    let mut kinematics = kinematics(MotionProfile::Oscillating);
    assert_eq!(kinematics.set_period(0.0), Err(SolverError::InvalidPeriod));
    assert_eq!(kinematics.set_period(f64::INFINITY), Err(SolverError::InvalidPeriod));
    assert_eq!(kinematics.period, 10.0);
    assert!(kinematics.set_period(2.0).is_ok());
    assert_relative_eq!(kinematics.position_at(1.0).x, 300.0, epsilon = 1e-9);
}

#[test]
fn test_invalid_period_holds_start() {
    let mut kinematics = kinematics(MotionProfile::Oscillating);
    kinematics.period = -1.0;
    assert_eq!(kinematics.position_at(4.0), Vector2::new(100.0, 200.0));
}
