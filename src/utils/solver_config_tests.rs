use crate::models::Vector2;
use crate::utils::{BorderPolicy, SolverConfig, SolverError, DEFAULT_SOLVER_CONFIG};
use crate::assert_float_eq;

#[test]
fn test_default_matches_constant() {
    assert_eq!(SolverConfig::default(), DEFAULT_SOLVER_CONFIG);
    assert!(SolverConfig::default().validate().is_ok());
}

#[test]
fn test_new_with_partial_overrides() {
    let config = SolverConfig::new(Some(Vector2::new(400.0, 300.0)), Some(5.0), None, Some(4), None, None);
    assert_eq!(config.world_size, Vector2::new(400.0, 300.0));
    assert_float_eq(config.particle_radius, 5.0, 1e-12, None);
    assert_float_eq(config.frame_dt, DEFAULT_SOLVER_CONFIG.frame_dt, 1e-12, None);
    assert_eq!(config.sub_steps, 4);
    assert_eq!(config.border, BorderPolicy::Rectangular);
}

#[test]
fn test_step_dt_and_cell_size() {
    let config = SolverConfig::new(None, Some(5.0), Some(1.0 / 60.0), Some(8), None, None);
    assert_float_eq(config.step_dt(), 1.0 / 480.0, 1e-12, None);
    assert_float_eq(config.cell_size(), 10.0, 1e-12, None);
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = SolverConfig::default();
    config.particle_radius = 0.0;
    assert_eq!(config.validate(), Err(SolverError::InvalidRadius));

    let mut config = SolverConfig::default();
    config.sub_steps = 0;
    assert_eq!(config.validate(), Err(SolverError::InvalidSubSteps));

    let mut config = SolverConfig::default();
    config.frame_dt = -1.0;
    assert_eq!(config.validate(), Err(SolverError::InvalidTime));

    let mut config = SolverConfig::default();
    config.world_size = Vector2::new(2.0, 500.0);
    assert_eq!(config.validate(), Err(SolverError::InvalidWorldSize));

    let mut config = SolverConfig::default();
    config.border_dampening = -0.5;
    assert_eq!(config.validate(), Err(SolverError::InvalidCoefficient));

    let mut config = SolverConfig::default();
    config.border = BorderPolicy::Circular { center: Vector2::new(100.0, 100.0), radius: 1.0 };
    assert_eq!(config.validate(), Err(SolverError::InvalidRadius));

    let mut config = SolverConfig::default();
    config.world_size = Vector2::new(100.0, 100.0);
    config.border = BorderPolicy::Circular { center: Vector2::new(50.0, 50.0), radius: 200.0 };
    assert_eq!(config.validate(), Err(SolverError::InvalidRadius));
    config.border = BorderPolicy::Circular { center: Vector2::new(30.0, 50.0), radius: 40.0 };
    assert_eq!(config.validate(), Err(SolverError::InvalidRadius));
    config.border = BorderPolicy::Circular { center: Vector2::new(50.0, 50.0), radius: 50.0 };
    assert!(config.validate().is_ok());

    let mut config = SolverConfig::default();
    config.max_step_displacement = Some(0.0);
    assert_eq!(config.validate(), Err(SolverError::InvalidCoefficient));
}

#[test]
fn test_error_display_is_informative() {
    let message = format!("{}", SolverError::ParticleNotFound(42));
    assert!(message.contains("42"));
}
