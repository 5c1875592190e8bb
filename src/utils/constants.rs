use crate::models::Vector2;
use crate::utils::{BorderPolicy, SolverConfig};

/// Smallest separation used when normalizing a contact vector.
pub const EPSILON: f64 = 1e-6;

/// Neighbor offsets `(column, row)` visited from every cell during the broad phase.
/// Together with the reverse offsets seen from the neighbors this covers the full
/// 8-connected neighborhood exactly once.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 5] = [(0, 0), (1, 0), (1, 1), (0, 1), (-1, 1)];

pub const DEFAULT_SOLVER_CONFIG: SolverConfig = SolverConfig {
    world_size: Vector2 { x: 1260.0, y: 1260.0 },
    particle_radius: 4.0,
    frame_dt: 1.0 / 60.0,
    sub_steps: 8,
    gravity: Vector2 { x: 0.0, y: 150.0 },
    border: BorderPolicy::Rectangular,
    border_dampening: 1.0,
    obstacle_dampening: 1.0,
    pointer_strength: 300.0,
    max_step_displacement: None,
};
