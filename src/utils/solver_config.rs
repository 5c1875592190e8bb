// src/utils/solver_config.rs
use crate::models::Vector2;
use crate::utils::{DEFAULT_SOLVER_CONFIG, SolverError};

/// World boundary applied to every particle once per sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderPolicy {
    /// Axis-aligned box spanning `[0, world_size]` on both axes.
    Rectangular,
    /// Circle with the given center and radius.
    Circular { center: Vector2, radius: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Width and height of the simulated world. Also sizes the spatial grid.
    pub world_size: Vector2,
    /// Uniform particle radius the grid is built for; the cell size is twice this value.
    pub particle_radius: f64,
    /// Duration of one rendered frame in seconds.
    pub frame_dt: f64,
    /// Number of fixed sub-steps per frame.
    pub sub_steps: u32,
    pub gravity: Vector2,
    pub border: BorderPolicy,
    /// Scale applied to the reflected velocity component at the border.
    pub border_dampening: f64,
    /// Scale applied to the reflected velocity component at obstacles.
    pub obstacle_dampening: f64,
    /// `k` in the pointer pull/push acceleration `k * max(0, R - d)`.
    pub pointer_strength: f64,
    /// Zero a particle's velocity when its per-step displacement exceeds this length.
    pub max_step_displacement: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        DEFAULT_SOLVER_CONFIG
    }
}

impl SolverConfig {
    pub fn new(
        world_size: Option<Vector2>,
        particle_radius: Option<f64>,
        frame_dt: Option<f64>,
        sub_steps: Option<u32>,
        gravity: Option<Vector2>,
        border: Option<BorderPolicy>,
    ) -> Self {
        let default = DEFAULT_SOLVER_CONFIG;
        Self {
            world_size: world_size.unwrap_or(default.world_size),
            particle_radius: particle_radius.unwrap_or(default.particle_radius),
            frame_dt: frame_dt.unwrap_or(default.frame_dt),
            sub_steps: sub_steps.unwrap_or(default.sub_steps),
            gravity: gravity.unwrap_or(default.gravity),
            border: border.unwrap_or(default.border),
            ..default
        }
    }

    /// Duration of a single sub-step.
    ///
    /// # Example
    /// ```
    /// use rs_verlet::utils::SolverConfig;
    ///
    /// let config = SolverConfig::default();
    /// assert!((config.step_dt() - 1.0 / 480.0).abs() < 1e-12);
    /// ```
    pub fn step_dt(&self) -> f64 {
        self.frame_dt / self.sub_steps as f64
    }

    /// Edge length of a grid cell: one particle diameter.
    pub fn cell_size(&self) -> f64 {
        2.0 * self.particle_radius
    }

    /// Checks that the configuration describes a world the solver can run.
    ///
    /// # Errors
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.particle_radius.is_finite() || self.particle_radius <= 0.0 {
            return Err(SolverError::InvalidRadius);
        }
        if !self.frame_dt.is_finite() || self.frame_dt <= 0.0 {
            return Err(SolverError::InvalidTime);
        }
        if self.sub_steps == 0 {
            return Err(SolverError::InvalidSubSteps);
        }
        let cell = self.cell_size();
        if !self.world_size.is_finite() || self.world_size.x < cell || self.world_size.y < cell {
            return Err(SolverError::InvalidWorldSize);
        }
        if !self.gravity.is_finite() {
            return Err(SolverError::InvalidCoefficient);
        }
        if let BorderPolicy::Circular { center, radius } = self.border {
            if !center.is_finite() || !radius.is_finite() || radius <= self.particle_radius {
                return Err(SolverError::InvalidRadius);
            }
            // The grid only covers [0, world_size]; particles outside it never collide.
            let fits = center.x - radius >= 0.0
                && center.y - radius >= 0.0
                && center.x + radius <= self.world_size.x
                && center.y + radius <= self.world_size.y;
            if !fits {
                return Err(SolverError::InvalidRadius);
            }
        }
        for coefficient in [self.border_dampening, self.obstacle_dampening, self.pointer_strength] {
            if !coefficient.is_finite() || coefficient < 0.0 {
                return Err(SolverError::InvalidCoefficient);
            }
        }
        if let Some(limit) = self.max_step_displacement {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(SolverError::InvalidCoefficient);
            }
        }
        Ok(())
    }
}
