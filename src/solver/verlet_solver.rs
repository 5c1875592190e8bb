//! Frame driver for the particle simulation.
//!
//! A [`Solver`] owns the particle store, the obstacle registry and the spatial grid, and
//! advances them in fixed sub-steps. Every sub-step runs the same phases in order:
//!
//! 1. gravity and the frame's queued pointer forces
//! 2. particle-particle collisions, two passes over alternating column slabs
//! 3. obstacle collisions, partitioned by grid column
//! 4. durability bookkeeping for breakable boxes
//! 5. border constraint
//! 6. integration and refresh of the cached grid cell
//! 7. obstacle motion
//! 8. grid rebuild
//!
//! Phases 1, 2, 3, 5 and 6 run on the injected [`TaskExecutor`]; each returns only once
//! all of its tasks have finished.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rs_verlet::models::Vector2;
//! use rs_verlet::parallel::TaskExecutor;
//! use rs_verlet::solver::Solver;
//! use rs_verlet::utils::SolverConfig;
//!
//! let executor = Arc::new(TaskExecutor::new(2).expect("Failed to build executor"));
//! let mut solver = Solver::new(SolverConfig::default(), executor).expect("valid config");
//! let id = solver.add_particle(Vector2::new(100.0, 100.0), 4.0).expect("valid particle");
//! solver.advance_frame();
//! // Gravity points down (+y) by default.
//! assert!(solver.particles()[id].position.y > 100.0);
//! ```
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use log::{debug, info, trace, warn};
use crate::forces::{Gravity, GravityDirection, PointForce, PointerMode};
use crate::grid::SpatialGrid;
use crate::interactions::{apply_border, collide_columns, collide_obstacles_in_columns, column_slabs};
use crate::models::{Color, Particle, Vector2};
use crate::obstacles::{BoxObstacle, DotObstacle, Obstacle};
use crate::parallel::{SharedParticles, TaskExecutor};
use crate::solver::FrameSnapshot;
use crate::utils::{SolverConfig, SolverError};

pub struct Solver {
    config: SolverConfig,
    executor: Arc<TaskExecutor>,
    particles: Vec<Particle>,
    obstacles: Vec<Obstacle>,
    /// One flag per obstacle, set when it was touched during the current sub-step.
    contacts: Vec<AtomicBool>,
    grid: SpatialGrid,
    gravity: Gravity,
    /// Pointer forces applied during every sub-step of the next frame.
    pointer_forces: Vec<PointForce>,
    time: f64,
    frame: u64,
}

impl Solver {
    /// Creates an empty world.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field of `config` (see [`SolverConfig::validate`]).
    pub fn new(config: SolverConfig, executor: Arc<TaskExecutor>) -> Result<Self, SolverError> {
        config.validate()?;
        let grid = SpatialGrid::new(config.world_size, config.cell_size())?;
        info!(
            "Created solver: {}x{} grid of {} unit cells, {} sub-steps of {:.6}s, {} workers",
            grid.columns(),
            grid.rows(),
            grid.cell_size(),
            config.sub_steps,
            config.step_dt(),
            executor.num_workers()
        );
        Ok(Solver {
            config,
            executor,
            particles: Vec::new(),
            obstacles: Vec::new(),
            contacts: Vec::new(),
            grid,
            gravity: Gravity::new(config.gravity),
            pointer_forces: Vec::new(),
            time: 0.0,
            frame: 0,
        })
    }

    /// Adds a resting particle and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRadius` if `radius` is not positive or exceeds the configured
    /// particle radius the grid was sized for, and `InvalidCoefficient` for a non-finite
    /// position.
    pub fn add_particle(&mut self, position: Vector2, radius: f64) -> Result<usize, SolverError> {
        if radius > self.config.particle_radius {
            warn!(
                "Rejected particle radius {} larger than the grid radius {}",
                radius, self.config.particle_radius
            );
            return Err(SolverError::InvalidRadius);
        }
        if !position.is_finite() {
            warn!("Rejected particle at non-finite position {:?}", position);
            return Err(SolverError::InvalidCoefficient);
        }
        let id = self.particles.len();
        let mut particle = Particle::new(id, position, radius).inspect_err(|e| warn!("Rejected particle: {}", e))?;
        particle.refresh_cell(self.grid.cell_size());
        if !self.grid.insert(id, particle.cell) {
            debug!("Particle {} spawned outside the grid at {:?}", id, position);
        }
        self.particles.push(particle);
        Ok(id)
    }

    /// Adds a dot obstacle travelling between `start` and `end` and returns it for further
    /// setup (color, period, profile, phase).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRadius` unless `radius` is positive and finite.
    pub fn add_dot_obstacle(&mut self, radius: f64, start: Vector2, end: Vector2) -> Result<&mut DotObstacle, SolverError> {
        let dot = DotObstacle::new(radius, start, end).inspect_err(|e| warn!("Rejected dot obstacle: {}", e))?;
        self.obstacles.push(Obstacle::Dot(dot));
        self.contacts.push(AtomicBool::new(false));
        match self.obstacles.last_mut() {
            Some(Obstacle::Dot(dot)) => Ok(dot),
            _ => unreachable!("a dot obstacle was just pushed"),
        }
    }

    /// Adds a box obstacle centered on `start`, travelling towards `end`, and returns it for
    /// further setup (durability, behavior, rotation, color, period, profile, phase).
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` unless both dimensions are positive and finite.
    pub fn add_box_obstacle(&mut self, dimensions: Vector2, start: Vector2, end: Vector2) -> Result<&mut BoxObstacle, SolverError> {
        let obstacle = BoxObstacle::new(dimensions, start, end).inspect_err(|e| warn!("Rejected box obstacle: {}", e))?;
        self.obstacles.push(Obstacle::Box(obstacle));
        self.contacts.push(AtomicBool::new(false));
        match self.obstacles.last_mut() {
            Some(Obstacle::Box(obstacle)) => Ok(obstacle),
            _ => unreachable!("a box obstacle was just pushed"),
        }
    }

    pub fn set_particle_color(&mut self, id: usize, color: Color) -> Result<(), SolverError> {
        let particle = self.particles.get_mut(id).ok_or(SolverError::ParticleNotFound(id))?;
        particle.color = color;
        Ok(())
    }

    /// Places a particle at `position` at rest and files it under its new cell at once.
    ///
    /// # Errors
    ///
    /// Returns `ParticleNotFound` for an unknown id and `InvalidCoefficient` for a
    /// non-finite position.
    pub fn teleport(&mut self, id: usize, position: Vector2) -> Result<(), SolverError> {
        if !position.is_finite() {
            warn!("Rejected teleport of particle {} to non-finite position {:?}", id, position);
            return Err(SolverError::InvalidCoefficient);
        }
        let cell_size = self.grid.cell_size();
        let particle = self.particles.get_mut(id).ok_or(SolverError::ParticleNotFound(id))?;
        particle.teleport(position);
        particle.refresh_cell(cell_size);
        self.grid.rebuild(&self.particles);
        Ok(())
    }

    pub fn obstacle_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(index)
    }

    /// Sets a particle's velocity in world units per second.
    ///
    /// # Errors
    ///
    /// Returns `ParticleNotFound` for an unknown id and `InvalidCoefficient` for a
    /// non-finite velocity.
    pub fn set_velocity(&mut self, id: usize, velocity: Vector2) -> Result<(), SolverError> {
        if !velocity.is_finite() {
            warn!("Rejected non-finite velocity {:?} for particle {}", velocity, id);
            return Err(SolverError::InvalidCoefficient);
        }
        let dt = self.config.step_dt();
        let particle = self.particles.get_mut(id).ok_or(SolverError::ParticleNotFound(id))?;
        particle.set_velocity(velocity, dt);
        Ok(())
    }

    /// A particle's velocity in world units per second.
    pub fn velocity(&self, id: usize) -> Result<Vector2, SolverError> {
        self.particles
            .get(id)
            .map(|particle| particle.velocity(self.config.step_dt()))
            .ok_or(SolverError::ParticleNotFound(id))
    }

    /// Draws particles within `radius` of `point` towards it during the next frame.
    pub fn apply_pull(&mut self, point: Vector2, radius: f64) -> Result<(), SolverError> {
        self.queue_pointer_force(point, radius, PointerMode::Pull)
    }

    /// Drives particles within `radius` of `point` away from it during the next frame.
    pub fn apply_push(&mut self, point: Vector2, radius: f64) -> Result<(), SolverError> {
        self.queue_pointer_force(point, radius, PointerMode::Push)
    }

    fn queue_pointer_force(&mut self, point: Vector2, radius: f64, mode: PointerMode) -> Result<(), SolverError> {
        let force = PointForce::new(point, radius, mode).inspect_err(|e| warn!("Rejected pointer force: {}", e))?;
        self.pointer_forces.push(force);
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: Vector2) -> Result<(), SolverError> {
        self.gravity.set(gravity)
    }

    /// Points gravity along `direction`, keeping its current strength.
    pub fn toggle_gravity(&mut self, direction: GravityDirection) {
        self.gravity.toggle(direction);
        debug!("Gravity toggled to {:?}", self.gravity.acceleration());
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity.acceleration()
    }

    /// Runs one frame: `sub_steps` sub-steps, then drops the queued pointer forces.
    pub fn advance_frame(&mut self) {
        let mut resolved = 0;
        for _ in 0..self.config.sub_steps {
            resolved += self.run_sub_step();
        }
        self.pointer_forces.clear();
        self.frame += 1;
        debug!(
            "Frame {} done at t={:.4}s: {} particles, {} pair corrections",
            self.frame,
            self.time,
            self.particles.len(),
            resolved
        );
    }

    /// Runs a single sub-step. Pointer forces stay queued until the frame ends.
    pub fn step(&mut self) {
        self.run_sub_step();
    }

    fn run_sub_step(&mut self) -> usize {
        let dt = self.config.step_dt();
        self.apply_forces();
        let resolved = self.solve_particle_collisions();
        self.solve_obstacle_collisions();
        self.register_obstacle_contacts();
        self.apply_border();
        self.integrate(dt);
        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }
        let excluded = self.grid.rebuild(&self.particles);
        if excluded > 0 {
            debug!("{} particles outside the grid were not filed", excluded);
        }
        self.time += dt;
        trace!("Sub-step at t={:.5}s resolved {} pairs", self.time, resolved);
        resolved
    }

    fn apply_forces(&mut self) {
        let gravity = self.gravity;
        let pointer_forces = &self.pointer_forces;
        let strength = self.config.pointer_strength;
        self.executor.for_each_chunk_mut(&mut self.particles, |_, chunk| {
            for particle in chunk {
                gravity.apply(particle);
                for force in pointer_forces {
                    force.apply(particle, strength);
                }
            }
        });
    }

    fn solve_particle_collisions(&mut self) -> usize {
        let slabs = column_slabs(self.grid.columns(), self.executor.num_workers());
        let grid = &self.grid;
        let resolved = AtomicUsize::new(0);
        let shared = SharedParticles::new(&mut self.particles);
        for parity in 0..2 {
            self.executor.execute(|batch| {
                for slab in slabs.iter().skip(parity).step_by(2) {
                    let (shared, resolved, slab) = (&shared, &resolved, slab.clone());
                    batch.submit(move || {
                        // SAFETY: slabs of one parity are separated by a slab at least two
                        // columns wide, so the columns each task writes never meet.
                        let count = unsafe { collide_columns(shared, grid, slab) };
                        resolved.fetch_add(count, Ordering::Relaxed);
                    });
                }
            });
        }
        resolved.into_inner()
    }

    fn solve_obstacle_collisions(&mut self) {
        if self.obstacles.is_empty() {
            return;
        }
        let grid = &self.grid;
        let obstacles = &self.obstacles;
        let contacts = &self.contacts;
        let dampening = self.config.obstacle_dampening;
        let shared = SharedParticles::new(&mut self.particles);
        self.executor.parallel(grid.columns(), |start, end| {
            // SAFETY: a particle is filed in exactly one column and the ranges are disjoint.
            unsafe { collide_obstacles_in_columns(&shared, grid, obstacles, contacts, start..end, dampening) };
        });
    }

    fn register_obstacle_contacts(&mut self) {
        for (index, (obstacle, contact)) in self.obstacles.iter_mut().zip(&self.contacts).enumerate() {
            if !contact.swap(false, Ordering::Relaxed) {
                continue;
            }
            if let Some(obstacle) = obstacle.as_box_mut() {
                let was_active = obstacle.is_active();
                obstacle.register_contact();
                if was_active && !obstacle.is_active() {
                    debug!("Box obstacle {} broke", index);
                }
            }
        }
    }

    fn apply_border(&mut self) {
        let border = self.config.border;
        let world_size = self.config.world_size;
        let dampening = self.config.border_dampening;
        self.executor.for_each_chunk_mut(&mut self.particles, |_, chunk| {
            for particle in chunk {
                apply_border(particle, &border, world_size, dampening);
            }
        });
    }

    fn integrate(&mut self, dt: f64) {
        let limit = self.config.max_step_displacement;
        let cell_size = self.grid.cell_size();
        self.executor.for_each_chunk_mut(&mut self.particles, |_, chunk| {
            for particle in chunk {
                particle.integrate(dt);
                if let Some(limit) = limit {
                    if particle.displacement().length_squared() > limit * limit {
                        particle.set_displacement(Vector2::ZERO);
                    }
                }
                particle.refresh_cell(cell_size);
            }
        });
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Owned copy of the drawable state.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.time, &self.particles, &self.obstacles)
    }

    /// Simulated seconds since the solver was created.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn step_dt(&self) -> f64 {
        self.config.step_dt()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn executor(&self) -> &Arc<TaskExecutor> {
        &self.executor
    }
}
