// demos/falling_particles.rs

use std::error::Error;
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::Arc;
use std::time::Instant;
use log::info;
use rand::Rng;
use rs_verlet::forces::GravityDirection;
use rs_verlet::models::{Color, Vector2};
use rs_verlet::obstacles::{BoxBehavior, MotionProfile};
use rs_verlet::parallel::TaskExecutor;
use rs_verlet::solver::Solver;
use rs_verlet::utils::{BorderPolicy, SolverConfig};

const WORLD: f64 = 840.0;
const SPAWN_POSITION: Vector2 = Vector2::new(420.0, 120.0);
const SPAWN_SPEED: f64 = 400.0;
const SPAWNS_PER_FRAME: usize = 4;
const MAX_PARTICLES: usize = 3000;
const FRAMES: u64 = 900;

fn rainbow(t: f64) -> Color {
    let channel = |phase: f64| {
        let s = (t + phase * 2.0 * PI).sin();
        (255.0 * s * s) as u8
    };
    Color::rgb(channel(0.0), channel(0.33), channel(0.66))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = SolverConfig {
        world_size: Vector2::new(WORLD, WORLD),
        particle_radius: 5.0,
        border: BorderPolicy::Circular {
            center: Vector2::new(WORLD / 2.0, WORLD / 2.0),
            radius: WORLD / 2.0 - 20.0,
        },
        ..SolverConfig::default()
    };
    let executor = Arc::new(TaskExecutor::with_available_parallelism()?);
    let mut solver = Solver::new(config, executor)?;

    // A sweeping dot across the middle and a spinning paddle below it.
    let dot = solver.add_dot_obstacle(30.0, Vector2::new(250.0, 420.0), Vector2::new(590.0, 420.0))?;
    dot.color = Color::MAGENTA;
    let paddle = solver.add_box_obstacle(Vector2::new(160.0, 16.0), Vector2::new(420.0, 560.0), Vector2::new(420.0, 560.0))?;
    paddle.kinematics.profile = MotionProfile::Stationary;
    paddle.rotation_speed = 0.8;
    let wall = solver.add_box_obstacle(Vector2::new(120.0, 20.0), Vector2::new(300.0, 680.0), Vector2::new(540.0, 680.0))?;
    wall.set_durability(400);
    wall.color = Color::RED;
    let goal = solver.add_box_obstacle(Vector2::new(60.0, 20.0), Vector2::new(420.0, 770.0), Vector2::new(420.0, 770.0))?;
    goal.behavior = BoxBehavior::Goal { target: SPAWN_POSITION };
    goal.color = Color::GREEN;

    let mut rng = rand::rng();
    let started = Instant::now();
    for frame in 0..FRAMES {
        for _ in 0..SPAWNS_PER_FRAME {
            if solver.particle_count() >= MAX_PARTICLES {
                break;
            }
            let t = solver.time();
            let jitter = Vector2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
            let radius = rng.random_range(3.0..5.0);
            let id = solver.add_particle(SPAWN_POSITION + jitter, radius)?;
            let angle = FRAC_PI_2 + 0.5 * PI * (3.0 * t).sin();
            solver.set_velocity(id, Vector2::new(angle.cos(), angle.sin()) * SPAWN_SPEED)?;
            solver.set_particle_color(id, rainbow(t))?;
        }

        // Stand-ins for pointer and keyboard input.
        if frame % 240 == 120 {
            solver.apply_push(Vector2::new(420.0, 700.0), 150.0)?;
        }
        if frame == FRAMES / 2 {
            solver.toggle_gravity(GravityDirection::Left);
        }
        if frame == FRAMES / 2 + 60 {
            solver.toggle_gravity(GravityDirection::Down);
        }

        solver.advance_frame();

        if frame % 60 == 0 {
            let snapshot = solver.snapshot();
            let broken = snapshot.obstacles.iter().filter(|o| !o.active).count();
            info!(
                "t={:.2}s particles={} broken obstacles={} elapsed={:.1}ms/frame",
                snapshot.time,
                snapshot.particles.len(),
                broken,
                started.elapsed().as_secs_f64() * 1000.0 / (frame + 1) as f64
            );
        }
    }

    let wall = solver.obstacles()[2].as_box().map(|b| b.durability).unwrap_or_default();
    println!("Simulated {:.2}s with {} particles", solver.time(), solver.particle_count());
    println!("Breakable wall durability left: {}", wall);
    println!("Average frame time: {:.2}ms", started.elapsed().as_secs_f64() * 1000.0 / FRAMES as f64);
    Ok(())
}
