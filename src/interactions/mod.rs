mod border;
mod obstacle_collisions;
mod particle_collisions;

pub use border::*;
pub use obstacle_collisions::*;
pub use particle_collisions::*;

#[cfg(test)]
mod obstacle_collisions_tests;
