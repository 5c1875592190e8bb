mod shared_particles;
mod task_executor;

pub use shared_particles::*;
pub use task_executor::*;
