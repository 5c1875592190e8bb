mod snapshot;
mod verlet_solver;

pub use snapshot::*;
pub use verlet_solver::*;
