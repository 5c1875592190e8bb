mod constants;
mod errors;
mod solver_config;

pub use constants::*;
pub use errors::*;
pub use solver_config::*;

#[cfg(test)]
mod solver_config_tests;
