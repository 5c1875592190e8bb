mod box_obstacle;
mod dot;
mod motion;
mod obstacle;

pub use box_obstacle::*;
pub use dot::*;
pub use motion::*;
pub use obstacle::*;

#[cfg(test)]
mod motion_tests;
