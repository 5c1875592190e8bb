mod color;
mod particle;
mod vector_2d;

pub use color::*;
pub use particle::*;
pub use vector_2d::*;
