mod spatial_grid;

pub use spatial_grid::*;
