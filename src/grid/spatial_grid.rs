//! Uniform spatial hash grid used as the broad phase.
//!
//! The grid covers `[0, world_size)` with square cells one particle diameter wide
//! and stores particle identifiers per cell. It is rebuilt from scratch every
//! sub-step from the coordinates cached on each particle. Every access validates
//! its coordinates, so particles that escaped the world are simply not filed.
use crate::models::{CellCoord, Particle, Vector2};
use crate::utils::SolverError;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    columns: usize,
    rows: usize,
    /// Column-major: the cells of one column are contiguous.
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Allocates a grid covering `world_size` with cells of `cell_size`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRadius` for a non-positive cell size and `InvalidWorldSize` if the
    /// world cannot hold a single cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_verlet::grid::SpatialGrid;
    /// use rs_verlet::models::Vector2;
    ///
    /// let grid = SpatialGrid::new(Vector2::new(100.0, 50.0), 10.0).unwrap();
    /// assert_eq!(grid.columns(), 10);
    /// assert_eq!(grid.rows(), 5);
    /// ```
    pub fn new(world_size: Vector2, cell_size: f64) -> Result<Self, SolverError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SolverError::InvalidRadius);
        }
        if !world_size.is_finite() || world_size.x < cell_size || world_size.y < cell_size {
            return Err(SolverError::InvalidWorldSize);
        }
        let columns = (world_size.x / cell_size).ceil() as usize;
        let rows = (world_size.y / cell_size).ceil() as usize;
        Ok(SpatialGrid {
            cell_size,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell containing `position`, which may lie outside the grid.
    pub fn cell_of(&self, position: Vector2) -> CellCoord {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.y / self.cell_size).floor() as i64,
        )
    }

    /// Storage index of a cell, or `None` when the coordinates are outside the grid.
    pub fn index(&self, column: i64, row: i64) -> Option<usize> {
        if column < 0 || row < 0 {
            return None;
        }
        let (column, row) = (column as usize, row as usize);
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(column * self.rows + row)
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell.0, cell.1).is_some()
    }

    /// Identifiers filed in a cell. Out-of-range cells are empty.
    pub fn cell(&self, column: i64, row: i64) -> &[usize] {
        match self.index(column, row) {
            Some(index) => &self.cells[index],
            None => &[],
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Files `id` under `cell`. Returns `false` and stores nothing when the cell is out of range.
    pub fn insert(&mut self, id: usize, cell: CellCoord) -> bool {
        match self.index(cell.0, cell.1) {
            Some(index) => {
                self.cells[index].push(id);
                true
            }
            None => false,
        }
    }

    /// Clears the grid and files every particle under its cached cell, keyed by its index
    /// in `particles`.
    ///
    /// Returns the number of particles left out because their cell is outside the grid.
    pub fn rebuild(&mut self, particles: &[Particle]) -> usize {
        self.clear();
        let mut excluded = 0;
        for (id, particle) in particles.iter().enumerate() {
            if !self.insert(id, particle.cell) {
                excluded += 1;
            }
        }
        excluded
    }

    /// Inclusive cell range `(first, last)` overlapped by the box `[min, max]`, clipped to
    /// the grid. `None` when the box misses the grid entirely.
    pub fn clipped_range(&self, min: Vector2, max: Vector2) -> Option<(CellCoord, CellCoord)> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let first = self.cell_of(min);
        let last = self.cell_of(max);
        let first = (first.0.max(0), first.1.max(0));
        let last = (
            last.0.min(self.columns as i64 - 1),
            last.1.min(self.rows as i64 - 1),
        );
        if first.0 > last.0 || first.1 > last.1 {
            return None;
        }
        Some((first, last))
    }

    /// Total number of filed identifiers.
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}
