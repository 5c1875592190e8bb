//! Particle-particle broad and narrow phase.
//!
//! The broad phase walks the spatial grid column by column. Every occupied cell is
//! paired with itself and the four forward neighbors in `NEIGHBOR_OFFSETS`, which visits
//! each unordered pair of adjacent cells exactly once. The narrow phase separates
//! overlapping pairs by moving their positions only; because velocity is the Verlet
//! position delta, the correction doubles as the collision response.
use std::ops::Range;
use crate::grid::SpatialGrid;
use crate::models::{CellCoord, Particle, Vector2};
use crate::parallel::SharedParticles;
use crate::utils::NEIGHBOR_OFFSETS;

/// Narrowest column slab the two-pass schedule may use. A slab task writes to the column
/// on each side of its own range, so slabs of the same parity must be at least one full
/// column apart.
pub const MIN_SLAB_WIDTH: usize = 2;

/// Separates two particles if they overlap. Returns `true` when a correction was applied.
///
/// The overlap is removed completely and split by radius: `first` moves
/// `overlap * r2 / (r1 + r2)` and `second` moves `overlap * r1 / (r1 + r2)` the opposite
/// way, so the larger particle moves less. Coincident particles are pushed apart along
/// the x axis.
///
/// # Examples
///
/// ```
/// use rs_verlet::interactions::resolve_pair;
/// use rs_verlet::models::{Particle, Vector2};
///
/// let mut a = Particle::new(0, Vector2::new(0.0, 0.0), 5.0).unwrap();
/// let mut b = Particle::new(1, Vector2::new(7.0, 0.0), 5.0).unwrap();
/// assert!(resolve_pair(&mut a, &mut b));
/// assert!(((b.position - a.position).length() - 10.0).abs() < 1e-9);
/// ```
pub fn resolve_pair(first: &mut Particle, second: &mut Particle) -> bool {
    let offset = first.position - second.position;
    let combined = first.radius + second.radius;
    if offset.length_squared() >= combined * combined {
        return false;
    }
    let (normal, distance) = offset.normalized_or(Vector2::new(1.0, 0.0));
    let overlap = combined - distance;
    first.translate(normal * (overlap * second.radius / combined));
    second.translate(-normal * (overlap * first.radius / combined));
    true
}

/// Tests every pair between two cells. When `cell == other` only unordered pairs inside
/// the cell are tested.
///
/// # Safety
///
/// The caller must have exclusive access to every particle filed in both cells for the
/// duration of the call.
pub unsafe fn collide_cells(
    particles: &SharedParticles,
    grid: &SpatialGrid,
    cell: CellCoord,
    other: CellCoord,
) -> usize {
    let ids = grid.cell(cell.0, cell.1);
    let same_cell = cell == other;
    let other_ids = grid.cell(other.0, other.1);
    let mut resolved = 0;
    for (i, &first) in ids.iter().enumerate() {
        let candidates = if same_cell { &other_ids[i + 1..] } else { other_ids };
        for &second in candidates {
            if let Some((a, b)) = particles.get_pair_mut(first, second) {
                if resolve_pair(a, b) {
                    resolved += 1;
                }
            }
        }
    }
    resolved
}

/// Runs the broad and narrow phase for every cell in `columns`.
///
/// # Safety
///
/// While this runs, no other task may touch particles filed in columns
/// `columns.start - 1 ..= columns.end`.
pub unsafe fn collide_columns(particles: &SharedParticles, grid: &SpatialGrid, columns: Range<usize>) -> usize {
    let mut resolved = 0;
    for column in columns {
        let column = column as i64;
        for row in 0..grid.rows() as i64 {
            if grid.cell(column, row).is_empty() {
                continue;
            }
            for (dc, dr) in NEIGHBOR_OFFSETS {
                let neighbor = (column + dc, row + dr);
                if !grid.contains(neighbor) {
                    continue;
                }
                resolved += collide_cells(particles, grid, (column, row), neighbor);
            }
        }
    }
    resolved
}

/// Groups `columns` into contiguous slabs for the two-pass schedule.
///
/// Aims for two slabs per worker and never makes a slab narrower than
/// `MIN_SLAB_WIDTH`, except possibly the last one. Even-indexed slabs run together in
/// the first pass and odd-indexed slabs in the second.
///
/// # Example
/// ```
/// use rs_verlet::interactions::column_slabs;
///
/// assert_eq!(column_slabs(10, 2), vec![0..3, 3..6, 6..9, 9..10]);
/// assert_eq!(column_slabs(5, 8), vec![0..2, 2..4, 4..5]);
/// ```
pub fn column_slabs(columns: usize, workers: usize) -> Vec<Range<usize>> {
    let slab_count = 2 * workers.max(1);
    let width = columns.div_ceil(slab_count).max(MIN_SLAB_WIDTH);
    (0..columns)
        .step_by(width)
        .map(|start| start..(start + width).min(columns))
        .collect()
}
