use std::marker::PhantomData;
use crate::models::Particle;

/// Shared mutable view of the particle store for the grid-partitioned passes.
///
/// Collision tasks address particles by identifier, and a single contact writes to two
/// particles that may live in neighboring grid columns, so the store cannot be split
/// into disjoint slices up front. Instead every task is restricted to the particles
/// filed in a set of grid columns, and the scheduler guarantees that no two tasks running
/// at the same time own the same or adjacent columns.
pub struct SharedParticles<'a> {
    ptr: *mut Particle,
    len: usize,
    _store: PhantomData<&'a mut [Particle]>,
}

// SAFETY: the view is only handed to tasks whose particle sets are disjoint (see `get_mut`).
unsafe impl Send for SharedParticles<'_> {}
unsafe impl Sync for SharedParticles<'_> {}

impl<'a> SharedParticles<'a> {
    pub fn new(particles: &'a mut [Particle]) -> Self {
        SharedParticles {
            ptr: particles.as_mut_ptr(),
            len: particles.len(),
            _store: PhantomData,
        }
    }

    /// Mutable access to the particle with identifier `id`, or `None` if out of range.
    ///
    /// # Safety
    ///
    /// No other live reference to the same particle may exist, on this thread or any
    /// other, while the returned reference is alive.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_mut(&self, id: usize) -> Option<&mut Particle> {
        if id >= self.len {
            return None;
        }
        Some(&mut *self.ptr.add(id))
    }

    /// Mutable access to two distinct particles at once.
    ///
    /// # Safety
    ///
    /// Same contract as [`SharedParticles::get_mut`] for both identifiers.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_pair_mut(&self, first: usize, second: usize) -> Option<(&mut Particle, &mut Particle)> {
        if first == second || first >= self.len || second >= self.len {
            return None;
        }
        Some((&mut *self.ptr.add(first), &mut *self.ptr.add(second)))
    }
}
