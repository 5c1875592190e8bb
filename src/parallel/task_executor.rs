//! Fixed-size worker pool used by the solver for every parallel section.
//!
//! The executor wraps a dedicated Rayon thread pool rather than the global one so the
//! solver's worker count is explicit and the pool can be shared between components by
//! handing out an `Arc<TaskExecutor>`.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use rs_verlet::parallel::TaskExecutor;
//!
//! let executor = TaskExecutor::new(4).expect("Failed to build executor");
//! let counter = AtomicUsize::new(0);
//! executor.execute(|batch| {
//!     for _ in 0..10 {
//!         let counter = &counter;
//!         batch.submit(move || {
//!             counter.fetch_add(1, Ordering::Relaxed);
//!         });
//!     }
//! });
//! // `execute` only returns once every submitted task has finished.
//! assert_eq!(counter.load(Ordering::Relaxed), 10);
//! ```
use std::ops::Range;
use log::info;
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use crate::utils::SolverError;

pub struct TaskExecutor {
    pool: ThreadPool,
    num_workers: usize,
}

/// Handle for queueing tasks inside [`TaskExecutor::execute`].
pub struct TaskBatch<'a, 'scope> {
    scope: &'a Scope<'scope>,
}

impl<'scope> TaskBatch<'_, 'scope> {
    /// Queues `task` on the pool. It may start immediately.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'scope,
    {
        self.scope.spawn(move |_| task());
    }
}

impl TaskExecutor {
    /// Builds a pool with `num_workers` threads.
    ///
    /// # Errors
    ///
    /// Returns `ThreadPool` if `num_workers` is zero or the threads cannot be spawned.
    pub fn new(num_workers: usize) -> Result<Self, SolverError> {
        if num_workers == 0 {
            return Err(SolverError::ThreadPool("at least one worker is required".to_string()));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|index| format!("verlet-worker-{}", index))
            .build()
            .map_err(|e| SolverError::ThreadPool(e.to_string()))?;
        info!("Started task executor with {} workers", num_workers);
        Ok(TaskExecutor { pool, num_workers })
    }

    /// Builds a pool sized to the machine's available parallelism.
    pub fn with_available_parallelism() -> Result<Self, SolverError> {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Runs `op`, which may submit any number of tasks, and blocks until all of them
    /// have completed. This is the wait-all barrier between parallel sections.
    pub fn execute<'scope, OP>(&self, op: OP)
    where
        OP: FnOnce(&TaskBatch<'_, 'scope>) + Send,
    {
        self.pool.scope(|scope| op(&TaskBatch { scope }));
    }

    /// Splits `0..count` evenly across the workers and calls `task(start, end)` once per
    /// non-empty range, in parallel. Returns after every range is processed.
    pub fn parallel<F>(&self, count: usize, task: F)
    where
        F: Fn(usize, usize) + Sync,
    {
        let task = &task;
        self.execute(|batch| {
            for range in split_range(count, self.num_workers) {
                batch.submit(move || task(range.start, range.end));
            }
        });
    }

    /// Hands each worker a disjoint contiguous chunk of `items` together with the index
    /// of the chunk's first element.
    pub fn for_each_chunk_mut<T, F>(&self, items: &mut [T], task: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        let task = &task;
        let ranges = split_range(items.len(), self.num_workers);
        self.execute(|batch| {
            let mut rest = items;
            let mut consumed = 0;
            for range in ranges {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.end - consumed);
                rest = tail;
                consumed = range.end;
                let start = range.start;
                batch.submit(move || task(start, chunk));
            }
        });
    }
}

/// Splits `0..count` into at most `parts` contiguous, non-empty ranges whose lengths
/// differ by at most one.
///
/// # Example
/// ```
/// use rs_verlet::parallel::split_range;
///
/// assert_eq!(split_range(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(split_range(2, 4), vec![0..1, 1..2]);
/// assert!(split_range(0, 4).is_empty());
/// ```
pub fn split_range(count: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1).min(count);
    if parts == 0 {
        return Vec::new();
    }
    let base = count / parts;
    let remainder = count % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let len = base + usize::from(part < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
