//! Fixed-size worker pool for data-parallel maps over contiguous index ranges.
//!
//! Inputs are split into `workers` disjoint ranges of equal length (the last range absorbs the
//! remainder). Each range is handed to exactly one task; tasks only read their own input range
//! and only write their own output range, so no synchronization beyond the final join is needed.

use std::{num::NonZeroUsize, ops::Range};

use crate::foundation::error::{OverlayError, OverlayResult};

/// Number of hardware execution units, at least 1.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Split `0..len` into `workers` contiguous ranges of `len / workers` items each, with the final
/// range extended to `len`.
///
/// A `workers` of 0 is treated as 1. When `len < workers` all but the last range are empty.
pub fn chunk_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let step = len / workers;
    (0..workers)
        .map(|i| {
            let start = i * step;
            let end = if i == workers - 1 { len } else { start + step };
            start..end
        })
        .collect()
}

/// Reusable worker pool; build once and call [`ChunkPool::map_into`] as often as needed.
pub struct ChunkPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl std::fmt::Debug for ChunkPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkPool")
            .field("workers", &self.workers)
            .finish()
    }
}

impl ChunkPool {
    /// Build a pool with `threads` workers, or one per hardware execution unit when `None`.
    pub fn new(threads: Option<usize>) -> OverlayResult<Self> {
        if let Some(n) = threads
            && n == 0
        {
            return Err(OverlayError::validation(
                "worker count must be >= 1 when set",
            ));
        }

        let workers = threads.unwrap_or_else(available_workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("yuv-overlay-worker-{i}"))
            .build()
            .map_err(pool_build_error)?;
        Ok(Self { pool, workers })
    }

    /// Number of workers (and chunks per map).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Write `f(&src[i])` into `dst[i]` for every index, one task per chunk, blocking until all
    /// tasks have finished.
    pub fn map_into<T, U, F>(&self, src: &[T], dst: &mut [U], f: F) -> OverlayResult<()>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        if src.len() != dst.len() {
            return Err(OverlayError::validation(format!(
                "map_into expects equal-length buffers, got {} and {}",
                src.len(),
                dst.len()
            )));
        }

        let ranges = chunk_ranges(src.len(), self.workers);
        let mut jobs = Vec::with_capacity(ranges.len());
        let mut rest = dst;
        for range in ranges {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            jobs.push((range, head));
            rest = tail;
        }

        let f = &f;
        self.pool.scope(|s| {
            for (range, out) in jobs {
                let input = &src[range.clone()];
                s.spawn(move |_| {
                    tracing::trace!(start = range.start, end = range.end, "map chunk");
                    for (o, i) in out.iter_mut().zip(input) {
                        *o = f(i);
                    }
                });
            }
        });
        Ok(())
    }
}

fn pool_build_error(e: rayon::ThreadPoolBuildError) -> OverlayError {
    OverlayError::Other(anyhow::Error::new(e).context("failed to build rayon thread pool"))
}

#[cfg(test)]
#[path = "../tests/unit/parallel.rs"]
mod tests;
