//! Core limits and the list of core configurations to benchmark.
//!
//! A [`CoreLimit`] bounds parallel work through the rayon pool built from it
//! and handed to every workload. The same value can be exported as
//! `OMP_NUM_THREADS`, an advisory hint for native libraries.

use crate::{Error, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

/// Environment variable exported as the advisory thread-count hint
pub const OMP_NUM_THREADS: &str = "OMP_NUM_THREADS";

/// Number of logical cores a run is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLimit {
    cores: usize,
}

impl CoreLimit {
    /// Create a limit of `cores` threads. Zero is accepted and means
    /// "library default" for the thread pool.
    #[must_use]
    pub const fn new(cores: usize) -> Self {
        Self { cores }
    }

    /// Get the requested core count.
    #[must_use]
    pub const fn cores(&self) -> usize {
        self.cores
    }

    /// Export the limit as `OMP_NUM_THREADS` for the rest of the process.
    ///
    /// Only libraries that read the variable after this call are affected;
    /// nothing verifies that they honor it.
    pub fn export_hint(&self) {
        std::env::set_var(OMP_NUM_THREADS, self.cores.to_string());
        debug!(cores = self.cores, "Exported {OMP_NUM_THREADS}");
    }

    /// Build a thread pool bounded by this limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThreadPool`] if the OS refuses to spawn the workers.
    pub fn thread_pool(&self) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.cores)
            .thread_name(|index| format!("coreperf-worker-{index}"))
            .build()
            .map_err(|e| Error::ThreadPool {
                cores: self.cores,
                reason: e.to_string(),
            })
    }
}

/// Logical cores visible to this process (at least 1).
#[must_use]
pub fn available_cores() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Ordered list of core counts to benchmark: one core, half, all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfigurations {
    counts: Vec<usize>,
}

impl CoreConfigurations {
    /// Build `{1, total / 2, total}`.
    ///
    /// Each entry is clamped to at least one core and consecutive duplicates
    /// are dropped, so `total = 1` yields `[1]` and `total = 3` yields
    /// `[1, 3]`. The first entry is always 1 and the last is always
    /// `max(total, 1)`.
    #[must_use]
    pub fn halving(total: usize) -> Self {
        let raw = [1, total / 2, total];
        let mut counts: Vec<usize> = raw.iter().map(|&count| count.max(1)).collect();
        counts.dedup();

        if counts.len() < raw.len() {
            warn!(
                total,
                requested = ?raw,
                effective = ?counts,
                "Core configurations collapsed for a small core count"
            );
        }

        Self { counts }
    }

    /// Get the core counts in run order.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if there are no configurations (never true for `halving`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over the limits in run order.
    pub fn limits(&self) -> impl Iterator<Item = CoreLimit> + '_ {
        self.counts.iter().copied().map(CoreLimit::new)
    }
}

/// Serializes tests that write process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halving_four_cores() {
        assert_eq!(CoreConfigurations::halving(4).counts(), &[1, 2, 4]);
    }

    #[test]
    fn test_halving_single_core_collapses() {
        assert_eq!(CoreConfigurations::halving(1).counts(), &[1]);
    }

    #[test]
    fn test_halving_zero_cores_clamps() {
        assert_eq!(CoreConfigurations::halving(0).counts(), &[1]);
    }

    #[test]
    fn test_halving_odd_counts() {
        assert_eq!(CoreConfigurations::halving(2).counts(), &[1, 2]);
        assert_eq!(CoreConfigurations::halving(3).counts(), &[1, 3]);
        assert_eq!(CoreConfigurations::halving(5).counts(), &[1, 2, 5]);
    }

    #[test]
    fn test_first_and_last_entries() {
        for total in 1..=64 {
            let configs = CoreConfigurations::halving(total);
            assert_eq!(configs.counts().first(), Some(&1));
            assert_eq!(configs.counts().last(), Some(&total));
        }
    }

    #[test]
    fn test_thread_pool_respects_limit() {
        let pool = CoreLimit::new(2).thread_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }

    #[test]
    fn test_export_hint_writes_core_count() {
        let _env = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        CoreLimit::new(3).export_hint();
        assert_eq!(std::env::var(OMP_NUM_THREADS).as_deref(), Ok("3"));

        CoreLimit::new(5).export_hint();
        assert_eq!(std::env::var(OMP_NUM_THREADS).as_deref(), Ok("5"));
    }

    #[test]
    fn test_available_cores_positive() {
        assert!(available_cores() >= 1);
    }
}
