//! Benchmark workloads
//!
//! Each workload generates its own input from an injected RNG and then runs
//! the measured operation. Only [`Workload::execute`] is timed; input
//! generation and dropping the output stay outside the measurement.
//!
//! ```rust
//! use coreperf::limiter::CoreLimit;
//! use coreperf::workload::{measure, sort::QuickSort};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let pool = CoreLimit::new(1).thread_pool()?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let sorted = measure(&QuickSort::new(100, 1_000), &mut rng, &pool)?;
//! assert!(sorted.output.windows(2).all(|w| w[0] <= w[1]));
//! # Ok::<(), coreperf::Error>(())
//! ```

pub mod aggregate;
pub mod matmul;
pub mod sort;

use crate::Result;
use rand::Rng;
use rayon::ThreadPool;
use std::time::{Duration, Instant};
use tracing::debug;

/// A self-generating, timed unit of work.
pub trait Workload: Sync {
    /// Generated input (excluded from timing)
    type Input: Send;
    /// Result of the measured operation
    type Output: Send;

    /// Column label used in reports
    const LABEL: &'static str;

    /// Generate a fresh input.
    ///
    /// # Errors
    ///
    /// Returns error if the input container cannot be built.
    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Self::Input>;

    /// Run the measured operation.
    ///
    /// # Errors
    ///
    /// Returns error if the input is malformed for this workload.
    fn execute(&self, input: Self::Input) -> Result<Self::Output>;
}

/// Elapsed time and output of one workload execution.
#[derive(Debug)]
pub struct Measurement<T> {
    /// Wall-clock time of `execute`
    pub elapsed: Duration,
    /// Output of `execute`
    pub output: T,
}

/// Generate an input, then time `execute` inside `pool`.
///
/// # Errors
///
/// Propagates the workload's error; no time is reported for a failed run.
pub fn measure<W: Workload, R: Rng>(
    workload: &W,
    rng: &mut R,
    pool: &ThreadPool,
) -> Result<Measurement<W::Output>> {
    let input = workload.generate(rng)?;

    let start = Instant::now();
    let output = pool.install(|| workload.execute(input))?;
    let elapsed = start.elapsed();

    debug!(
        workload = W::LABEL,
        threads = pool.current_num_threads(),
        elapsed_s = elapsed.as_secs_f64(),
        "Workload finished"
    );

    Ok(Measurement { elapsed, output })
}
