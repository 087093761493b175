//! # coreperf: CPU Scaling Benchmark Harness
//!
//! coreperf measures how three CPU-bound workloads scale with the number of
//! cores they may use, then reports the timings as a CSV table and a grouped
//! bar chart.
//!
//! ## Pipeline
//!
//! ```text
//! available_cores ──> CoreConfigurations {1, total/2, total}
//!                            │
//!                            ▼  per configuration, under a CoreLimit
//!              ┌─────────────┼──────────────┐
//!           QuickSort   DenseMultiply   TableAggregation
//!              └─────────────┼──────────────┘
//!                            ▼
//!                   TimingRecord ──> ResultSet ──> Reporter (CSV + PNG)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use coreperf::experiment::{Experiment, ExperimentConfig};
//! use coreperf::report::Reporter;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let experiment = Experiment::new(ExperimentConfig::default());
//! let results = experiment.run(&mut StdRng::from_entropy())?;
//!
//! let paths = Reporter::new(".").report(&results)?;
//! println!("Results saved to {}", paths.csv.display());
//! # Ok::<(), coreperf::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod backend;
pub mod error;
pub mod experiment;
pub mod limiter;
pub mod report;
pub mod workload;

pub use error::{Error, Result};

/// Kernel selection for the dense multiply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Pick by inner dimension (see [`backend::BackendDispatcher`])
    CostBased,
    /// Force the scalar loop
    Scalar,
    /// Force SIMD dot products
    Simd,
}
