//! Experiment driver and its records
//!
//! ## Data Model
//!
//! ```text
//! Experiment ──> ExperimentRun ──< TimingRecord (one per core configuration)
//!                                        │
//!                                    ResultSet (ordered, consumed by reports)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use coreperf::experiment::{Experiment, ExperimentConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = ExperimentConfig::builder().total_cores(4).build()?;
//! let results = Experiment::new(config).run(&mut StdRng::seed_from_u64(42))?;
//! assert_eq!(results.core_counts(), vec![1, 2, 4]);
//! # Ok::<(), coreperf::Error>(())
//! ```

mod config;
mod driver;
mod result_set;
mod timing_record;

pub use config::{ExperimentConfig, ExperimentConfigBuilder};
pub use driver::{DriverState, Experiment, ExperimentRun};
pub use result_set::ResultSet;
pub use timing_record::{TimingRecord, CORES_LABEL, LABELS};
