//! Experiment driver
//!
//! Walks the core configurations in order and, for each one, runs the sort,
//! dense multiply and aggregation workloads sequentially under that core
//! limit. The run is a three-state machine exposed as an iterator:
//!
//! ```text
//! Init ──> ConfigurationsRemaining ──> Done
//!                 │      ▲
//!                 └──────┘  one TimingRecord per configuration
//! ```
//!
//! The first workload error moves the run to `Done`; records produced before
//! the error are not persisted anywhere.

use super::config::ExperimentConfig;
use super::result_set::ResultSet;
use super::timing_record::TimingRecord;
use crate::limiter::{CoreConfigurations, CoreLimit};
use crate::workload::aggregate::TableAggregation;
use crate::workload::matmul::DenseMultiply;
use crate::workload::measure;
use crate::workload::sort::QuickSort;
use crate::Result;
use rand::Rng;
use tracing::{info, instrument};

/// State of an [`ExperimentRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Configurations not yet computed.
    Init,
    /// At least one configuration may still be pending.
    ConfigurationsRemaining,
    /// All configurations ran, or one failed.
    Done,
}

/// Benchmark experiment over the core configurations of a machine.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    /// Create an experiment.
    #[must_use]
    pub const fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Core configurations this experiment will run, in order.
    #[must_use]
    pub fn configurations(&self) -> CoreConfigurations {
        CoreConfigurations::halving(self.config.total_cores())
    }

    /// Start a lazy run that yields one record per configuration.
    pub fn iter<'a, R: Rng>(&'a self, rng: &'a mut R) -> ExperimentRun<'a, R> {
        ExperimentRun {
            experiment: self,
            rng,
            state: DriverState::Init,
            pending: Vec::new().into_iter(),
        }
    }

    /// Run every configuration and collect the records.
    ///
    /// # Errors
    ///
    /// Returns the first workload or thread-pool error; the whole run is
    /// aborted.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<ResultSet> {
        let mut results = ResultSet::new();
        for record in self.iter(rng) {
            results.push(record?);
        }
        results.finish();

        info!(
            configurations = results.len(),
            started_at = %results.started_at(),
            "Experiment finished"
        );

        Ok(results)
    }

    /// Run the three workloads under one core limit.
    ///
    /// # Errors
    ///
    /// Returns error if the thread pool cannot start or a workload fails.
    #[instrument(skip(self, rng), fields(cores = limit.cores()))]
    pub fn run_configuration<R: Rng>(&self, limit: CoreLimit, rng: &mut R) -> Result<TimingRecord> {
        let config = &self.config;

        if config.export_hint() {
            limit.export_hint();
        }
        let pool = limit.thread_pool()?;

        info!("Configuration started");

        let sort = QuickSort::new(config.sort_len(), config.sort_upper());
        let quicksort = measure(&sort, rng, &pool)?.elapsed;

        let multiply = DenseMultiply::new(config.matrix_dim(), config.backend());
        let matrix_multiplication = measure(&multiply, rng, &pool)?.elapsed;

        let aggregation = TableAggregation::new(config.table_rows(), config.table_upper());
        let table_operations = measure(&aggregation, rng, &pool)?.elapsed;

        Ok(TimingRecord::new(
            limit.cores(),
            quicksort,
            matrix_multiplication,
            table_operations,
        ))
    }
}

/// Lazy experiment run, see the module docs for the state machine.
pub struct ExperimentRun<'a, R: Rng> {
    experiment: &'a Experiment,
    rng: &'a mut R,
    state: DriverState,
    pending: std::vec::IntoIter<CoreLimit>,
}

impl<R: Rng> ExperimentRun<'_, R> {
    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }
}

impl<R: Rng> Iterator for ExperimentRun<'_, R> {
    type Item = Result<TimingRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                DriverState::Init => {
                    let configurations = self.experiment.configurations();
                    info!(cores = ?configurations.counts(), "Core configurations");
                    self.pending = configurations.limits().collect::<Vec<_>>().into_iter();
                    self.state = DriverState::ConfigurationsRemaining;
                }
                DriverState::ConfigurationsRemaining => {
                    let Some(limit) = self.pending.next() else {
                        self.state = DriverState::Done;
                        continue;
                    };

                    let result = self.experiment.run_configuration(limit, &mut *self.rng);
                    if result.is_err() {
                        self.state = DriverState::Done;
                    }
                    return Some(result);
                }
                DriverState::Done => return None,
            }
        }
    }
}
