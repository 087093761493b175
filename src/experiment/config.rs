//! Experiment configuration
//!
//! Defaults are the fixed workload sizes; the builder exists so tests and
//! benches can shrink them.

use crate::limiter::available_cores;
use crate::workload::aggregate::{TABLE_ROWS, TABLE_UPPER};
use crate::workload::matmul::MATRIX_DIM;
use crate::workload::sort::{SORT_LEN, SORT_UPPER};
use crate::{Backend, Error, Result};

/// Sizes and knobs for one experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    sort_len: usize,
    sort_upper: i64,
    matrix_dim: usize,
    table_rows: usize,
    table_upper: i64,
    backend: Backend,
    total_cores: Option<usize>,
    export_hint: bool,
}

impl ExperimentConfig {
    /// Create a builder starting from the default sizes.
    #[must_use]
    pub fn builder() -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::default()
    }

    /// Number of integers the sort workload generates.
    #[must_use]
    pub const fn sort_len(&self) -> usize {
        self.sort_len
    }

    /// Exclusive upper bound of sort values.
    #[must_use]
    pub const fn sort_upper(&self) -> i64 {
        self.sort_upper
    }

    /// Square matrix dimension.
    #[must_use]
    pub const fn matrix_dim(&self) -> usize {
        self.matrix_dim
    }

    /// Rows in the aggregation table.
    #[must_use]
    pub const fn table_rows(&self) -> usize {
        self.table_rows
    }

    /// Exclusive upper bound of table values.
    #[must_use]
    pub const fn table_upper(&self) -> i64 {
        self.table_upper
    }

    /// Backend for the dense multiply.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Whether each configuration exports `OMP_NUM_THREADS`.
    #[must_use]
    pub const fn export_hint(&self) -> bool {
        self.export_hint
    }

    /// Total core count the configurations are derived from: the override
    /// if one was set, otherwise the cores visible to this process.
    #[must_use]
    pub fn total_cores(&self) -> usize {
        self.total_cores.unwrap_or_else(available_cores)
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            sort_len: SORT_LEN,
            sort_upper: SORT_UPPER,
            matrix_dim: MATRIX_DIM,
            table_rows: TABLE_ROWS,
            table_upper: TABLE_UPPER,
            backend: Backend::CostBased,
            total_cores: None,
            export_hint: true,
        }
    }
}

/// Builder for `ExperimentConfig`.
#[derive(Debug, Default)]
pub struct ExperimentConfigBuilder {
    config: ExperimentConfig,
}

impl ExperimentConfigBuilder {
    /// Set the sort length and value bound.
    #[must_use]
    pub const fn sort(mut self, len: usize, upper: i64) -> Self {
        self.config.sort_len = len;
        self.config.sort_upper = upper;
        self
    }

    /// Set the square matrix dimension.
    #[must_use]
    pub const fn matrix_dim(mut self, dim: usize) -> Self {
        self.config.matrix_dim = dim;
        self
    }

    /// Set the table row count and value bound.
    #[must_use]
    pub const fn table(mut self, rows: usize, upper: i64) -> Self {
        self.config.table_rows = rows;
        self.config.table_upper = upper;
        self
    }

    /// Set the dense multiply backend.
    #[must_use]
    pub const fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Pretend the machine has `total` cores.
    #[must_use]
    pub const fn total_cores(mut self, total: usize) -> Self {
        self.config.total_cores = Some(total);
        self
    }

    /// Enable or disable exporting `OMP_NUM_THREADS`.
    #[must_use]
    pub const fn export_hint(mut self, export: bool) -> Self {
        self.config.export_hint = export;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a value bound is not positive.
    pub fn build(self) -> Result<ExperimentConfig> {
        if self.config.sort_upper <= 0 {
            return Err(Error::InvalidInput(format!(
                "sort upper bound must be positive, got {}",
                self.config.sort_upper
            )));
        }
        if self.config.table_upper <= 0 {
            return Err(Error::InvalidInput(format!(
                "table upper bound must be positive, got {}",
                self.config.table_upper
            )));
        }
        Ok(self.config)
    }
}
