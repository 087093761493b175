//! Timing Record - one row of results per core configuration

use crate::workload::aggregate::TableAggregation;
use crate::workload::matmul::DenseMultiply;
use crate::workload::sort::QuickSort;
use crate::workload::Workload;
use std::time::Duration;

/// Label of the core-count column
pub const CORES_LABEL: &str = "CPU Cores";

/// Report column labels in fixed order
pub const LABELS: [&str; 4] = [
    CORES_LABEL,
    QuickSort::LABEL,
    DenseMultiply::LABEL,
    TableAggregation::LABEL,
];

/// Timing Record pairs a core configuration with the three measured
/// workload durations. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRecord {
    cores: usize,
    quicksort: Duration,
    matrix_multiplication: Duration,
    table_operations: Duration,
}

impl TimingRecord {
    /// Create a timing record.
    #[must_use]
    pub const fn new(
        cores: usize,
        quicksort: Duration,
        matrix_multiplication: Duration,
        table_operations: Duration,
    ) -> Self {
        Self {
            cores,
            quicksort,
            matrix_multiplication,
            table_operations,
        }
    }

    /// Get the core count this record was measured with.
    #[must_use]
    pub const fn cores(&self) -> usize {
        self.cores
    }

    /// Get the sort duration.
    #[must_use]
    pub const fn quicksort(&self) -> Duration {
        self.quicksort
    }

    /// Get the dense multiply duration.
    #[must_use]
    pub const fn matrix_multiplication(&self) -> Duration {
        self.matrix_multiplication
    }

    /// Get the table aggregation duration.
    #[must_use]
    pub const fn table_operations(&self) -> Duration {
        self.table_operations
    }

    /// Workload durations in seconds, in [`LABELS`] order (without cores).
    #[must_use]
    pub fn seconds(&self) -> [f64; 3] {
        [
            self.quicksort.as_secs_f64(),
            self.matrix_multiplication.as_secs_f64(),
            self.table_operations.as_secs_f64(),
        ]
    }
}
