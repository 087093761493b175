//! Error types for coreperf
//!
//! Every failure is fatal for the experiment: the driver stops at the first
//! error and nothing is persisted.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// coreperf error types
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix operands do not line up for a product
    #[error("Shape mismatch: cannot multiply {lhs_rows}x{lhs_cols} by {rhs_rows}x{rhs_cols}")]
    ShapeMismatch {
        /// Rows of the left operand
        lhs_rows: usize,
        /// Columns of the left operand
        lhs_cols: usize,
        /// Rows of the right operand
        rhs_rows: usize,
        /// Columns of the right operand
        rhs_cols: usize,
    },

    /// Worker pool for a core configuration could not be started
    #[error("Thread pool for {cores} cores failed to start: {reason}")]
    ThreadPool {
        /// Requested core count
        cores: usize,
        /// Underlying rayon message
        reason: String,
    },

    /// Reporter was handed no records
    #[error("Result set is empty\nRun at least one core configuration before reporting")]
    EmptyResults,

    /// Chart could not be built or rasterized
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Image viewer could not be launched
    #[error("Failed to display chart: {0}")]
    Display(String),

    /// SIMD kernel failed while computing a result
    #[error("Compute kernel failed: {0}")]
    Compute(String),

    /// Invalid input for a workload or table
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
