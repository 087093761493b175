//! Tests for error types

use coreperf::Error;

#[test]
fn test_shape_mismatch_error() {
    let error = Error::ShapeMismatch {
        lhs_rows: 2,
        lhs_cols: 3,
        rhs_rows: 4,
        rhs_cols: 5,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Shape mismatch"));
    assert!(error_str.contains("2x3"));
    assert!(error_str.contains("4x5"));
}

#[test]
fn test_thread_pool_error() {
    let error = Error::ThreadPool {
        cores: 8,
        reason: "global pool already initialized".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("8 cores"));
    assert!(error_str.contains("global pool already initialized"));
}

#[test]
fn test_empty_results_error() {
    let error_str = format!("{}", Error::EmptyResults);
    assert!(error_str.contains("Result set is empty"));
    assert!(error_str.contains("Run at least one core configuration"));
}

#[test]
fn test_chart_error() {
    let error = Error::Chart("bad svg".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Chart rendering failed"));
    assert!(error_str.contains("bad svg"));
}

#[test]
fn test_display_error() {
    let error = Error::Display("xdg-open not found".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Failed to display chart"));
    assert!(error_str.contains("xdg-open not found"));
}

#[test]
fn test_compute_error() {
    let error = Error::Compute("SIMD dot product failed: length mismatch".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Compute kernel failed"));
    assert!(error_str.contains("SIMD dot product failed"));
    assert!(!error_str.contains("Invalid input"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("Column not found: A".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("Column not found: A"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_arrow_error_conversion() {
    let arrow_error = arrow::error::ArrowError::ComputeError("overflow".to_string());
    let error: Error = arrow_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("Arrow error"));
    assert!(error_str.contains("overflow"));
}

#[test]
fn test_error_debug() {
    let error = Error::EmptyResults;
    assert!(format!("{error:?}").contains("EmptyResults"));
}
