//! Result Set - ordered timing records of one experiment

use super::timing_record::{TimingRecord, LABELS};
use crate::Result;
use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Timing records in configuration order.
///
/// Records are appended by the driver while the experiment runs and read by
/// the reporter afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<TimingRecord>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSet {
    /// Create an empty result set stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Build a finished result set from existing records.
    #[must_use]
    pub fn from_records(records: Vec<TimingRecord>) -> Self {
        let mut results = Self::new();
        results.records = records;
        results.finish();
        results
    }

    /// Append a record.
    pub fn push(&mut self, record: TimingRecord) {
        self.records.push(record);
    }

    /// Mark the experiment as finished now.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Get the records in configuration order.
    #[must_use]
    pub fn records(&self) -> &[TimingRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no configuration has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get the end timestamp, if the experiment has finished.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Core counts in configuration order.
    #[must_use]
    pub fn core_counts(&self) -> Vec<usize> {
        self.records.iter().map(TimingRecord::cores).collect()
    }

    /// Longest workload duration in seconds (0.0 when empty).
    #[must_use]
    pub fn max_seconds(&self) -> f64 {
        self.records
            .iter()
            .flat_map(TimingRecord::seconds)
            .fold(0.0, f64::max)
    }

    /// Convert to an Arrow batch with one row per record and [`LABELS`] as
    /// column names.
    ///
    /// # Errors
    ///
    /// Returns error if Arrow rejects the batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = Schema::new(vec![
            Field::new(LABELS[0], DataType::UInt64, false),
            Field::new(LABELS[1], DataType::Float64, false),
            Field::new(LABELS[2], DataType::Float64, false),
            Field::new(LABELS[3], DataType::Float64, false),
        ]);

        let cores = UInt64Array::from_iter_values(self.records.iter().map(|r| r.cores() as u64));
        let mut columns: Vec<ArrayRef> = vec![Arc::new(cores)];
        for index in 0..3 {
            columns.push(Arc::new(Float64Array::from_iter_values(
                self.records.iter().map(|r| r.seconds()[index]),
            )));
        }

        Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(cores: usize, millis: u64) -> TimingRecord {
        let d = Duration::from_millis(millis);
        TimingRecord::new(cores, d, d * 2, d * 3)
    }

    #[test]
    fn test_result_set_default() {
        let results = ResultSet::new();
        assert!(results.is_empty());
        assert!(results.finished_at().is_none());
        assert!(results.max_seconds().abs() < f64::EPSILON);
    }

    #[test]
    fn test_insertion_order_kept() {
        let results = ResultSet::from_records(vec![record(1, 10), record(4, 5), record(2, 7)]);
        assert_eq!(results.core_counts(), vec![1, 4, 2]);
        assert!(results.finished_at().is_some());
    }

    #[test]
    fn test_max_seconds() {
        let results = ResultSet::from_records(vec![record(1, 100), record(2, 500)]);
        assert!((results.max_seconds() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_to_record_batch_shape() {
        let results = ResultSet::from_records(vec![record(1, 10), record(2, 20)]);
        let batch = results.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, LABELS);
    }
}
