//! Columnar aggregation over an Arrow table.
//!
//! The table has four `Int64` columns `A`..`D`. The measured operation
//! derives `E = A + B * C - D` with Arrow's checked arithmetic kernels and
//! then sums every other column per distinct value of `A`.

use super::Workload;
use crate::{Error, Result};
use arrow::array::{Array, ArrayRef, Int64Array, RecordBatch};
use arrow::compute::kernels::numeric;
use arrow::datatypes::{DataType, Field, Schema};
use rand::Rng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Default number of generated rows
pub const TABLE_ROWS: usize = 1_000_000;

/// Default exclusive upper bound of the generated values
pub const TABLE_UPPER: i64 = 100;

/// Names of the generated columns
pub const INPUT_COLUMNS: [&str; 4] = ["A", "B", "C", "D"];

/// Name of the derived column
pub const DERIVED_COLUMN: &str = "E";

/// Column the aggregation groups by
pub const GROUP_KEY: &str = "A";

/// Generate a table of `rows` x [`INPUT_COLUMNS`] values uniform in `[0, upper)`.
///
/// # Errors
///
/// Returns error if Arrow rejects the batch.
pub fn random_table<R: Rng>(rng: &mut R, rows: usize, upper: i64) -> Result<RecordBatch> {
    let fields: Vec<Field> = INPUT_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Int64, false))
        .collect();

    let columns: Vec<ArrayRef> = INPUT_COLUMNS
        .iter()
        .map(|_| {
            let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..upper)).collect();
            Arc::new(Int64Array::from(values)) as ArrayRef
        })
        .collect();

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| Error::InvalidInput(format!("Column not found: {name}")))
}

fn int64_values<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a [i64]> {
    let array = column(batch, name)?
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| Error::InvalidInput(format!("Column {name} is not Int64")))?;

    if array.null_count() > 0 {
        return Err(Error::InvalidInput(format!("Column {name} contains nulls")));
    }

    Ok(&array.values()[..])
}

/// Append `E = A + B * C - D` to `batch`.
///
/// # Errors
///
/// Returns error if a column is missing or the arithmetic overflows.
pub fn derive_column(batch: &RecordBatch) -> Result<RecordBatch> {
    let a = column(batch, "A")?;
    let b = column(batch, "B")?;
    let c = column(batch, "C")?;
    let d = column(batch, "D")?;

    let product = numeric::mul(b, c)?;
    let sum = numeric::add(a, &product)?;
    let derived = numeric::sub(&sum, d)?;

    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    fields.push(Field::new(DERIVED_COLUMN, derived.data_type().clone(), false));

    let mut columns = batch.columns().to_vec();
    columns.push(derived);

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Sum every non-key column per distinct value of `key`.
///
/// Output has the key column first (ascending) followed by one sum column
/// per remaining input column, in input order. Rows are folded into
/// per-thread hash maps and merged, so the work spreads over the current
/// rayon pool.
///
/// # Errors
///
/// Returns error if a column is missing, not `Int64`, or contains nulls.
pub fn group_sum(batch: &RecordBatch, key: &str) -> Result<RecordBatch> {
    let schema = batch.schema();
    let keys = int64_values(batch, key)?;

    let value_names: Vec<&str> = schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .filter(|name| *name != key)
        .collect();
    let values = value_names
        .iter()
        .map(|name| int64_values(batch, name))
        .collect::<Result<Vec<_>>>()?;
    let width = values.len();

    let groups: FxHashMap<i64, Vec<i64>> = (0..keys.len())
        .into_par_iter()
        .fold(FxHashMap::default, |mut acc: FxHashMap<i64, Vec<i64>>, row| {
            let sums = acc.entry(keys[row]).or_insert_with(|| vec![0; width]);
            for (sum, column) in sums.iter_mut().zip(&values) {
                *sum += column[row];
            }
            acc
        })
        .reduce(FxHashMap::default, |mut left, right| {
            for (group, sums) in right {
                match left.get_mut(&group) {
                    Some(existing) => {
                        for (total, value) in existing.iter_mut().zip(sums) {
                            *total += value;
                        }
                    }
                    None => {
                        left.insert(group, sums);
                    }
                }
            }
            left
        });

    let mut ordered: Vec<(i64, Vec<i64>)> = groups.into_iter().collect();
    ordered.sort_unstable_by_key(|(group, _)| *group);

    let mut fields = vec![Field::new(key, DataType::Int64, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(Int64Array::from_iter_values(
        ordered.iter().map(|(group, _)| *group),
    ))];

    for (index, name) in value_names.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Int64, false));
        columns.push(Arc::new(Int64Array::from_iter_values(
            ordered.iter().map(|(_, sums)| sums[index]),
        )));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Aggregation workload: derive `E`, then group by `A` and sum.
#[derive(Debug, Clone, Copy)]
pub struct TableAggregation {
    rows: usize,
    upper: i64,
}

impl TableAggregation {
    /// Create an aggregation workload. `upper` must be positive.
    #[must_use]
    pub const fn new(rows: usize, upper: i64) -> Self {
        Self { rows, upper }
    }
}

impl Default for TableAggregation {
    fn default() -> Self {
        Self::new(TABLE_ROWS, TABLE_UPPER)
    }
}

impl Workload for TableAggregation {
    type Input = RecordBatch;
    type Output = RecordBatch;

    const LABEL: &'static str = "Pandas Operations";

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Self::Input> {
        random_table(rng, self.rows, self.upper)
    }

    fn execute(&self, input: Self::Input) -> Result<Self::Output> {
        let derived = derive_column(&input)?;
        group_sum(&derived, GROUP_KEY)
    }
}
