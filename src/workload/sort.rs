//! Three-way partition quicksort over random integers.
//!
//! This is a deliberately slow reference sort: every level allocates three
//! new vectors. Use `slice::sort_unstable` for real work.

use super::Workload;
use crate::Result;
use rand::Rng;
use std::cmp::Ordering;

/// Default number of values to sort
pub const SORT_LEN: usize = 10_000;

/// Default exclusive upper bound of the generated values
pub const SORT_UPPER: i64 = 100_000;

/// Sort `values` into a new vector in non-decreasing order.
///
/// The pivot is the middle element; values are split into strictly less,
/// equal and strictly greater partitions and only the unequal partitions are
/// recursed into.
#[must_use]
pub fn quicksort<T: Ord + Copy>(values: &[T]) -> Vec<T> {
    if values.len() <= 1 {
        return values.to_vec();
    }

    let pivot = values[values.len() / 2];
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();

    for &value in values {
        match value.cmp(&pivot) {
            Ordering::Less => less.push(value),
            Ordering::Equal => equal.push(value),
            Ordering::Greater => greater.push(value),
        }
    }

    let mut sorted = quicksort(&less);
    sorted.append(&mut equal);
    sorted.extend(quicksort(&greater));
    sorted
}

/// Quicksort workload: `len` integers uniform in `[0, upper)`.
#[derive(Debug, Clone, Copy)]
pub struct QuickSort {
    len: usize,
    upper: i64,
}

impl QuickSort {
    /// Create a sort workload. `upper` must be positive.
    #[must_use]
    pub const fn new(len: usize, upper: i64) -> Self {
        Self { len, upper }
    }
}

impl Default for QuickSort {
    fn default() -> Self {
        Self::new(SORT_LEN, SORT_UPPER)
    }
}

impl Workload for QuickSort {
    type Input = Vec<i64>;
    type Output = Vec<i64>;

    const LABEL: &'static str = "Quicksort";

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Self::Input> {
        Ok((0..self.len).map(|_| rng.gen_range(0..self.upper)).collect())
    }

    fn execute(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(quicksort(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_quicksort_empty_and_single() {
        assert!(quicksort::<i64>(&[]).is_empty());
        assert_eq!(quicksort(&[42]), vec![42]);
    }

    #[test]
    fn test_quicksort_known_input() {
        assert_eq!(
            quicksort(&[5, 3, 8, 3, 1, 9, 0, 5]),
            vec![0, 1, 3, 3, 5, 5, 8, 9]
        );
    }

    #[test]
    fn test_quicksort_sorted_input_unchanged() {
        let sorted: Vec<i64> = (0..1000).collect();
        assert_eq!(quicksort(&sorted), sorted);
    }

    #[test]
    fn test_quicksort_all_equal() {
        assert_eq!(quicksort(&[7; 64]), vec![7; 64]);
    }

    #[test]
    fn test_generate_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = QuickSort::new(500, 10).generate(&mut rng).unwrap();
        assert_eq!(input.len(), 500);
        assert!(input.iter().all(|v| (0..10).contains(v)));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let workload = QuickSort::new(32, 1_000);
        let a = workload.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = workload.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_execute_matches_std_sort() {
        let mut rng = StdRng::seed_from_u64(2);
        let workload = QuickSort::default();
        let input = workload.generate(&mut rng).unwrap();
        let mut expected = input.clone();
        expected.sort_unstable();
        assert_eq!(workload.execute(input).unwrap(), expected);
    }
}
