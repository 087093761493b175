//! Dense row-major matrices and their product.
//!
//! The scalar backend is the reference triple loop. The SIMD backend
//! transposes the right operand once and computes every output cell as a
//! trueno dot product of a row of A with a column of B. Both backends split
//! output rows across the current rayon pool.

use super::Workload;
use crate::backend::BackendDispatcher;
use crate::{Backend, Error, Result};
use rand::Rng;
use rayon::prelude::*;
use trueno::Vector;

/// Default square matrix dimension
pub const MATRIX_DIM: usize = 1000;

/// Dense row-major `f32` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Wrap row-major `data`.
    ///
    /// # Errors
    ///
    /// Returns error if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidInput(format!(
                "{rows}x{cols} matrix needs {} values, got {}",
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// All-zero matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// `n`x`n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::zeros(n, n);
        for i in 0..n {
            matrix.data[i * n + i] = 1.0;
        }
        matrix
    }

    /// Matrix of independent uniform `[0, 1)` values.
    pub fn random<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: (0..rows * cols).map(|_| rng.gen::<f32>()).collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Row-major backing slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for r in 0..self.rows {
            for c in 0..self.cols {
                data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Compute `self * rhs` on the requested backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `self.cols() != rhs.rows()`, or
    /// [`Error::Compute`] if a SIMD dot product fails.
    pub fn matmul(&self, rhs: &Self, backend: Backend) -> Result<Self> {
        if self.cols != rhs.rows {
            return Err(Error::ShapeMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: rhs.rows,
                rhs_cols: rhs.cols,
            });
        }

        let mut out = Self::zeros(self.rows, rhs.cols);
        if out.data.is_empty() || self.cols == 0 {
            return Ok(out);
        }

        match BackendDispatcher::select(backend, self.cols) {
            Backend::Simd => self.matmul_simd(rhs, &mut out)?,
            _ => self.matmul_scalar(rhs, &mut out),
        }

        Ok(out)
    }

    fn matmul_scalar(&self, rhs: &Self, out: &mut Self) {
        let inner = self.cols;
        let width = rhs.cols;

        out.data
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(i, out_row)| {
                let lhs_row = &self.data[i * inner..(i + 1) * inner];
                for (k, &a) in lhs_row.iter().enumerate() {
                    let rhs_row = &rhs.data[k * width..(k + 1) * width];
                    for (cell, &b) in out_row.iter_mut().zip(rhs_row) {
                        *cell += a * b;
                    }
                }
            });
    }

    fn matmul_simd(&self, rhs: &Self, out: &mut Self) -> Result<()> {
        let inner = self.cols;
        let columns: Vec<Vector<f32>> = rhs
            .transpose()
            .data
            .chunks(inner)
            .map(Vector::from_slice)
            .collect();

        out.data
            .par_chunks_mut(rhs.cols)
            .enumerate()
            .try_for_each(|(i, out_row)| {
                let row = Vector::from_slice(&self.data[i * inner..(i + 1) * inner]);
                for (cell, column) in out_row.iter_mut().zip(&columns) {
                    *cell = row
                        .dot(column)
                        .map_err(|e| Error::Compute(format!("SIMD dot product failed: {e}")))?;
                }
                Ok(())
            })
    }
}

/// Dense multiply workload: two random `dim`x`dim` matrices.
#[derive(Debug, Clone, Copy)]
pub struct DenseMultiply {
    dim: usize,
    backend: Backend,
}

impl DenseMultiply {
    /// Create a multiply workload for square `dim`x`dim` operands.
    #[must_use]
    pub const fn new(dim: usize, backend: Backend) -> Self {
        Self { dim, backend }
    }
}

impl Default for DenseMultiply {
    fn default() -> Self {
        Self::new(MATRIX_DIM, Backend::CostBased)
    }
}

impl Workload for DenseMultiply {
    type Input = (Matrix, Matrix);
    type Output = Matrix;

    const LABEL: &'static str = "Matrix Multiplication";

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Self::Input> {
        let lhs = Matrix::random(rng, self.dim, self.dim);
        let rhs = Matrix::random(rng, self.dim, self.dim);
        Ok((lhs, rhs))
    }

    fn execute(&self, (lhs, rhs): Self::Input) -> Result<Self::Output> {
        lhs.matmul(&rhs, self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample(rows: usize, cols: usize) -> Matrix {
        #[allow(clippy::cast_precision_loss)]
        let data = (0..rows * cols).map(|i| i as f32).collect();
        Matrix::new(rows, cols, data).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(Matrix::new(2, 2, vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_scalar_known_product() {
        // [1 2; 3 4] * [5 6; 7 8] = [19 22; 43 50]
        let a = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::new(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let c = a.matmul(&b, Backend::Scalar).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_output_shape() {
        let a = sample(3, 5);
        let b = sample(5, 2);
        let c = a.matmul(&b, Backend::Scalar).unwrap();
        assert_eq!((c.rows(), c.cols()), (3, 2));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = sample(3, 4);
        let b = sample(3, 4);
        let err = a.matmul(&b, Backend::Scalar).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { lhs_cols: 4, rhs_rows: 3, .. }));
    }

    #[test]
    fn test_identity_is_neutral_on_both_backends() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = Matrix::random(&mut rng, 24, 24);
        let id = Matrix::identity(24);
        for backend in [Backend::Scalar, Backend::Simd] {
            assert_eq!(id.matmul(&m, backend).unwrap(), m);
            assert_eq!(m.matmul(&id, backend).unwrap(), m);
        }
    }

    #[test]
    fn test_simd_matches_scalar() {
        let mut rng = StdRng::seed_from_u64(4);
        let a = Matrix::random(&mut rng, 33, 40);
        let b = Matrix::random(&mut rng, 40, 17);
        let scalar = a.matmul(&b, Backend::Scalar).unwrap();
        let simd = a.matmul(&b, Backend::Simd).unwrap();
        for (x, y) in scalar.as_slice().iter().zip(simd.as_slice()) {
            assert!((x - y).abs() < 1e-3, "scalar {x} != simd {y}");
        }
    }

    #[test]
    fn test_empty_inner_dimension() {
        let a = Matrix::zeros(3, 0);
        let b = Matrix::zeros(0, 2);
        let c = a.matmul(&b, Backend::Simd).unwrap();
        assert_eq!(c, Matrix::zeros(3, 2));
    }

    #[test]
    fn test_transpose() {
        let m = sample(2, 3);
        let t = m.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert!((t.get(2, 1) - m.get(1, 2)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_random_values_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        let m = Matrix::random(&mut rng, 10, 10);
        assert!(m.as_slice().iter().all(|v| (0.0..1.0).contains(v)));
    }
}
