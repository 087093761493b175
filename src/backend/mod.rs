//! Compute backend dispatcher for the dense multiply
//!
//! Small products are dominated by per-row setup of the SIMD vectors, so the
//! cost-based strategy only picks SIMD once the inner dimension is wide
//! enough to fill several vector lanes.

use crate::Backend;

/// Inner dimension at which SIMD dot products beat the scalar loop
pub const SIMD_MIN_DIM: usize = 16;

/// Cost-based backend selection
pub struct BackendDispatcher {
    _private: (),
}

impl BackendDispatcher {
    /// Resolve a requested backend to the one that actually runs.
    ///
    /// # Arguments
    /// * `requested` - Backend from the experiment configuration
    /// * `inner_dim` - Shared dimension of the product (columns of A)
    ///
    /// # Returns
    /// `Backend::Scalar` or `Backend::Simd`, never `CostBased`
    #[must_use]
    pub const fn select(requested: Backend, inner_dim: usize) -> Backend {
        match requested {
            Backend::CostBased => {
                if inner_dim >= SIMD_MIN_DIM {
                    Backend::Simd
                } else {
                    Backend::Scalar
                }
            }
            forced => forced,
        }
    }
}
