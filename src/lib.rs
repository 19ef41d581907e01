//! 4-lane SIMD arithmetic on single-precision floats.
//!
//! The centrepiece is the batch dot product: one reference [`Vector4`]
//! against every entry of a structure-of-arrays [`VectorBatch`], four entries
//! per instruction. Element-wise addition ([`SimdAdd`]) is provided as well.
//!
//! The lane backend (SSE, NEON or portable) is chosen by the build script for
//! the compilation target; [`simd::backend`] reports which one is in use.
//!
//! ```rust
//! use lanewise::{SimdBatchDot, Vector4, VectorBatch};
//!
//! let mut vectors = vec![Vector4::splat(0.1); 8];
//! vectors[0] = Vector4::splat(1.0);
//! let batch = VectorBatch::from_vectors(&vectors).unwrap();
//!
//! let dots = batch.simd_dot(Vector4::splat(1.0)).unwrap();
//! assert_eq!(dots.len(), 8);
//! assert!((dots[0] - 4.0).abs() < 1e-6);
//! assert!((dots[1] - 0.4).abs() < 1e-6);
//! ```

pub mod error;
pub mod simd;
pub mod vector;

pub use error::{LanewiseError, Result};
pub use simd::dot::{batch_dot_with, compute_batch_dot, compute_batch_dot_into, scalar_batch_dot};
pub use simd::traits::{SimdAdd, SimdBatchDot, SimdVec};
pub use simd::utils::AlignedVec;
pub use vector::{BatchView, Vector4, VectorBatch};

/// Output of a batch dot product: one scalar per batch entry, in batch order.
pub type DotResult = AlignedVec;
