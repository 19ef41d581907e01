//! SSE SIMD implementations for 128-bit vector operations.
//!
//! SSE is the x86 family's 128-bit vector extension: one register holds
//! 4 single-precision values, which is exactly one lane group of this crate.
//! SSE2 is part of the x86_64 baseline, so this backend is what the build
//! script selects on practically every x86_64 target.
//!
//! # Available Types
//!
//! - [`f32x4::F32x4`]: 128-bit vector containing 4 packed single-precision values
//!
//! # Conditional Compilation
//!
//! This module is only compiled when the build script emits the `sse` cfg,
//! i.e. when the target enables the `sse` feature.

pub mod f32x4;
