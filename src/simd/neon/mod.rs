//! ARM NEON SIMD implementations for 128-bit vector operations.
//!
//! NEON registers are 128 bits wide, so one `float32x4_t` is exactly one lane
//! group. NEON is mandatory on AArch64, which makes this the backend the build
//! script selects on Apple Silicon, AWS Graviton and other 64-bit ARM targets.
//!
//! # Conditional Compilation
//!
//! This module is only compiled when the build script emits the `neon` cfg.

pub mod f32x4;
