//! Lane backends and the kernels built on them.
//!
//! The build script selects one native backend per target and emits a cfg
//! flag for it (`sse`, `neon` or `fallback`). [`F32x4`] names that backend;
//! the kernels in [`add`] and [`dot`] are generic over [`SimdVec`] and are
//! instantiated with it by default.

#[cfg(all(sse, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod sse;

#[cfg(all(neon, target_arch = "aarch64"))]
pub mod neon;

pub mod portable;

pub mod add;
pub mod dot;
pub mod traits;
pub mod utils;

pub use traits::{SimdAdd, SimdBatchDot, SimdVec};

/// Number of f32 lanes in one register of every backend.
pub const LANE_COUNT: usize = 4;

#[cfg(all(sse, any(target_arch = "x86", target_arch = "x86_64")))]
pub use sse::f32x4::F32x4;

#[cfg(all(neon, target_arch = "aarch64"))]
pub use neon::f32x4::F32x4;

#[cfg(not(any(
    all(sse, any(target_arch = "x86", target_arch = "x86_64")),
    all(neon, target_arch = "aarch64")
)))]
pub use portable::f32x4::F32x4;

/// Name of the lane backend compiled into this build.
pub const fn backend() -> &'static str {
    if cfg!(all(sse, any(target_arch = "x86", target_arch = "x86_64"))) {
        "sse"
    } else if cfg!(all(neon, target_arch = "aarch64")) {
        "neon"
    } else {
        "portable"
    }
}
