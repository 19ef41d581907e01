use std::ops::{Add, Mul};

use crate::vector::Vector4;

/// A register of [`LANE_COUNT`](super::LANE_COUNT) packed `f32` values.
///
/// This is the whole surface the batch kernels need: broadcast, load, store,
/// lane-wise multiply and lane-wise add. Each backend maps it onto its own
/// instructions; [`portable::F32x4`](super::portable::f32x4::F32x4) maps it
/// onto plain arrays.
pub trait SimdVec: Copy + Add<Output = Self> + Mul<Output = Self> {
    /// Broadcasts `value` into every lane.
    fn splat(value: f32) -> Self;

    /// Checks whether `ptr` satisfies the alignment of the aligned load/store.
    fn is_aligned(ptr: *const f32) -> bool;

    /// Loads 4 contiguous values without any alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 `f32` values.
    unsafe fn load(ptr: *const f32) -> Self;

    /// Loads 4 contiguous values from an aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 `f32` values and
    /// [`is_aligned`](Self::is_aligned) must hold for it.
    unsafe fn load_aligned(ptr: *const f32) -> Self;

    /// Loads `size` (< 4) values, zero-filling the remaining lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `size` `f32` values.
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self;

    /// Stores all 4 lanes without any alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing 4 `f32` values.
    unsafe fn store_at(&self, ptr: *mut f32);

    /// Stores all 4 lanes to an aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing 4 `f32` values and
    /// [`is_aligned`](Self::is_aligned) must hold for it.
    unsafe fn store_aligned_at(&self, ptr: *mut f32);

    /// Stores the first `size` (< 4) lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `size` `f32` values.
    unsafe fn store_at_partial(&self, ptr: *mut f32, size: usize);

    /// Copies the lanes out, lane 0 first.
    fn to_array(self) -> [f32; 4];

    /// Loads from a slice, zero-padding when it holds fewer than 4 values.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the slice is empty.
    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        debug_assert!(!slice.is_empty(), "Size can't be empty (size zero)");

        // SAFETY: both branches read at most `slice.len()` values.
        match slice.len().cmp(&super::LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { Self::load_partial(slice.as_ptr(), slice.len()) },
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load(slice.as_ptr())
            },
        }
    }
}

pub trait SimdAdd<Rhs = Self> {
    type Output;

    fn simd_add(self, rhs: Rhs) -> Self::Output;
    fn scalar_add(self, rhs: Rhs) -> Self::Output;
}

/// Dot product of one reference vector against every entry of a batch.
pub trait SimdBatchDot {
    type Output;

    /// Four entries per step on the selected lane backend.
    fn simd_dot(&self, reference: Vector4) -> Self::Output;

    /// One entry per step, no lane registers.
    fn scalar_dot(&self, reference: Vector4) -> Self::Output;
}
