//! SSE 4-lane f32 SIMD vector implementation.
//!
//! This module provides `F32x4`, a SIMD vector type that wraps the `__m128`
//! intrinsic type to operate on 4 single-precision floating-point values with
//! one 128-bit SSE instruction.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: any x86_64 processor (SSE2 is part of the baseline)
//! - **Target Architecture**: x86_64, or x86 with SSE enabled
//!
//! # Loading and Storing
//!
//! - `load()` / `store_at()` use `movups` and accept any address
//! - `load_aligned()` / `store_aligned_at()` use `movaps` and fault on
//!   addresses that are not 16-byte aligned
//! - `load_partial()` / `store_at_partial()` handle the 1..=3 element tail

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Mul};

use crate::simd::{traits::SimdVec, LANE_COUNT};

/// SSE memory alignment requirement in bytes.
///
/// `_mm_load_ps` and `_mm_store_ps` require 16-byte aligned addresses.
pub(crate) const SSE_ALIGNMENT: usize = 16;

/// SSE SIMD vector containing 4 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    /// SSE 128-bit vector register containing 4 packed f32 values
    pub elements: __m128,
}

impl SimdVec for F32x4 {
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm_set1_ps(value) },
        }
    }

    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % SSE_ALIGNMENT == 0
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(
            Self::is_aligned(ptr),
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );

        Self {
            elements: _mm_load_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        // _mm_set_ps takes lanes from highest to lowest
        let elements = match size {
            0 => _mm_setzero_ps(),
            1 => _mm_set_ps(0.0, 0.0, 0.0, *ptr),
            2 => _mm_set_ps(0.0, 0.0, *ptr.add(1), *ptr),
            3 => _mm_set_ps(0.0, *ptr.add(2), *ptr.add(1), *ptr),
            _ => unreachable!("Size must be < {}", LANE_COUNT),
        };

        Self { elements }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm_storeu_ps(ptr, self.elements);
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        debug_assert!(
            Self::is_aligned(ptr),
            "Pointer must be {SSE_ALIGNMENT}-byte aligned"
        );

        _mm_store_ps(ptr, self.elements);
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32, size: usize) {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let lanes = self.to_array();
        std::ptr::copy_nonoverlapping(lanes.as_ptr(), ptr, size);
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { _mm_storeu_ps(lanes.as_mut_ptr(), self.elements) };
        lanes
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_mul_ps(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splat_fills_every_lane() {
        assert_eq!(F32x4::splat(2.5).to_array(), [2.5; 4]);
    }

    #[test]
    fn test_aligned_and_unaligned_loads_agree() {
        #[repr(align(16))]
        struct Aligned([f32; 8]);

        let data = Aligned([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let aligned = unsafe { F32x4::load_aligned(data.0.as_ptr()) };
        let unaligned = unsafe { F32x4::load(data.0.as_ptr().add(1)) };

        assert_eq!(aligned.to_array(), [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(unaligned.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_partial_load_zero_fills() {
        let data = [9.0f32, 8.0, 7.0];
        for size in 1..LANE_COUNT {
            let v = unsafe { F32x4::load_partial(data.as_ptr(), size) }.to_array();
            assert_eq!(&v[..size], &data[..size]);
            assert!(v[size..].iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_partial_store_stays_in_bounds() {
        let v = F32x4::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let mut out = [0.0f32; 4];
        unsafe { v.store_at_partial(out.as_mut_ptr(), 3) };
        assert_eq!(out, [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_mul_add_lanewise() {
        let a = F32x4::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let b = F32x4::from_slice(&[0.5, 0.5, 2.0, 2.0]);
        assert_eq!((a * b + a).to_array(), [1.5, 3.0, 9.0, 12.0]);
    }
}
