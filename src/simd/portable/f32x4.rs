//! Portable 4-lane f32 vector.
//!
//! Plain `[f32; 4]` arithmetic with the same contract as the native backends.
//! It is always compiled: it is the backend of last resort, and the reference
//! the native backends are tested against.

use std::ops::{Add, Mul};

use crate::simd::{traits::SimdVec, LANE_COUNT};

const PORTABLE_ALIGNMENT: usize = 16;

#[repr(C, align(16))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct F32x4 {
    pub elements: [f32; LANE_COUNT],
}

impl SimdVec for F32x4 {
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % PORTABLE_ALIGNMENT == 0
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            elements: std::ptr::read_unaligned(ptr as *const [f32; LANE_COUNT]),
        }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");

        Self {
            elements: std::ptr::read(ptr as *const [f32; LANE_COUNT]),
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let mut elements = [0.0f32; LANE_COUNT];
        std::ptr::copy_nonoverlapping(ptr, elements.as_mut_ptr(), size);
        Self { elements }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        std::ptr::write_unaligned(ptr as *mut [f32; LANE_COUNT], self.elements);
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");

        std::ptr::write(ptr as *mut [f32; LANE_COUNT], self.elements);
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32, size: usize) {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        std::ptr::copy_nonoverlapping(self.elements.as_ptr(), ptr, size);
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        self.elements
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        let [a0, a1, a2, a3] = self.elements;
        let [b0, b1, b2, b3] = rhs.elements;
        Self {
            elements: [a0 + b0, a1 + b1, a2 + b2, a3 + b3],
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        let [a0, a1, a2, a3] = self.elements;
        let [b0, b1, b2, b3] = rhs.elements;
        Self {
            elements: [a0 * b0, a1 * b1, a2 * b2, a3 * b3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_pads_short_input() {
        assert_eq!(F32x4::from_slice(&[1.0, 2.0]).to_array(), [1.0, 2.0, 0.0, 0.0]);
        assert_eq!(
            F32x4::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).to_array(),
            [1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_unaligned_store() {
        let v = F32x4::splat(7.0);
        let mut out = [0.0f32; 6];
        unsafe { v.store_at(out.as_mut_ptr().add(1)) };
        assert_eq!(out, [0.0, 7.0, 7.0, 7.0, 7.0, 0.0]);
    }

    #[test]
    fn test_arithmetic() {
        let a = F32x4::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let b = F32x4::from_slice(&[4.0, 3.0, 2.0, 1.0]);
        assert_eq!((a + b).to_array(), [5.0; 4]);
        assert_eq!((a * b).to_array(), [4.0, 6.0, 6.0, 4.0]);
    }
}
