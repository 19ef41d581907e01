#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, Mul};

use crate::simd::{traits::SimdVec, LANE_COUNT};

/// NEON loads and stores accept any address; 16-byte alignment is still what
/// [`AlignedVec`](crate::AlignedVec) provides and what `is_aligned` reports.
pub const NEON_ALIGNMENT: usize = 16;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    elements: float32x4_t,
}

impl SimdVec for F32x4 {
    /// Creates a new vector with all elements set to the same value.
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { vdupq_n_f32(value) },
        }
    }

    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % NEON_ALIGNMENT == 0
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f32(ptr),
        }
    }

    /// `vld1q_f32` has no aligned form; the alignment is only checked.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(
            Self::is_aligned(ptr),
            "Pointer must be {NEON_ALIGNMENT}-byte aligned"
        );

        Self {
            elements: vld1q_f32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let zero = vdupq_n_f32(0.0);

        let elements = match size {
            0 => zero,
            1 => vsetq_lane_f32::<0>(*ptr, zero),
            2 => {
                let v = vsetq_lane_f32::<0>(*ptr, zero);
                vsetq_lane_f32::<1>(*ptr.add(1), v)
            }
            3 => {
                let mut v = vsetq_lane_f32::<0>(*ptr, zero);
                v = vsetq_lane_f32::<1>(*ptr.add(1), v);
                vsetq_lane_f32::<2>(*ptr.add(2), v)
            }
            _ => unreachable!("Size must be < {}", LANE_COUNT),
        };

        Self { elements }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        vst1q_f32(ptr, self.elements);
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        debug_assert!(
            Self::is_aligned(ptr),
            "Pointer must be {NEON_ALIGNMENT}-byte aligned"
        );

        vst1q_f32(ptr, self.elements);
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32, size: usize) {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        match size {
            0 => {}
            3 => {
                let low = vget_low_f32(self.elements); // extract [0, 1]
                vst1_f32(ptr, low); // store [0, 1]
                *ptr.add(2) = vgetq_lane_f32::<2>(self.elements);
            }
            2 => {
                let low = vget_low_f32(self.elements);
                vst1_f32(ptr, low);
            }
            1 => {
                *ptr = vgetq_lane_f32::<0>(self.elements);
            }
            _ => unreachable!("Size must be < {}", LANE_COUNT),
        }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), self.elements) };
        lanes
    }
}

/// Implementing the `Add` trait for F32x4
/// This allows for using the `+` operator with F32x4 vectors.
impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splat_fills_every_lane() {
        assert_eq!(F32x4::splat(-1.25).to_array(), [-1.25; 4]);
    }

    #[test]
    fn test_partial_round_trip() {
        let data = [3.0f32, 2.0, 1.0];
        for size in 1..LANE_COUNT {
            let v = unsafe { F32x4::load_partial(data.as_ptr(), size) };
            let mut out = [f32::NAN; 4];
            unsafe { v.store_at_partial(out.as_mut_ptr(), size) };
            assert_eq!(&out[..size], &data[..size]);
            assert!(out[size..].iter().all(|x| x.is_nan()));
        }
    }

    #[test]
    fn test_mul_add_lanewise() {
        let a = F32x4::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let b = F32x4::splat(2.0);
        assert_eq!((a * b + b).to_array(), [4.0, 6.0, 8.0, 10.0]);
    }
}
