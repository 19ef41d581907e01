use crate::error::{validation_error, Result};
use crate::simd::utils::AlignedVec;
use crate::simd::{traits::SimdAdd, traits::SimdVec, F32x4, LANE_COUNT};

fn check_lengths(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        log::debug!("rejecting add of {} and {} elements", a.len(), b.len());
        return Err(validation_error(format!(
            "input slices must have same length ({} != {})",
            a.len(),
            b.len()
        )));
    }

    Ok(())
}

pub fn scalar_add(a: &[f32], b: &[f32]) -> Result<AlignedVec> {
    check_lengths(a, b)?;

    let mut c = AlignedVec::zeroed(a.len())?;

    for ((out, x), y) in c.iter_mut().zip(a).zip(b) {
        *out = x + y;
    }

    Ok(c)
}

/// Element-wise `a + b`, 4 lanes per step on backend `V`.
///
/// The result buffer is always aligned, so stores use the aligned form; loads
/// use it only when both inputs happen to be aligned too. A tail of 1..=3
/// elements goes through a partial load and store.
pub fn simd_add_with<V: SimdVec>(a: &[f32], b: &[f32]) -> Result<AlignedVec> {
    check_lengths(a, b)?;

    let size = a.len();
    let mut c = AlignedVec::zeroed(size)?;

    let full = size - size % LANE_COUNT;
    let aligned = V::is_aligned(a.as_ptr()) && V::is_aligned(b.as_ptr());

    let (a_ptr, b_ptr, c_ptr) = (a.as_ptr(), b.as_ptr(), c.as_mut_ptr());

    for i in (0..full).step_by(LANE_COUNT) {
        // SAFETY: i + LANE_COUNT <= full <= size for all three buffers; `c` is
        // an AlignedVec and i is a multiple of LANE_COUNT.
        unsafe {
            let sum = if aligned {
                V::load_aligned(a_ptr.add(i)) + V::load_aligned(b_ptr.add(i))
            } else {
                V::load(a_ptr.add(i)) + V::load(b_ptr.add(i))
            };

            sum.store_aligned_at(c_ptr.add(i));
        }
    }

    let rest = size - full;
    if rest > 0 {
        // SAFETY: exactly `rest` elements remain past `full` in every buffer.
        unsafe {
            let sum = V::load_partial(a_ptr.add(full), rest) + V::load_partial(b_ptr.add(full), rest);
            sum.store_at_partial(c_ptr.add(full), rest);
        }
    }

    Ok(c)
}

#[inline(always)]
fn simd_add(a: &[f32], b: &[f32]) -> Result<AlignedVec> {
    simd_add_with::<F32x4>(a, b)
}

impl<'b> SimdAdd<&'b [f32]> for &[f32] {
    type Output = Result<AlignedVec>;

    #[inline(always)]
    fn simd_add(self, rhs: &'b [f32]) -> Self::Output {
        simd_add(self, rhs)
    }

    #[inline(always)]
    fn scalar_add(self, rhs: &'b [f32]) -> Self::Output {
        scalar_add(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanewiseError;

    #[test]
    fn test_tutorial_add() {
        let foo: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let bar: Vec<f32> = (0..8).map(|i| i as f32 * 0.1).collect();

        let sum = foo.as_slice().simd_add(bar.as_slice()).unwrap();
        let expected = foo.as_slice().scalar_add(bar.as_slice()).unwrap();

        assert_eq!(sum, expected);
        assert!((sum[7] - 7.7).abs() < 1e-6);
    }

    #[test]
    fn test_tail_lengths() {
        for len in 0..=9 {
            let a: Vec<f32> = (0..len).map(|i| i as f32).collect();
            let b = vec![1.0f32; len];
            let sum = a.as_slice().simd_add(b.as_slice()).unwrap();
            let expected: Vec<f32> = (0..len).map(|i| i as f32 + 1.0).collect();
            assert_eq!(sum, expected, "len {len}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = [1.0f32, 2.0].as_slice().simd_add([1.0f32].as_slice()).unwrap_err();
        assert!(matches!(err, LanewiseError::ValidationError { .. }));
    }
}
