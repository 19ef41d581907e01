//! Batch dot product over structure-of-arrays data.
//!
//! Computes `reference · batch[i]` for every entry of a batch, four entries per
//! step:
//!
//! ```text
//! rx = splat(ref.x)   ry = splat(ref.y)   rz = splat(ref.z)   rw = splat(ref.w)
//!
//! for each group i..i+4:
//!     dx = rx * xs[i..i+4]        dy = ry * ys[i..i+4]
//!     dz = rz * zs[i..i+4]        dw = rw * ws[i..i+4]
//!     out[i..i+4] = (dx + dy) + (dz + dw)
//! ```
//!
//! The reference components are broadcast once per call, not once per entry,
//! and every addition is lane-wise: no horizontal reduction is needed. That
//! is 4 multiplies and 3 adds for 4 finished dot products. The last
//! `len % 4` entries go through [`Vector4::dot`], which sums in the same order.

use crate::error::{validation_error, Result};
use crate::simd::utils::AlignedVec;
use crate::simd::{traits::SimdBatchDot, traits::SimdVec, F32x4, LANE_COUNT};
use crate::vector::{BatchView, Vector4, VectorBatch};
use crate::DotResult;

/// Dot product of `reference` with every entry of `batch`, on the lane
/// backend selected at build time.
///
/// # Errors
///
/// Only allocation of the result can fail. Column lengths were already
/// checked when `batch` was built.
///
/// # Examples
///
/// ```rust
/// use lanewise::{compute_batch_dot, Vector4, VectorBatch};
///
/// let batch = VectorBatch::from_vectors(&[Vector4::splat(2.0)]).unwrap();
/// let dots = compute_batch_dot(Vector4::splat(1.0), &batch.view()).unwrap();
/// assert_eq!(dots.as_slice(), &[8.0]);
/// ```
pub fn compute_batch_dot(reference: Vector4, batch: &BatchView<'_>) -> Result<DotResult> {
    let mut out = AlignedVec::zeroed(batch.len())?;
    lane_kernel::<F32x4>(reference, batch, &mut out);
    Ok(out)
}

/// Like [`compute_batch_dot`], writing into a caller-supplied buffer.
///
/// # Errors
///
/// [`ValidationError`](crate::LanewiseError::ValidationError) if `out` is not
/// exactly `batch.len()` long. Nothing is written in that case.
pub fn compute_batch_dot_into(
    reference: Vector4,
    batch: &BatchView<'_>,
    out: &mut [f32],
) -> Result<()> {
    batch_dot_with::<F32x4>(reference, batch, out)
}

/// Batch dot product on an explicit lane backend.
///
/// Lets callers pit backends against each other, e.g. the native backend
/// against [`portable::f32x4::F32x4`](crate::simd::portable::f32x4::F32x4).
pub fn batch_dot_with<V: SimdVec>(
    reference: Vector4,
    batch: &BatchView<'_>,
    out: &mut [f32],
) -> Result<()> {
    check_output_len(batch, out)?;
    lane_kernel::<V>(reference, batch, out);
    Ok(())
}

/// One entry at a time, without lane registers.
pub fn scalar_batch_dot(reference: Vector4, batch: &BatchView<'_>) -> Result<DotResult> {
    let mut out = AlignedVec::zeroed(batch.len())?;
    scalar_kernel(reference, batch, &mut out, 0);
    Ok(out)
}

fn check_output_len(batch: &BatchView<'_>, out: &[f32]) -> Result<()> {
    if out.len() != batch.len() {
        log::debug!(
            "rejecting output buffer of {} elements for a batch of {}",
            out.len(),
            batch.len()
        );
        return Err(validation_error(format!(
            "output buffer holds {} elements but the batch has {}",
            out.len(),
            batch.len()
        )));
    }

    Ok(())
}

#[inline(always)]
fn scalar_kernel(reference: Vector4, batch: &BatchView<'_>, out: &mut [f32], start: usize) {
    for (i, slot) in out.iter_mut().enumerate().skip(start) {
        *slot = reference.dot(batch.at(i));
    }
}

/// `out.len()` must equal `batch.len()`.
#[inline(always)]
fn lane_kernel<V: SimdVec>(reference: Vector4, batch: &BatchView<'_>, out: &mut [f32]) {
    let size = batch.len();
    assert_eq!(out.len(), size, "Output must match the batch length");

    let full = size - size % LANE_COUNT;

    log::trace!(
        "batch dot over {size} vectors: {} lane groups, {} scalar",
        full / LANE_COUNT,
        size - full
    );

    let rx = V::splat(reference.x);
    let ry = V::splat(reference.y);
    let rz = V::splat(reference.z);
    let rw = V::splat(reference.w);

    let (xs, ys, zs, ws) = (
        batch.xs().as_ptr(),
        batch.ys().as_ptr(),
        batch.zs().as_ptr(),
        batch.ws().as_ptr(),
    );

    // Offsets are multiples of 4 floats (16 bytes), so aligned column starts
    // keep every lane group aligned.
    let aligned = V::is_aligned(xs) && V::is_aligned(ys) && V::is_aligned(zs) && V::is_aligned(ws);
    let out_aligned = V::is_aligned(out.as_ptr());
    let dst = out.as_mut_ptr();

    for i in (0..full).step_by(LANE_COUNT) {
        // SAFETY: i + LANE_COUNT <= full <= size, and all four columns and
        // `out` hold exactly `size` elements. Aligned variants only run when
        // the base pointers passed `is_aligned`.
        unsafe {
            let (x, y, z, w) = if aligned {
                (
                    V::load_aligned(xs.add(i)),
                    V::load_aligned(ys.add(i)),
                    V::load_aligned(zs.add(i)),
                    V::load_aligned(ws.add(i)),
                )
            } else {
                (
                    V::load(xs.add(i)),
                    V::load(ys.add(i)),
                    V::load(zs.add(i)),
                    V::load(ws.add(i)),
                )
            };

            let dx = rx * x;
            let dy = ry * y;
            let dz = rz * z;
            let dw = rw * w;

            let dot = (dx + dy) + (dz + dw);

            if out_aligned {
                dot.store_aligned_at(dst.add(i));
            } else {
                dot.store_at(dst.add(i));
            }
        }
    }

    scalar_kernel(reference, batch, out, full);
}

impl SimdBatchDot for BatchView<'_> {
    type Output = Result<AlignedVec>;

    #[inline(always)]
    fn simd_dot(&self, reference: Vector4) -> Self::Output {
        compute_batch_dot(reference, self)
    }

    #[inline(always)]
    fn scalar_dot(&self, reference: Vector4) -> Self::Output {
        scalar_batch_dot(reference, self)
    }
}

impl SimdBatchDot for VectorBatch {
    type Output = Result<AlignedVec>;

    #[inline(always)]
    fn simd_dot(&self, reference: Vector4) -> Self::Output {
        compute_batch_dot(reference, &self.view())
    }

    #[inline(always)]
    fn scalar_dot(&self, reference: Vector4) -> Self::Output {
        scalar_batch_dot(reference, &self.view())
    }
}
