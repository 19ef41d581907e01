//! Aligned `f32` storage for lane-group loads and stores.
//!
//! [`AlignedVec`] owns a zero-initialised buffer whose first element sits on a
//! [`ALIGNMENT`]-byte boundary. Every index that is a multiple of
//! [`LANE_COUNT`](super::LANE_COUNT) is therefore a valid target for the
//! aligned load/store instructions of every backend.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{allocation_error, layout_error, Result};

/// Byte alignment of every [`AlignedVec`] allocation (one 128-bit register).
pub const ALIGNMENT: usize = 16;

/// Placeholder with register alignment, used to build well-aligned dangling
/// pointers for empty buffers.
#[allow(dead_code)]
#[repr(C, align(16))]
struct Lane([f32; 4]);

/// Returns `true` if `ptr` sits on an [`ALIGNMENT`]-byte boundary.
#[inline(always)]
pub fn is_aligned(ptr: *const f32) -> bool {
    (ptr as usize) % ALIGNMENT == 0
}

/// Owned, fixed-length, 16-byte aligned buffer of `f32` values.
///
/// The buffer is released when the value is dropped, so every exit path of a
/// computation that owns one (including early error returns) frees it.
///
/// # Examples
///
/// ```rust
/// use lanewise::AlignedVec;
///
/// let mut buffer = AlignedVec::zeroed(6).unwrap();
/// buffer[5] = 1.5;
/// assert_eq!(buffer.len(), 6);
/// assert_eq!(&buffer[4..], &[0.0, 1.5]);
/// assert_eq!(buffer.as_ptr() as usize % 16, 0);
/// ```
pub struct AlignedVec {
    ptr: NonNull<f32>,
    len: usize,
}

// SAFETY: `AlignedVec` uniquely owns its allocation, exactly like `Vec<f32>`.
unsafe impl Send for AlignedVec {}
// SAFETY: shared access only hands out `&[f32]`.
unsafe impl Sync for AlignedVec {}

impl AlignedVec {
    /// Allocates `len` zeroed elements on an [`ALIGNMENT`]-byte boundary.
    ///
    /// # Errors
    ///
    /// * [`LayoutError`](crate::LanewiseError::LayoutError) if the byte size
    ///   overflows `isize::MAX`.
    /// * [`AllocationError`](crate::LanewiseError::AllocationError) if the
    ///   allocator returns null.
    pub fn zeroed(len: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self::new());
        }

        let layout = Self::layout(len)?;

        // SAFETY: `layout` has non-zero size because `len > 0`.
        let raw = unsafe { alloc_zeroed(layout) as *mut f32 };

        let ptr = NonNull::new(raw).ok_or_else(|| {
            allocation_error(
                layout.size(),
                layout.align(),
                "allocator returned a null pointer",
            )
        })?;

        Ok(Self { ptr, len })
    }

    /// Creates an empty buffer without allocating.
    pub fn new() -> Self {
        Self {
            ptr: NonNull::<Lane>::dangling().cast::<f32>(),
            len: 0,
        }
    }

    /// Copies `values` into a freshly allocated aligned buffer.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let mut buffer = Self::zeroed(values.len())?;
        buffer.copy_from_slice(values);
        Ok(buffer)
    }

    /// Allocates a new buffer holding the same values.
    pub fn try_clone(&self) -> Result<Self> {
        Self::from_slice(self)
    }

    /// Number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f32] {
        // SAFETY: `ptr` is valid for `len` initialised elements (zeroed at
        // allocation), or dangling-but-aligned with `len == 0`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Copies the contents into an ordinary `Vec<f32>`.
    pub fn into_vec(self) -> Vec<f32> {
        self.as_slice().to_vec()
    }

    fn layout(len: usize) -> Result<Layout> {
        let size = len
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(|| layout_error(usize::MAX, ALIGNMENT, "byte size overflows usize"))?;

        Layout::from_size_align(size, ALIGNMENT)
            .map_err(|err| layout_error(size, ALIGNMENT, err.to_string()))
    }
}

impl Drop for AlignedVec {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }

        // SAFETY: a non-empty buffer was allocated in `zeroed` with exactly
        // this size and alignment, which `Layout` accepted at that time.
        unsafe {
            let layout = Layout::from_size_align_unchecked(
                self.len * std::mem::size_of::<f32>(),
                ALIGNMENT,
            );
            dealloc(self.ptr.as_ptr() as *mut u8, layout);
        }
    }
}

impl Default for AlignedVec {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for AlignedVec {
    type Target = [f32];

    #[inline(always)]
    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl DerefMut for AlignedVec {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

impl AsRef<[f32]> for AlignedVec {
    fn as_ref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl fmt::Debug for AlignedVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl PartialEq for AlignedVec {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl PartialEq<[f32]> for AlignedVec {
    fn eq(&self, other: &[f32]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<Vec<f32>> for AlignedVec {
    fn eq(&self, other: &Vec<f32>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanewiseError;

    #[test]
    fn test_zeroed_is_aligned_and_zero() {
        for len in [1usize, 3, 4, 7, 64, 1000] {
            let buffer = AlignedVec::zeroed(len).unwrap();
            assert_eq!(buffer.len(), len);
            assert!(is_aligned(buffer.as_ptr()), "len {len} is misaligned");
            assert!(buffer.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AlignedVec::zeroed(0).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_slice(), &[] as &[f32]);
        assert!(is_aligned(buffer.as_ptr()));
    }

    #[test]
    fn test_from_slice_and_clone() {
        let values = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let buffer = AlignedVec::from_slice(&values).unwrap();
        let copy = buffer.try_clone().unwrap();
        assert_eq!(buffer, copy);
        assert_eq!(copy.into_vec(), values.to_vec());
    }

    #[test]
    fn test_write_through_deref_mut() {
        let mut buffer = AlignedVec::zeroed(4).unwrap();
        buffer.copy_from_slice(&[4.0, 3.0, 2.0, 1.0]);
        assert_eq!(buffer, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_oversized_request_is_a_layout_error() {
        let err = AlignedVec::zeroed(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, LanewiseError::LayoutError { .. }), "{err}");
    }
}
