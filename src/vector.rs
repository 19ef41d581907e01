//! Vector value types and the structure-of-arrays batch layout.
//!
//! A batch of 4-component vectors can be stored two ways:
//!
//! ```text
//! Array of structures (AoS):
//! [x0, y0, z0, w0] [x1, y1, z1, w1] [x2, y2, z2, w2] ...
//!
//! Structure of arrays (SoA):
//! xs: [x0, x1, x2, x3, ...]
//! ys: [y0, y1, y2, y3, ...]
//! zs: [z0, z1, z2, z3, ...]
//! ws: [w0, w1, w2, w3, ...]
//! ```
//!
//! With SoA, one lane-group load from `xs` fetches the x component of 4
//! different vectors, so 4 dot products finish with lane-wise arithmetic only
//! and no horizontal reduction. [`VectorBatch`] owns SoA columns in aligned
//! storage; [`BatchView`] borrows caller-owned columns.

use ndarray::ArrayView2;

use crate::error::{shape_mismatch, validation_error, Result};
use crate::simd::utils::{is_aligned, AlignedVec};

/// Four single-precision components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// All four components set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Scalar dot product.
    ///
    /// Summed pairwise as `(x + y) + (z + w)`, the same association the lane
    /// kernel uses, so both paths round identically.
    #[inline(always)]
    pub fn dot(self, other: Self) -> f32 {
        (self.x * other.x + self.y * other.y) + (self.z * other.z + self.w * other.w)
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<Vector4> for [f32; 4] {
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

/// Borrowed structure-of-arrays batch.
///
/// Construction checks that the four columns have the same length. The columns
/// may start at any address.
#[derive(Copy, Clone, Debug)]
pub struct BatchView<'a> {
    xs: &'a [f32],
    ys: &'a [f32],
    zs: &'a [f32],
    ws: &'a [f32],
}

impl<'a> BatchView<'a> {
    /// Bundles four columns into a batch.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`](crate::LanewiseError::ShapeMismatch) if the columns
    /// differ in length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lanewise::{BatchView, LanewiseError};
    ///
    /// let xs = [1.0, 2.0];
    /// let short = [1.0];
    /// let err = BatchView::new(&xs, &xs, &short, &xs).unwrap_err();
    /// assert!(matches!(err, LanewiseError::ShapeMismatch { zs: 1, .. }));
    /// ```
    pub fn new(xs: &'a [f32], ys: &'a [f32], zs: &'a [f32], ws: &'a [f32]) -> Result<Self> {
        let n = xs.len();

        if ys.len() != n || zs.len() != n || ws.len() != n {
            log::debug!(
                "rejecting batch with column lengths {}/{}/{}/{}",
                xs.len(),
                ys.len(),
                zs.len(),
                ws.len()
            );
            return Err(shape_mismatch(xs.len(), ys.len(), zs.len(), ws.len()));
        }

        Ok(Self { xs, ys, zs, ws })
    }

    /// Number of vectors in the batch.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &'a [f32] {
        self.xs
    }

    pub fn ys(&self) -> &'a [f32] {
        self.ys
    }

    pub fn zs(&self) -> &'a [f32] {
        self.zs
    }

    pub fn ws(&self) -> &'a [f32] {
        self.ws
    }

    /// The vector at `index`, if it is in range.
    pub fn get(&self, index: usize) -> Option<Vector4> {
        (index < self.len()).then(|| self.at(index))
    }

    /// Iterates the vectors in batch order.
    pub fn iter(&self) -> impl Iterator<Item = Vector4> + 'a {
        let view = *self;
        (0..view.len()).map(move |i| view.at(i))
    }

    /// True when all four columns start on a 16-byte boundary.
    pub fn is_aligned(&self) -> bool {
        is_aligned(self.xs.as_ptr())
            && is_aligned(self.ys.as_ptr())
            && is_aligned(self.zs.as_ptr())
            && is_aligned(self.ws.as_ptr())
    }

    #[inline(always)]
    pub(crate) fn at(&self, index: usize) -> Vector4 {
        Vector4::new(
            self.xs[index],
            self.ys[index],
            self.zs[index],
            self.ws[index],
        )
    }
}

/// Owned structure-of-arrays batch of [`Vector4`] values.
///
/// The four columns live in separate [`AlignedVec`]s of equal length, so lane
/// groups starting at multiples of 4 can use aligned loads.
///
/// # Examples
///
/// ```rust
/// use lanewise::{Vector4, VectorBatch};
///
/// let batch = VectorBatch::from_vectors(&[
///     Vector4::new(1.0, 2.0, 3.0, 4.0),
///     Vector4::splat(0.5),
/// ])
/// .unwrap();
///
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.xs(), &[1.0, 0.5]);
/// assert_eq!(batch.get(0), Some(Vector4::new(1.0, 2.0, 3.0, 4.0)));
/// ```
#[derive(Debug, PartialEq)]
pub struct VectorBatch {
    xs: AlignedVec,
    ys: AlignedVec,
    zs: AlignedVec,
    ws: AlignedVec,
}

impl VectorBatch {
    /// Copies four equal-length columns into aligned storage.
    pub fn new(xs: &[f32], ys: &[f32], zs: &[f32], ws: &[f32]) -> Result<Self> {
        let view = BatchView::new(xs, ys, zs, ws)?;

        Ok(Self {
            xs: AlignedVec::from_slice(view.xs)?,
            ys: AlignedVec::from_slice(view.ys)?,
            zs: AlignedVec::from_slice(view.zs)?,
            ws: AlignedVec::from_slice(view.ws)?,
        })
    }

    /// Creates a batch of `len` zero vectors.
    pub fn zeroed(len: usize) -> Result<Self> {
        Ok(Self {
            xs: AlignedVec::zeroed(len)?,
            ys: AlignedVec::zeroed(len)?,
            zs: AlignedVec::zeroed(len)?,
            ws: AlignedVec::zeroed(len)?,
        })
    }

    /// Transposes array-of-structures vectors into SoA columns.
    pub fn from_vectors(vectors: &[Vector4]) -> Result<Self> {
        let mut batch = Self::zeroed(vectors.len())?;

        for (i, v) in vectors.iter().enumerate() {
            batch.set(i, *v);
        }

        Ok(batch)
    }

    /// Transposes an `(N, 4)` matrix, one vector per row, into SoA columns.
    ///
    /// # Errors
    ///
    /// [`ValidationError`](crate::LanewiseError::ValidationError) if the matrix
    /// does not have exactly 4 columns.
    pub fn from_array(array: ArrayView2<'_, f32>) -> Result<Self> {
        if array.ncols() != 4 {
            return Err(validation_error(format!(
                "expected an (N, 4) matrix, got shape ({}, {})",
                array.nrows(),
                array.ncols()
            )));
        }

        let mut batch = Self::zeroed(array.nrows())?;

        for (i, row) in array.rows().into_iter().enumerate() {
            batch.set(i, Vector4::new(row[0], row[1], row[2], row[3]));
        }

        Ok(batch)
    }

    fn set(&mut self, index: usize, v: Vector4) {
        self.xs[index] = v.x;
        self.ys[index] = v.y;
        self.zs[index] = v.z;
        self.ws[index] = v.w;
    }

    /// Borrows the batch as a [`BatchView`].
    pub fn view(&self) -> BatchView<'_> {
        BatchView {
            xs: self.xs.as_slice(),
            ys: self.ys.as_slice(),
            zs: self.zs.as_slice(),
            ws: self.ws.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    pub fn zs(&self) -> &[f32] {
        &self.zs
    }

    pub fn ws(&self) -> &[f32] {
        &self.ws
    }

    pub fn get(&self, index: usize) -> Option<Vector4> {
        self.view().get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Vector4> + '_ {
        self.view().iter()
    }
}

impl<'a> From<&'a VectorBatch> for BatchView<'a> {
    fn from(batch: &'a VectorBatch) -> Self {
        batch.view()
    }
}
