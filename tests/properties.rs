//! Property-based tests for the batch dot product.

use lanewise::{BatchView, SimdBatchDot, Vector4, VectorBatch};
use proptest::prelude::*;

fn arb_vector() -> impl Strategy<Value = Vector4> {
    prop::array::uniform4(-100.0f32..100.0).prop_map(Vector4::from)
}

fn arb_batch(max_len: usize) -> impl Strategy<Value = Vec<Vector4>> {
    prop::collection::vec(arb_vector(), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// One result per entry, whatever the length.
    #[test]
    fn result_length_matches_batch(vectors in arb_batch(100), reference in arb_vector()) {
        let batch = VectorBatch::from_vectors(&vectors).unwrap();
        let dots = batch.simd_dot(reference).unwrap();
        prop_assert_eq!(dots.len(), vectors.len());
    }

    /// Every lane result equals the scalar dot product of its own entry.
    #[test]
    fn each_result_is_the_entry_dot(vectors in arb_batch(100), reference in arb_vector()) {
        let batch = VectorBatch::from_vectors(&vectors).unwrap();
        let dots = batch.simd_dot(reference).unwrap();

        for (i, (&d, v)) in dots.iter().zip(&vectors).enumerate() {
            let expected = reference.dot(*v);
            let magnitude = (reference.x * v.x).abs() + (reference.y * v.y).abs()
                + (reference.z * v.z).abs() + (reference.w * v.w).abs();
            let tolerance = magnitude * 1e-6 + 1e-6;
            prop_assert!(
                (d - expected).abs() <= tolerance,
                "index {}: {} vs {} (tolerance {})", i, d, expected, tolerance
            );
        }
    }

    /// Rotating the batch rotates the results the same way.
    #[test]
    fn rotation_is_preserved(
        vectors in arb_batch(64),
        shift in 0usize..64,
        reference in arb_vector(),
    ) {
        prop_assume!(!vectors.is_empty());
        let shift = shift % vectors.len();

        let mut rotated = vectors.clone();
        rotated.rotate_left(shift);

        let original = VectorBatch::from_vectors(&vectors).unwrap().simd_dot(reference).unwrap();
        let moved = VectorBatch::from_vectors(&rotated).unwrap().simd_dot(reference).unwrap();

        let mut expected = original.into_vec();
        expected.rotate_left(shift);
        prop_assert_eq!(moved.into_vec(), expected);
    }

    /// Columns of unequal length never produce a view.
    #[test]
    fn unequal_columns_are_rejected(n in 0usize..32, extra in 1usize..4, column in 0usize..4) {
        let base = vec![0.5f32; n];
        let long = vec![0.5f32; n + extra];

        let mut columns = [&base[..], &base[..], &base[..], &base[..]];
        columns[column] = &long[..];

        prop_assert!(BatchView::new(columns[0], columns[1], columns[2], columns[3]).is_err());
    }
}
