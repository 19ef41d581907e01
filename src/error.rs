//! Error types for lanewise operations.
//!
//! Every fallible operation in the crate reports one of these variants instead
//! of panicking. All of them describe caller or resource errors: nothing here
//! is transient, so none of them is worth retrying.

use std::fmt;

/// Errors that can occur during lanewise operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanewiseError {
    /// The four component columns of a batch have different lengths.
    ShapeMismatch {
        /// Length of the x column.
        xs: usize,
        /// Length of the y column.
        ys: usize,
        /// Length of the z column.
        zs: usize,
        /// Length of the w column.
        ws: usize,
    },
    /// Memory allocation failed.
    AllocationError {
        /// The size that was requested to be allocated.
        requested_size: usize,
        /// The alignment that was requested.
        requested_alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Invalid layout parameters were provided.
    LayoutError {
        /// The size parameter that caused the error.
        size: usize,
        /// The alignment parameter that caused the error.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for LanewiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanewiseError::ShapeMismatch { xs, ys, zs, ws } => write!(
                f,
                "Shape mismatch: component columns must have equal length (xs: {xs}, ys: {ys}, zs: {zs}, ws: {ws})"
            ),
            LanewiseError::AllocationError {
                requested_size,
                requested_alignment,
                message,
            } => write!(
                f,
                "Memory allocation failed: {message} (requested {requested_size} bytes with {requested_alignment} byte alignment)"
            ),
            LanewiseError::LayoutError {
                size,
                alignment,
                message,
            } => write!(
                f,
                "Invalid memory layout: {message} (size: {size}, alignment: {alignment})"
            ),
            LanewiseError::ValidationError { message } => {
                write!(f, "Validation error: {message}")
            }
        }
    }
}

impl std::error::Error for LanewiseError {}

/// Result type alias for lanewise operations.
pub type Result<T> = std::result::Result<T, LanewiseError>;

/// Creates a shape mismatch error from the four column lengths.
pub fn shape_mismatch(xs: usize, ys: usize, zs: usize, ws: usize) -> LanewiseError {
    LanewiseError::ShapeMismatch { xs, ys, zs, ws }
}

/// Creates an allocation error.
pub fn allocation_error(size: usize, alignment: usize, message: impl Into<String>) -> LanewiseError {
    LanewiseError::AllocationError {
        requested_size: size,
        requested_alignment: alignment,
        message: message.into(),
    }
}

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> LanewiseError {
    LanewiseError::LayoutError {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> LanewiseError {
    LanewiseError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let error = shape_mismatch(8, 8, 7, 8);
        let display = format!("{error}");
        assert!(display.contains("Shape mismatch"));
        assert!(display.contains("zs: 7"));
        assert!(display.contains("xs: 8"));
    }

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(1024, 16, "out of memory");
        let display = format!("{error}");
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("1024 bytes"));
        assert!(display.contains("16 byte alignment"));
        assert!(display.contains("out of memory"));
    }

    #[test]
    fn test_layout_error_display() {
        let error = layout_error(1000, 31, "alignment must be power of two");
        let display = format!("{error}");
        assert!(display.contains("Invalid memory layout"));
        assert!(display.contains("size: 1000"));
        assert!(display.contains("alignment: 31"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("output buffer has wrong length");
        let display = format!("{error}");
        assert!(display.contains("Validation error"));
        assert!(display.contains("output buffer has wrong length"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(shape_mismatch(1, 2, 3, 4), shape_mismatch(1, 2, 3, 4));
        assert_ne!(shape_mismatch(1, 2, 3, 4), shape_mismatch(4, 3, 2, 1));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = allocation_error(1024, 16, "test error");
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
