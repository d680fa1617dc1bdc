//! Errors detected on the Rust side of the boundary.
//!
//! The native call itself never produces one of these. They cover argument
//! shaping that cannot be expressed in the native types, and native-reported
//! lengths that would reach outside the caller's buffer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteropError {
    #[error("{what} of {len} does not fit in a native integer")]
    LengthOverflow { what: &'static str, len: usize },

    #[error("text of {len} bytes exceeds the fixed width of {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("array of {len} elements cannot be shaped as {rows}x{cols}")]
    ShapeMismatch { len: usize, rows: usize, cols: usize },

    #[error("{components} components leave {leftover} outside a whole x y z triple")]
    IncompleteVector { components: usize, leftover: usize },

    #[error("native side reported length {reported} for a buffer of {capacity}")]
    ReportedLengthOutOfRange { reported: i32, capacity: usize },
}

pub type Result<T> = std::result::Result<T, InteropError>;

/// Convert a Rust length to the native integer type.
pub(crate) fn native_len(what: &'static str, len: usize) -> Result<libc::c_int> {
    libc::c_int::try_from(len).map_err(|_| InteropError::LengthOverflow { what, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_len_bounds() {
        assert_eq!(native_len("array length", 0), Ok(0));
        assert_eq!(native_len("array length", i32::MAX as usize), Ok(i32::MAX));
        assert_eq!(
            native_len("array length", i32::MAX as usize + 1),
            Err(InteropError::LengthOverflow {
                what: "array length",
                len: i32::MAX as usize + 1
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = InteropError::ShapeMismatch {
            len: 7,
            rows: 2,
            cols: 3,
        };
        assert_eq!(err.to_string(), "array of 7 elements cannot be shaped as 2x3");

        let err = InteropError::IncompleteVector {
            components: 4,
            leftover: 1,
        };
        assert_eq!(err.to_string(), "4 components leave 1 outside a whole x y z triple");

        let err = InteropError::TextTooLong { len: 12, max: 10 };
        assert_eq!(err.to_string(), "text of 12 bytes exceeds the fixed width of 10");
    }
}
