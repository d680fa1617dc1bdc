//! Character data
//!
//! Fortran strings are blank padded and carry no terminator. Fixed-length
//! routines take a buffer of exactly the declared width; variable-length
//! routines take the length as a separate argument.

use crate::error::{InteropError, Result, native_len};
use crate::native::abi::{
    BLANK, FIXED_INPUT_LEN, FIXED_OUTPUT_LEN, fill_blank_padded, text_from_chars,
};
use crate::native::ffi;
use libc::{c_char, c_int};
use std::fmt;
use tracing::{debug, trace};

/// Status written by the string input routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The text equals the native module's expected word.
    Matched,
    Mismatched,
    /// Any status the native side wrote besides 1 and -1.
    Other(i32),
}

impl MatchStatus {
    pub fn from_raw(status: c_int) -> Self {
        match status {
            1 => MatchStatus::Matched,
            -1 => MatchStatus::Mismatched,
            other => MatchStatus::Other(other),
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            MatchStatus::Matched => 1,
            MatchStatus::Mismatched => -1,
            MatchStatus::Other(status) => status,
        }
    }

    pub fn is_match(self) -> bool {
        self == MatchStatus::Matched
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Matched => f.write_str("matched"),
            MatchStatus::Mismatched => f.write_str("mismatched"),
            MatchStatus::Other(status) => write!(f, "status {status}"),
        }
    }
}

/// Pass `text` as a fixed-width, blank-padded character argument.
pub fn string_input_fixed(text: &str) -> Result<MatchStatus> {
    let bytes = text.as_bytes();
    if bytes.len() > FIXED_INPUT_LEN {
        return Err(InteropError::TextTooLong {
            len: bytes.len(),
            max: FIXED_INPUT_LEN,
        });
    }
    let mut buffer = [BLANK; FIXED_INPUT_LEN];
    fill_blank_padded(&mut buffer, bytes);

    let mut status: c_int = 0;
    trace!(symbol = "__interop_MOD_string_input_fixlen", text);
    // SAFETY: `buffer` is exactly FIXED_INPUT_LEN characters.
    unsafe { ffi::__interop_MOD_string_input_fixlen(buffer.as_ptr(), &mut status) };
    Ok(MatchStatus::from_raw(status))
}

/// Pass `text` with its length, by value, as a separate argument.
pub fn string_input(text: &str) -> Result<MatchStatus> {
    let length = native_len("text length", text.len())?;
    let mut status: c_int = 0;
    trace!(symbol = "__interop_MOD_string_input_varlen", text, length);
    // SAFETY: the native side reads `length` bytes of `text`.
    unsafe {
        ffi::__interop_MOD_string_input_varlen(
            text.as_ptr().cast::<c_char>(),
            length,
            &mut status,
        )
    };
    Ok(MatchStatus::from_raw(status))
}

/// Receive the fixed-width output string, blank padding included.
pub fn string_output_fixed() -> String {
    let mut buffer = [BLANK; FIXED_OUTPUT_LEN];
    trace!(symbol = "__interop_MOD_string_output_fixlen");
    // SAFETY: `buffer` is exactly FIXED_OUTPUT_LEN characters.
    unsafe { ffi::__interop_MOD_string_output_fixlen(buffer.as_mut_ptr()) };
    text_from_chars(&buffer)
}

/// Receive a variable-length string into a buffer of `capacity` bytes.
///
/// The native side reports how many bytes it wrote; a report outside
/// `0..=capacity` is an error rather than an out-of-bounds read.
pub fn string_output(capacity: usize) -> Result<String> {
    let mut length = native_len("buffer capacity", capacity)?;
    let mut buffer = vec![BLANK; capacity];
    trace!(symbol = "__interop_MOD_string_output_varlen", capacity);
    // SAFETY: `buffer` holds `length` writable characters.
    unsafe { ffi::__interop_MOD_string_output_varlen(buffer.as_mut_ptr(), &mut length) };

    let written = usize::try_from(length)
        .ok()
        .filter(|&written| written <= capacity)
        .ok_or(InteropError::ReportedLengthOutOfRange {
            reported: length,
            capacity,
        })?;
    debug!(written, capacity, "variable-length string received");
    Ok(text_from_chars(&buffer[..written]))
}
