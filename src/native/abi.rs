//! Data layouts shared with the native module
//!
//! Everything here crosses the boundary by address, so each type mirrors the
//! native declaration exactly:
//! - Scalars are `c_int` / `c_double`
//! - Character data is blank padded and carries no terminator
//! - `InteropRecord` follows the derived type's sequential layout (8-byte
//!   alignment, 4 bytes of padding after `id`)

use libc::{c_char, c_double, c_int};

/// Element count of the fixed-size array argument of `sum_array_fixed`.
pub const FIXED_ARRAY_LEN: usize = 10;

/// Element count of `InteropRecord::values`.
pub const RECORD_VALUES_LEN: usize = 10;

/// Character length of `InteropRecord::name`.
pub const RECORD_NAME_LEN: usize = 16;

/// Character length of the fixed-length string input.
pub const FIXED_INPUT_LEN: usize = 10;

/// Character length of the fixed-length string output.
pub const FIXED_OUTPUT_LEN: usize = 20;

/// Fortran pads character data with blanks, not NULs.
pub const BLANK: c_char = b' ' as c_char;

/// Progress handler invoked by the native callback routines.
///
/// The native side passes the progress value by address.
pub type ProgressCallback = unsafe extern "C" fn(value: *mut c_int);

/// Mirror of the native derived type used by the structure routines.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct InteropRecord {
    pub id: c_int,
    pub values: [c_double; RECORD_VALUES_LEN],
    pub name: [c_char; RECORD_NAME_LEN],
}

impl InteropRecord {
    /// Create a record with a blank-padded name.
    ///
    /// Names longer than `RECORD_NAME_LEN` bytes are truncated, the same as a
    /// Fortran character assignment.
    pub fn new(id: i32, values: [f64; RECORD_VALUES_LEN], name: &str) -> Self {
        let mut record = Self {
            id,
            values,
            name: [BLANK; RECORD_NAME_LEN],
        };
        record.set_name(name);
        record
    }

    /// Overwrite the name, blank padding the remainder.
    ///
    /// A name that does not fit is cut at the last whole character.
    pub fn set_name(&mut self, name: &str) {
        let mut end = name.len().min(RECORD_NAME_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        fill_blank_padded(&mut self.name, &name.as_bytes()[..end]);
    }

    /// The name with trailing blanks removed.
    pub fn name(&self) -> String {
        let text = text_from_chars(&self.name);
        text.trim_end_matches(' ').to_string()
    }

    /// Sum of `values`, in index order.
    pub fn values_sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl Default for InteropRecord {
    fn default() -> Self {
        Self {
            id: 0,
            values: [0.0; RECORD_VALUES_LEN],
            name: [BLANK; RECORD_NAME_LEN],
        }
    }
}

/// Copy `bytes` into `dest` and blank-pad the rest; excess bytes are dropped.
pub fn fill_blank_padded(dest: &mut [c_char], bytes: &[u8]) {
    for (slot, byte) in dest
        .iter_mut()
        .zip(bytes.iter().copied().chain(std::iter::repeat(b' ')))
    {
        *slot = byte as c_char;
    }
}

/// Decode native character data. Invalid UTF-8 is replaced, not rejected.
pub fn text_from_chars(chars: &[c_char]) -> String {
    let bytes: Vec<u8> = chars.iter().map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name_padding() {
        let record = InteropRecord::new(7, [0.0; RECORD_VALUES_LEN], "gauge");
        assert_eq!(record.name[..5], [b'g', b'a', b'u', b'g', b'e'].map(|b| b as c_char));
        assert!(record.name[5..].iter().all(|&c| c == BLANK));
        assert_eq!(record.name(), "gauge");
    }

    #[test]
    fn test_record_name_truncates() {
        let name = "a name well past sixteen";
        let record = InteropRecord::new(1, [0.0; RECORD_VALUES_LEN], name);
        assert_eq!(record.name(), "a name well past");
    }

    #[test]
    fn test_record_name_truncates_on_char_boundary() {
        // 'é' is two bytes and would straddle the 16-byte field.
        let record = InteropRecord::new(1, [0.0; RECORD_VALUES_LEN], "aaaaaaaaaaaaaaaé");
        assert_eq!(record.name(), "aaaaaaaaaaaaaaa");
        assert_eq!(record.name[15], BLANK);

        let record = InteropRecord::new(2, [0.0; RECORD_VALUES_LEN], "aaaaaaaaaaaaaaé");
        assert_eq!(record.name(), "aaaaaaaaaaaaaaé");
    }

    #[test]
    fn test_default_record_is_blank() {
        let record = InteropRecord::default();
        assert_eq!(record.id, 0);
        assert_eq!(record.values_sum(), 0.0);
        assert_eq!(record.name(), "");
    }

    #[test]
    fn test_fill_blank_padded_short_buffer() {
        let mut buffer = [0 as c_char; 3];
        fill_blank_padded(&mut buffer, b"Testing");
        assert_eq!(text_from_chars(&buffer), "Tes");
    }
}
