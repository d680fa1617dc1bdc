//! Managed forwarding layer
//!
//! One safe function per native entry point. Every function follows the same
//! shape: copy arguments into addressable locals, call the declaration in
//! `crate::native::ffi`, hand back what the native side returned or wrote.
//!
//! Module procedures and their `bind(c)` twins keep separate functions
//! (`foo` and `foo_iso_c`); the `*_with` forms pick one from a `Binding`.

pub mod array;
pub mod callback;
pub mod record;
pub mod scalar;
pub mod text;

pub use array::{
    rotate_vectors, rotate_vectors_iso_c, rotate_vectors_with, sum_array, sum_array_2d_iso_c,
    sum_array_fixed, sum_array_iso_c, sum_array_with,
};
pub use callback::{
    callback_example, callback_example_iso_c, callback_example_iso_c_raw, callback_example_raw,
    callback_example_raw_with, callback_example_with,
};
pub use record::{modify_record, pass_record, pass_record_iso_c, pass_record_with, return_record};
pub use scalar::{
    copy_integer, copy_integer_iso_c, copy_integer_with, return_double, return_double_iso_c,
    return_double_with, return_integer, return_integer_iso_c, return_integer_with,
};
pub use text::{MatchStatus, string_input, string_input_fixed, string_output, string_output_fixed};
