//! External declarations of the native entry points
//!
//! Symbol names are reproduced verbatim:
//! - `__interop_MOD_<name>`: gfortran's mangling of a procedure in module
//!   `interop`
//! - `<name>_c`: the `bind(c)` export of the same procedure
//!
//! Both variants stay separate declarations; they link differently even when
//! they behave the same. Every argument is passed by address except the
//! length of `string_input_varlen`, which the native side takes by value.
//! The library itself is selected by build.rs.

#![allow(non_snake_case)]

use super::abi::{InteropRecord, ProgressCallback};
use libc::{c_char, c_double, c_int};

unsafe extern "C" {
    // =========================================================================
    // Scalars
    // =========================================================================

    pub fn __interop_MOD_return_integer(value: *mut c_int) -> c_int;
    pub fn return_integer_c(value: *mut c_int) -> c_int;

    /// Writes `*a` to `*b`.
    pub fn __interop_MOD_copy_integer(a: *mut c_int, b: *mut c_int);
    pub fn copy_integer_c(a: *mut c_int, b: *mut c_int);

    pub fn __interop_MOD_return_double(value: *mut c_double) -> c_double;
    pub fn return_double_c(value: *mut c_double) -> c_double;

    // =========================================================================
    // Arrays
    // =========================================================================

    pub fn __interop_MOD_sum_array(input: *const c_double, length: *mut c_int) -> c_double;
    pub fn sum_array_c(input: *const c_double, length: *mut c_int) -> c_double;

    /// `input` must hold exactly `FIXED_ARRAY_LEN` elements.
    pub fn __interop_MOD_sum_array_fixed(input: *const c_double) -> c_double;

    pub fn sum_array_2d_c(
        input: *const c_double,
        length1: *mut c_int,
        length2: *mut c_int,
    ) -> c_double;

    /// Rotates `count` packed 3-vectors about the Z axis, in place.
    pub fn __interop_MOD_rotate_vectors(
        vectors: *mut c_double,
        count: *mut c_int,
        angle: *mut c_double,
    );
    pub fn rotate_vectors_c(vectors: *mut c_double, count: *mut c_int, angle: *mut c_double);

    // =========================================================================
    // Strings
    // =========================================================================

    /// `text` is `FIXED_INPUT_LEN` blank-padded characters.
    pub fn __interop_MOD_string_input_fixlen(text: *const c_char, status: *mut c_int);

    pub fn __interop_MOD_string_input_varlen(
        text: *const c_char,
        length: c_int,
        status: *mut c_int,
    );

    /// Fills `FIXED_OUTPUT_LEN` characters.
    pub fn __interop_MOD_string_output_fixlen(text: *mut c_char);

    /// `length` is the buffer capacity on entry and the written length on exit.
    pub fn __interop_MOD_string_output_varlen(text: *mut c_char, length: *mut c_int);

    // =========================================================================
    // Derived types
    // =========================================================================

    pub fn __interop_MOD_pass_structure(
        data: *mut InteropRecord,
        extra_value: *mut c_double,
    ) -> c_double;
    pub fn pass_structure_c(data: *mut InteropRecord, extra_value: *mut c_double) -> c_double;

    pub fn __interop_MOD_modify_structure(data: *mut InteropRecord, change: *mut c_double);

    pub fn __interop_MOD_return_structure() -> InteropRecord;

    // =========================================================================
    // Callbacks
    // =========================================================================

    pub fn __interop_MOD_callback_example(
        total: *mut c_int,
        step: *mut c_int,
        callback: ProgressCallback,
    );
    pub fn callback_example_c(total: *mut c_int, step: *mut c_int, callback: ProgressCallback);
}
