//! Scalar pass-through operations
//!
//! Each function binds its argument to a local, passes the local's address,
//! and returns what the native side returned. No validation, no conversion.

use crate::native::ffi;
use crate::native::symbols::Binding;
use libc::{c_double, c_int};
use tracing::trace;

/// Return `value` through the module procedure `return_integer`.
pub fn return_integer(value: i32) -> i32 {
    let mut value: c_int = value;
    trace!(symbol = "__interop_MOD_return_integer", value);
    // SAFETY: the native side reads one c_int through the pointer.
    unsafe { ffi::__interop_MOD_return_integer(&mut value) }
}

/// Return `value` through the `bind(c)` export `return_integer_c`.
pub fn return_integer_iso_c(value: i32) -> i32 {
    let mut value: c_int = value;
    trace!(symbol = "return_integer_c", value);
    // SAFETY: as for `return_integer`.
    unsafe { ffi::return_integer_c(&mut value) }
}

/// Copy `source` into `destination` through the module procedure.
///
/// Whatever `destination` held before is overwritten by the native side.
pub fn copy_integer(source: i32, destination: &mut i32) {
    let mut source: c_int = source;
    trace!(symbol = "__interop_MOD_copy_integer", source);
    // SAFETY: both pointers refer to live, distinct c_int storage.
    unsafe { ffi::__interop_MOD_copy_integer(&mut source, destination) }
}

/// Copy `source` into `destination` through `copy_integer_c`.
pub fn copy_integer_iso_c(source: i32, destination: &mut i32) {
    let mut source: c_int = source;
    trace!(symbol = "copy_integer_c", source);
    // SAFETY: as for `copy_integer`.
    unsafe { ffi::copy_integer_c(&mut source, destination) }
}

pub fn return_double(value: f64) -> f64 {
    let mut value: c_double = value;
    trace!(symbol = "__interop_MOD_return_double", value);
    // SAFETY: the native side reads one c_double through the pointer.
    unsafe { ffi::__interop_MOD_return_double(&mut value) }
}

pub fn return_double_iso_c(value: f64) -> f64 {
    let mut value: c_double = value;
    trace!(symbol = "return_double_c", value);
    // SAFETY: as for `return_double`.
    unsafe { ffi::return_double_c(&mut value) }
}

/// `return_integer` under the chosen binding.
pub fn return_integer_with(binding: Binding, value: i32) -> i32 {
    match binding {
        Binding::Module => return_integer(value),
        Binding::IsoC => return_integer_iso_c(value),
    }
}

/// `copy_integer` under the chosen binding.
pub fn copy_integer_with(binding: Binding, source: i32, destination: &mut i32) {
    match binding {
        Binding::Module => copy_integer(source, destination),
        Binding::IsoC => copy_integer_iso_c(source, destination),
    }
}

/// `return_double` under the chosen binding.
pub fn return_double_with(binding: Binding, value: f64) -> f64 {
    match binding {
        Binding::Module => return_double(value),
        Binding::IsoC => return_double_iso_c(value),
    }
}
