//! Array operations
//!
//! Slices are passed by their data pointer with the element count in a
//! separate by-address integer. Fortran arrays are column major, so a 3×n
//! native array is exactly a Rust `[[f64; 3]]` laid out vector by vector.

use crate::error::{InteropError, Result, native_len};
use crate::native::abi::FIXED_ARRAY_LEN;
use crate::native::ffi;
use crate::native::symbols::Binding;
use libc::{c_double, c_int};
use tracing::trace;

/// Sum `input` through the module procedure `sum_array`.
pub fn sum_array(input: &[f64]) -> Result<f64> {
    let mut length = native_len("array length", input.len())?;
    trace!(symbol = "__interop_MOD_sum_array", length);
    // SAFETY: `input` holds `length` contiguous c_doubles and outlives the call.
    Ok(unsafe { ffi::__interop_MOD_sum_array(input.as_ptr(), &mut length) })
}

/// Sum `input` through `sum_array_c`.
pub fn sum_array_iso_c(input: &[f64]) -> Result<f64> {
    let mut length = native_len("array length", input.len())?;
    trace!(symbol = "sum_array_c", length);
    // SAFETY: as for `sum_array`.
    Ok(unsafe { ffi::sum_array_c(input.as_ptr(), &mut length) })
}

/// `sum_array` under the chosen binding.
pub fn sum_array_with(binding: Binding, input: &[f64]) -> Result<f64> {
    match binding {
        Binding::Module => sum_array(input),
        Binding::IsoC => sum_array_iso_c(input),
    }
}

/// Sum an array whose length the native side fixes at `FIXED_ARRAY_LEN`.
pub fn sum_array_fixed(input: &[f64; FIXED_ARRAY_LEN]) -> f64 {
    trace!(symbol = "__interop_MOD_sum_array_fixed");
    // SAFETY: the array type guarantees exactly FIXED_ARRAY_LEN elements.
    unsafe { ffi::__interop_MOD_sum_array_fixed(input.as_ptr()) }
}

/// Sum a `rows`×`cols` array stored contiguously in `input`.
///
/// The native side only sees the two extents, so the element order of
/// `input` does not matter for the sum.
pub fn sum_array_2d_iso_c(input: &[f64], rows: usize, cols: usize) -> Result<f64> {
    if rows.checked_mul(cols) != Some(input.len()) {
        return Err(InteropError::ShapeMismatch {
            len: input.len(),
            rows,
            cols,
        });
    }
    let mut length1 = native_len("row count", rows)?;
    let mut length2 = native_len("column count", cols)?;
    trace!(symbol = "sum_array_2d_c", length1, length2);
    // SAFETY: `input` holds exactly length1 * length2 c_doubles.
    Ok(unsafe { ffi::sum_array_2d_c(input.as_ptr(), &mut length1, &mut length2) })
}

/// Rotate each vector about the Z axis by `angle` radians, in place.
pub fn rotate_vectors(vectors: &mut [[f64; 3]], angle: f64) -> Result<()> {
    rotate_vectors_via(Binding::Module, vectors, angle)
}

pub fn rotate_vectors_iso_c(vectors: &mut [[f64; 3]], angle: f64) -> Result<()> {
    rotate_vectors_via(Binding::IsoC, vectors, angle)
}

/// `rotate_vectors` under the chosen binding.
pub fn rotate_vectors_with(
    binding: Binding,
    vectors: &mut [[f64; 3]],
    angle: f64,
) -> Result<()> {
    rotate_vectors_via(binding, vectors, angle)
}

fn rotate_vectors_via(binding: Binding, vectors: &mut [[f64; 3]], angle: f64) -> Result<()> {
    let mut count: c_int = native_len("vector count", vectors.len())?;
    let mut angle: c_double = angle;
    let data = vectors.as_mut_ptr().cast::<c_double>();
    trace!(%binding, count, angle, "rotate_vectors");
    // SAFETY: `[[f64; 3]]` is 3 * count contiguous c_doubles, exclusively
    // borrowed for the duration of the call.
    unsafe {
        match binding {
            Binding::Module => ffi::__interop_MOD_rotate_vectors(data, &mut count, &mut angle),
            Binding::IsoC => ffi::rotate_vectors_c(data, &mut count, &mut angle),
        }
    }
    Ok(())
}
