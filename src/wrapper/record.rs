//! Derived-type operations

use crate::native::abi::InteropRecord;
use crate::native::ffi;
use crate::native::symbols::Binding;
use libc::c_double;
use tracing::trace;

/// Forward `record` and `extra` to `pass_structure`; returns the native result.
///
/// The record is copied to a local first, so the native side never writes
/// the caller's value.
pub fn pass_record(record: &InteropRecord, extra: f64) -> f64 {
    pass_record_with(Binding::Module, record, extra)
}

pub fn pass_record_iso_c(record: &InteropRecord, extra: f64) -> f64 {
    pass_record_with(Binding::IsoC, record, extra)
}

/// `pass_record` under the chosen binding.
pub fn pass_record_with(binding: Binding, record: &InteropRecord, extra: f64) -> f64 {
    let mut local = *record;
    let mut extra: c_double = extra;
    trace!(%binding, id = local.id, extra, "pass_structure");
    // SAFETY: both pointers refer to live locals of the declared types.
    unsafe {
        match binding {
            Binding::Module => ffi::__interop_MOD_pass_structure(&mut local, &mut extra),
            Binding::IsoC => ffi::pass_structure_c(&mut local, &mut extra),
        }
    }
}

/// Let the native side add `change` to every value of `record`, in place.
pub fn modify_record(record: &mut InteropRecord, change: f64) {
    let mut change: c_double = change;
    trace!(symbol = "__interop_MOD_modify_structure", id = record.id, change);
    // SAFETY: `record` is exclusively borrowed for the call.
    unsafe { ffi::__interop_MOD_modify_structure(record, &mut change) }
}

/// Receive a record by value from `return_structure`.
pub fn return_record() -> InteropRecord {
    trace!(symbol = "__interop_MOD_return_structure");
    // SAFETY: takes no arguments; the record is returned through the C ABI.
    unsafe { ffi::__interop_MOD_return_structure() }
}
