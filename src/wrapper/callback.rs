//! Progress callbacks
//!
//! The native routines call back through a bare function pointer with no
//! user-data argument. Closures therefore go through a trampoline that finds
//! the active handler in a thread-local slot. The slot is set for the
//! duration of one native call and restored afterwards, so nested calls see
//! their own handler.
//!
//! A panic must not unwind through native frames. The trampoline catches it,
//! skips the remaining callbacks of that call, and the panic resumes once the
//! native routine has returned.

use crate::native::abi::ProgressCallback;
use crate::native::ffi;
use crate::native::symbols::Binding;
use libc::c_int;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use tracing::{trace, warn};

type Handler<'a> = &'a mut dyn FnMut(i32);

thread_local! {
    /// Address of the active `Handler`, or null outside a callback call.
    static ACTIVE_HANDLER: Cell<*mut c_void> = const { Cell::new(ptr::null_mut()) };
    static PENDING_PANIC: RefCell<Option<Box<dyn Any + Send>>> = const { RefCell::new(None) };
}

/// Forward a native-callable function pointer to `callback_example`.
pub fn callback_example_raw(total: i32, step: i32, callback: ProgressCallback) {
    callback_example_raw_with(Binding::Module, total, step, callback)
}

/// Forward a native-callable function pointer to `callback_example_c`.
pub fn callback_example_iso_c_raw(total: i32, step: i32, callback: ProgressCallback) {
    callback_example_raw_with(Binding::IsoC, total, step, callback)
}

pub fn callback_example_raw_with(
    binding: Binding,
    total: i32,
    step: i32,
    callback: ProgressCallback,
) {
    let mut total: c_int = total;
    let mut step: c_int = step;
    trace!(%binding, total, step, "callback_example");
    // SAFETY: both integers are live locals; `callback` has the declared ABI.
    unsafe {
        match binding {
            Binding::Module => {
                ffi::__interop_MOD_callback_example(&mut total, &mut step, callback)
            }
            Binding::IsoC => ffi::callback_example_c(&mut total, &mut step, callback),
        }
    }
}

/// Run `callback_example`, delivering each progress value to `handler`.
pub fn callback_example<F: FnMut(i32)>(total: i32, step: i32, handler: F) {
    callback_example_with(Binding::Module, total, step, handler)
}

pub fn callback_example_iso_c<F: FnMut(i32)>(total: i32, step: i32, handler: F) {
    callback_example_with(Binding::IsoC, total, step, handler)
}

/// `callback_example` under the chosen binding.
pub fn callback_example_with<F: FnMut(i32)>(
    binding: Binding,
    total: i32,
    step: i32,
    mut handler: F,
) {
    let mut handler: Handler<'_> = &mut handler;
    let slot = (&mut handler as *mut Handler<'_>).cast::<c_void>();

    {
        let _guard = ActiveHandler::install(slot);
        callback_example_raw_with(binding, total, step, trampoline);
    }

    if let Some(payload) = PENDING_PANIC.with(|pending| pending.borrow_mut().take()) {
        panic::resume_unwind(payload);
    }
}

/// Restores the previous handler when dropped.
struct ActiveHandler {
    previous: *mut c_void,
}

impl ActiveHandler {
    fn install(slot: *mut c_void) -> Self {
        let previous = ACTIVE_HANDLER.with(|active| active.replace(slot));
        Self { previous }
    }
}

impl Drop for ActiveHandler {
    fn drop(&mut self) {
        ACTIVE_HANDLER.with(|active| active.set(self.previous));
    }
}

unsafe extern "C" fn trampoline(value: *mut c_int) {
    let slot = ACTIVE_HANDLER.with(Cell::get);
    if slot.is_null() {
        warn!("progress callback invoked outside an active call");
        return;
    }
    if value.is_null() {
        warn!("progress callback invoked with a null progress value");
        return;
    }
    if PENDING_PANIC.with(|pending| pending.borrow().is_some()) {
        return;
    }

    // SAFETY: `value` is non-null and points at the native progress integer.
    let progress = unsafe { *value };
    // SAFETY: `slot` was installed by `callback_example_with` and points at a
    // `Handler` that outlives the native call currently running.
    let handler: &mut dyn FnMut(i32) = unsafe { &mut **slot.cast::<Handler<'static>>() };

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler(progress))) {
        PENDING_PANIC.with(|pending| *pending.borrow_mut() = Some(payload));
    }
}
