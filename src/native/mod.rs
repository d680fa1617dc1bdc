//! Native function table
//!
//! This module holds the contract with the native Fortran module and nothing
//! else:
//! - `extern "C"` declarations of every entry point (ffi.rs)
//! - Layouts and constants shared with the native side (abi.rs)
//! - The symbol table as data (symbols.rs)
//!
//! No behavior lives here. Safe entry points are in `crate::wrapper`.

pub mod abi;
pub mod abi_tests;
pub mod ffi;
pub mod symbols;

pub use abi::{InteropRecord, ProgressCallback};
pub use symbols::{Binding, ENTRY_POINTS, EntryPoint};

/// Which native artifact the build linked.
#[cfg(fortran_interop_standin)]
pub const NATIVE_BACKEND: &str = "standin";
#[cfg(not(fortran_interop_standin))]
pub const NATIVE_BACKEND: &str = "library";
