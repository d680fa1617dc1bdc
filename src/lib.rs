//! Safe bindings to the `interop` Fortran module
//!
//! The crate is a boundary and nothing more:
//! - `native` declares the exported symbols and the data layouts they use
//! - `wrapper` exposes each symbol as a safe function that forwards by address
//!
//! Results come back exactly as the native side produced them. Which native
//! library is linked is decided by build.rs.

pub mod error;
pub mod logging;
pub mod native;
pub mod wrapper;

pub use error::{InteropError, Result};
pub use native::{Binding, ENTRY_POINTS, EntryPoint, InteropRecord, ProgressCallback};
pub use wrapper::*;
