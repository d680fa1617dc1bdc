//! Build script for the native interop module
//!
//! Selects the native artifact the `extern "C"` declarations in
//! `src/native/ffi.rs` resolve against:
//!
//! 1. When `FORTRAN_INTEROP_LIB_DIR` is set, links the real Fortran library
//!    found there (`FORTRAN_INTEROP_LIB_NAME`, default `interop`).
//! 2. Otherwise compiles `native/interop_standin.c`, a C stand-in exporting
//!    the same symbols with the Fortran calling convention, so the crate and
//!    its tests link without a Fortran toolchain.
//!
//! Unresolved symbols are left to the linker: a missing entry point is a
//! build failure, never a runtime condition.

use std::env;
use std::path::PathBuf;

const STANDIN_SOURCE: &str = "native/interop_standin.c";
const DEFAULT_LIB_NAME: &str = "interop";

fn main() {
    println!("cargo:rerun-if-changed={STANDIN_SOURCE}");
    println!("cargo:rerun-if-env-changed=FORTRAN_INTEROP_LIB_DIR");
    println!("cargo:rerun-if-env-changed=FORTRAN_INTEROP_LIB_NAME");
    println!("cargo:rerun-if-env-changed=FORTRAN_INTEROP_LIB_KIND");
    println!("cargo:rerun-if-env-changed=FORTRAN_INTEROP_EXTRA_LIBS");

    println!("cargo:rustc-check-cfg=cfg(fortran_interop_standin)");

    match env::var_os("FORTRAN_INTEROP_LIB_DIR") {
        Some(dir) if !dir.is_empty() => link_native_library(PathBuf::from(dir)),
        _ => build_standin(),
    }
}

/// Link against a native library produced by the Fortran toolchain.
fn link_native_library(dir: PathBuf) {
    if !dir.is_dir() {
        panic!(
            "FORTRAN_INTEROP_LIB_DIR does not name a directory: {}",
            dir.display()
        );
    }

    let name = env::var("FORTRAN_INTEROP_LIB_NAME").unwrap_or_else(|_| DEFAULT_LIB_NAME.into());
    let kind = env::var("FORTRAN_INTEROP_LIB_KIND").unwrap_or_else(|_| "dylib".into());
    if kind != "dylib" && kind != "static" {
        panic!("FORTRAN_INTEROP_LIB_KIND must be `dylib` or `static`, got `{kind}`");
    }

    println!("cargo:rustc-link-search=native={}", dir.display());
    println!("cargo:rustc-link-lib={kind}={name}");

    // A static gfortran build also needs its runtime libraries.
    if let Ok(extra) = env::var("FORTRAN_INTEROP_EXTRA_LIBS") {
        for lib in extra.split(',').map(str::trim).filter(|lib| !lib.is_empty()) {
            println!("cargo:rustc-link-lib={lib}");
        }
    }
}

/// Compile the C stand-in as a static archive named after the real library.
fn build_standin() {
    println!("cargo:rustc-cfg=fortran_interop_standin");

    cc::Build::new()
        .file(STANDIN_SOURCE)
        .warnings(true)
        .flag_if_supported("-std=c99")
        .compile(DEFAULT_LIB_NAME);

    // Rotation uses sin/cos.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" && target_os != "macos" {
        println!("cargo:rustc-link-lib=m");
    }
}
