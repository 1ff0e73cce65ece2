// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Runtime loader for a prebuilt raylib shared library.
//!
//! The library ships inside this crate as a gzip payload. On first use it is
//! unpacked into the temporary directory under a fixed filename, loaded with
//! the OS dynamic loader and checked against [`REQUIRED_VERSION`]. No link
//! step against raylib happens at compile time.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

mod error;
mod ffi;
mod loader;
mod payload;
pub mod trace;

pub use error::LoadError;
pub use ffi::*;
pub use loader::{check_version, Loader, EXTRACT_DIR_ENV, LIBRARY_ENV};
pub use payload::{library_filename, Payload, Unpacked};

// Re-export libloading for error handling
pub use libloading;

use std::sync::{Mutex, OnceLock, PoisonError};

/// raylib version this crate's bindings were written against
pub const REQUIRED_VERSION: &str = "5.0";

/// Exported data symbol holding the library's version string
pub const VERSION_SYMBOL: &[u8] = b"raylib_version\0";

static LIBRARY: OnceLock<RaylibLibrary> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Initialize raylib by extracting and loading the shared library
///
/// This must be called before using any other raylib function. Returns an
/// error if the library cannot be extracted, loaded or has the wrong version.
///
/// The environment variable `RAYLIB_LIBRARY` can be used to load a specific
/// library instead of the embedded one, and `RAYLIB_EXTRACT_DIR` to change
/// where the embedded library is unpacked.
pub fn init() -> Result<&'static RaylibLibrary, LoadError> {
    if let Some(lib) = LIBRARY.get() {
        return Ok(lib);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    // Double-check after acquiring lock
    if let Some(lib) = LIBRARY.get() {
        return Ok(lib);
    }

    let lib = Loader::from_env().load()?;
    Ok(LIBRARY.get_or_init(|| lib))
}

/// Get a reference to the loaded library, loading it on first use
///
/// Panics if the library cannot be loaded. There is no way to continue
/// without raylib, so this is the entry point for bootstrap code that
/// treats a failed load as fatal.
pub fn library() -> &'static RaylibLibrary {
    match init() {
        Ok(lib) => lib,
        Err(err) => panic!("raylib could not be loaded: {}", err),
    }
}

/// Try to get a reference to the loaded library without loading or panicking
pub fn try_library() -> Option<&'static RaylibLibrary> {
    LIBRARY.get()
}
