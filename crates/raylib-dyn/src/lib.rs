// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! raylib without a link step
//!
//! Safe wrappers over [`raylib_dyn_sys`], which carries a prebuilt raylib
//! shared library, unpacks it on first use and loads it at runtime.
//!
//! # Quick Start
//!
//! ```no_run
//! use raylib_dyn::TraceLogLevel;
//!
//! // Route raylib's own logging through the `log` crate
//! raylib_dyn::forward_trace_log_to_log()?;
//! raylib_dyn::set_trace_log_level(TraceLogLevel::Info)?;
//!
//! println!("raylib {}", raylib_dyn::version()?);
//! # Ok::<(), raylib_dyn::Error>(())
//! ```
//!
//! # Configuration
//!
//! - `RAYLIB_LIBRARY`: load this library instead of the embedded one
//! - `RAYLIB_EXTRACT_DIR`: unpack the embedded library here instead of the
//!   system temporary directory

use raylib_dyn_sys as ffi;
use std::{error, ffi::NulError, fmt, path::PathBuf};

pub use ffi::{library_filename, LoadError, Loader, Payload, Unpacked, REQUIRED_VERSION};

/// Error type for raylib operations
#[derive(Debug)]
pub enum Error {
    /// The raylib library could not be extracted, loaded or version-checked
    LibraryNotLoaded(LoadError),

    /// The loaded library does not export the named function
    SymbolNotFound(String),

    /// CString creation error (null byte found in string)
    CString(NulError),

    /// An integer that is not one of raylib's trace log levels
    InvalidLogLevel(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::LibraryNotLoaded(err) => write!(f, "raylib could not be loaded: {}", err),
            Error::SymbolNotFound(sym) => write!(f, "raylib does not export {}", sym),
            Error::CString(err) => write!(f, "CString creation error: {}", err),
            Error::InvalidLogLevel(level) => write!(f, "invalid trace log level: {}", level),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::LibraryNotLoaded(err) => Some(err),
            Error::CString(err) => Some(err),
            Error::SymbolNotFound(_) | Error::InvalidLogLevel(_) => None,
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::LibraryNotLoaded(err)
    }
}

impl From<NulError> for Error {
    fn from(err: NulError) -> Self {
        Error::CString(err)
    }
}

/// Loads the library and calls one of its optional functions, failing with
/// [`Error::SymbolNotFound`] when the symbol is missing.
macro_rules! rl {
    ($fn_name:ident($($args:expr),*)) => {
        {
            let lib = raylib_dyn_sys::init()?;
            if lib.$fn_name.is_err() {
                return Err($crate::Error::SymbolNotFound(stringify!($fn_name).to_string()));
            }
            #[allow(clippy::macro_metavars_in_unsafe)]
            let result = unsafe { lib.$fn_name($($args),*) };
            result
        }
    };
}

/// Trace log levels, callbacks and forwarding to the `log` crate.
pub mod trace_log;

pub use trace_log::{
    forward_trace_log_to_log, reset_trace_log_callback, set_trace_log_callback,
    set_trace_log_level, trace_log, TraceLogLevel,
};

/// Load raylib if it is not loaded yet
pub fn init() -> Result<(), Error> {
    ffi::init()?;
    Ok(())
}

/// Returns true once raylib has been loaded successfully
pub fn is_loaded() -> bool {
    ffi::try_library().is_some()
}

/// Get the raylib library version string
///
/// Returns an error if the library cannot be loaded.
pub fn version() -> Result<String, Error> {
    let lib = ffi::init()?;
    Ok(lib.version().to_string())
}

/// Path the raylib library was loaded from
pub fn library_path() -> Result<PathBuf, Error> {
    let lib = ffi::init()?;
    Ok(lib.path().to_path_buf())
}
