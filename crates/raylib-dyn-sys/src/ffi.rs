// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::{trace::TraceLogCallback, LoadError};
use std::{
    ffi::{c_char, c_int, CStr},
    fmt,
    path::{Path, PathBuf},
};

pub const TraceLogLevel_LOG_ALL: c_int = 0;
pub const TraceLogLevel_LOG_TRACE: c_int = 1;
pub const TraceLogLevel_LOG_DEBUG: c_int = 2;
pub const TraceLogLevel_LOG_INFO: c_int = 3;
pub const TraceLogLevel_LOG_WARNING: c_int = 4;
pub const TraceLogLevel_LOG_ERROR: c_int = 5;
pub const TraceLogLevel_LOG_FATAL: c_int = 6;
pub const TraceLogLevel_LOG_NONE: c_int = 7;

/// Symbols resolved from a loaded raylib shared library.
///
/// `raylib_version` is required and read at load time. The function
/// pointers are optional and only fail when called.
pub struct RaylibLibrary {
    __library: ::libloading::Library,
    path: PathBuf,
    version: String,
    pub SetTraceLogCallback:
        Result<unsafe extern "C" fn(callback: Option<TraceLogCallback>), ::libloading::Error>,
    pub SetTraceLogLevel: Result<unsafe extern "C" fn(logLevel: c_int), ::libloading::Error>,
    pub TraceLog: Result<
        unsafe extern "C" fn(logLevel: c_int, text: *const c_char, ...),
        ::libloading::Error,
    >,
}

// SAFETY: the table only holds function pointers and the owned Library handle;
// the version string is copied out at load time
unsafe impl Send for RaylibLibrary {}
unsafe impl Sync for RaylibLibrary {}

impl fmt::Debug for RaylibLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaylibLibrary")
            .field("path", &self.path)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl RaylibLibrary {
    /// Loads the library at `path` and resolves its symbols.
    ///
    /// # Safety
    ///
    /// Loading runs the library's initialization routines. `path` must be a
    /// raylib build whose exported symbols match the declared signatures.
    pub unsafe fn new(path: &Path) -> Result<Self, LoadError> {
        let library = unsafe { ::libloading::Library::new(path) }.map_err(|source| {
            LoadError::Library {
                path: path.to_path_buf(),
                source,
            }
        })?;
        unsafe { Self::from_library(library, path) }
    }

    /// # Safety
    ///
    /// See [`RaylibLibrary::new`].
    pub unsafe fn from_library<L>(library: L, path: &Path) -> Result<Self, LoadError>
    where
        L: Into<::libloading::Library>,
    {
        let __library = library.into();
        let version = unsafe { read_version(&__library, path) }?;
        let SetTraceLogCallback = unsafe { __library.get(b"SetTraceLogCallback\0") }.map(|sym| *sym);
        let SetTraceLogLevel = unsafe { __library.get(b"SetTraceLogLevel\0") }.map(|sym| *sym);
        let TraceLog = unsafe { __library.get(b"TraceLog\0") }.map(|sym| *sym);
        Ok(RaylibLibrary {
            __library,
            path: path.to_path_buf(),
            version,
            SetTraceLogCallback,
            SetTraceLogLevel,
            TraceLog,
        })
    }

    /// Path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version string exported by the library as `raylib_version`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Installs `callback`, or restores raylib's built-in logger with `None`.
    pub unsafe fn SetTraceLogCallback(&self, callback: Option<TraceLogCallback>) {
        unsafe {
            (self
                .SetTraceLogCallback
                .as_ref()
                .expect("Expected function, got error."))(callback)
        }
    }

    pub unsafe fn SetTraceLogLevel(&self, logLevel: c_int) {
        unsafe {
            (self
                .SetTraceLogLevel
                .as_ref()
                .expect("Expected function, got error."))(logLevel)
        }
    }

    /// Calls the variadic `TraceLog` with a single `%s` argument so `text`
    /// is never interpreted as a format string.
    pub unsafe fn TraceLog(&self, logLevel: c_int, text: *const c_char) {
        unsafe {
            (self.TraceLog.as_ref().expect("Expected function, got error."))(
                logLevel,
                b"%s\0".as_ptr().cast(),
                text,
            )
        }
    }
}

/// Reads the `raylib_version` data symbol, a `const char *` variable holding
/// the version string.
unsafe fn read_version(library: &::libloading::Library, path: &Path) -> Result<String, LoadError> {
    let symbol = unsafe { library.get::<*const *const c_char>(crate::VERSION_SYMBOL) }
        .map_err(|source| LoadError::Library {
            path: path.to_path_buf(),
            source,
        })?;

    // The symbol address is the address of the variable itself
    let variable: *const *const c_char = *symbol;
    if variable.is_null() {
        return Err(LoadError::NullVersion(path.to_path_buf()));
    }

    let text = unsafe { *variable };
    if text.is_null() {
        return Err(LoadError::NullVersion(path.to_path_buf()));
    }

    let version = unsafe { CStr::from_ptr(text) }.to_str()?;
    Ok(version.to_string())
}
