// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::{error, fmt, io, path::PathBuf, str};

/// Errors raised while materializing or loading the raylib shared library
#[derive(Debug)]
pub enum LoadError {
    /// The crate was built without an embedded raylib payload and no
    /// `RAYLIB_LIBRARY` override was given
    NoEmbeddedLibrary,

    /// Writing the decompressed library to disk failed
    Extract { path: PathBuf, source: io::Error },

    /// The OS loader rejected the library or a required symbol is missing
    Library {
        path: PathBuf,
        source: libloading::Error,
    },

    /// The `raylib_version` symbol resolved to a null pointer
    NullVersion(PathBuf),

    /// The version string is not valid UTF-8
    Utf8(str::Utf8Error),

    /// The loaded library reports a different version than required
    VersionMismatch {
        found: String,
        required: String,
        path: PathBuf,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::NoEmbeddedLibrary => {
                write!(f, "raylib was not embedded in this build, set RAYLIB_LIBRARY")
            }
            LoadError::Extract { path, source } => {
                write!(f, "cannot extract library to {}: {}", path.display(), source)
            }
            LoadError::Library { path, source } => {
                write!(f, "cannot load library {}: {}", path.display(), source)
            }
            LoadError::NullVersion(path) => {
                write!(f, "{} exports a null raylib_version", path.display())
            }
            LoadError::Utf8(err) => write!(f, "invalid version string: {}", err),
            LoadError::VersionMismatch {
                found,
                required,
                path,
            } => write!(
                f,
                "version {} of {} doesn't match the required version {}",
                found,
                path.display(),
                required
            ),
        }
    }
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            LoadError::Extract { source, .. } => Some(source),
            LoadError::Library { source, .. } => Some(source),
            LoadError::Utf8(err) => Some(err),
            LoadError::NoEmbeddedLibrary
            | LoadError::NullVersion(_)
            | LoadError::VersionMismatch { .. } => None,
        }
    }
}

impl From<str::Utf8Error> for LoadError {
    fn from(err: str::Utf8Error) -> Self {
        LoadError::Utf8(err)
    }
}
