// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::{
    payload::{library_filename, Payload, Unpacked},
    LoadError, RaylibLibrary, REQUIRED_VERSION,
};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Environment variable naming a raylib library to load instead of the
/// embedded one
pub const LIBRARY_ENV: &str = "RAYLIB_LIBRARY";

/// Environment variable overriding the extraction directory
pub const EXTRACT_DIR_ENV: &str = "RAYLIB_EXTRACT_DIR";

/// Locates or materializes the raylib shared library and loads it.
///
/// ```no_run
/// use raylib_dyn_sys::Loader;
///
/// let lib = Loader::from_env().load()?;
/// println!("raylib {} loaded from {}", lib.version(), lib.path().display());
/// # Ok::<(), raylib_dyn_sys::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    library_path: Option<PathBuf>,
    extract_dir: PathBuf,
    required_version: String,
    payload: Payload,
}

impl Default for Loader {
    fn default() -> Self {
        Loader {
            library_path: None,
            extract_dir: env::temp_dir(),
            required_version: REQUIRED_VERSION.to_string(),
            payload: Payload::embedded(),
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default loader honouring `RAYLIB_LIBRARY` and `RAYLIB_EXTRACT_DIR`.
    pub fn from_env() -> Self {
        let mut loader = Self::default();
        if let Some(path) = env::var_os(LIBRARY_ENV).filter(|v| !v.is_empty()) {
            loader.library_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = env::var_os(EXTRACT_DIR_ENV).filter(|v| !v.is_empty()) {
            loader.extract_dir = PathBuf::from(dir);
        }
        loader
    }

    /// Load this library directly, skipping extraction
    pub fn library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }

    pub fn extract_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extract_dir = dir.into();
        self
    }

    pub fn required_version(mut self, version: impl Into<String>) -> Self {
        self.required_version = version.into();
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Where the embedded library is (or would be) extracted
    pub fn extract_path(&self) -> PathBuf {
        self.extract_dir.join(library_filename())
    }

    pub fn override_path(&self) -> Option<&Path> {
        self.library_path.as_deref()
    }

    pub fn embedded_payload(&self) -> Payload {
        self.payload
    }

    /// Returns the library to load, extracting the embedded payload if no
    /// override is set and the file does not exist yet.
    pub fn resolve_path(&self) -> Result<PathBuf, LoadError> {
        if let Some(path) = &self.library_path {
            log::debug!("using {}={}", LIBRARY_ENV, path.display());
            return Ok(path.clone());
        }

        let path = self.extract_path();
        if let Unpacked::Written(bytes) = self.payload.unpack_to(&path)? {
            log::info!("extracted raylib ({} bytes) to {}", bytes, path.display());
        }
        Ok(path)
    }

    /// Resolves, loads and version-checks the library.
    pub fn load(&self) -> Result<RaylibLibrary, LoadError> {
        let path = self.resolve_path()?;

        // SAFETY: the path is either the embedded raylib build or a library
        // the user explicitly pointed us at
        let lib = unsafe { RaylibLibrary::new(&path)? };

        check_version(lib.version(), &self.required_version).map_err(|found| {
            LoadError::VersionMismatch {
                found,
                required: self.required_version.clone(),
                path: path.clone(),
            }
        })?;

        log::debug!("loaded raylib {} from {}", lib.version(), path.display());
        Ok(lib)
    }
}

/// Exact match of the reported version against the required one, returning
/// the found version on mismatch.
pub fn check_version(found: &str, required: &str) -> Result<(), String> {
    if found == required {
        Ok(())
    } else {
        Err(found.to_string())
    }
}
