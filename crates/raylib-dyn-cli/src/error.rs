// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use raylib_dyn::LoadError;
use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments
    InvalidArgs(String),
    /// raylib is not embedded, could not be extracted or could not be loaded
    LibraryUnavailable(String),
    /// The loaded raylib reports the wrong version
    VersionMismatch(String),
    /// Any other failure
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::LibraryUnavailable(msg) => write!(f, "Library unavailable: {}", msg),
            CliError::VersionMismatch(msg) => write!(f, "Version mismatch: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidArgs(_) => ExitCode::from(2),
            CliError::LibraryUnavailable(_) => ExitCode::from(3),
            CliError::VersionMismatch(_) => ExitCode::from(4),
            CliError::General(_) => ExitCode::from(1),
        }
    }
}

/// Map loader errors to CliError with appropriate exit codes
impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::VersionMismatch { .. } => CliError::VersionMismatch(err.to_string()),
            LoadError::Extract { .. } => CliError::General(err.to_string()),
            LoadError::NoEmbeddedLibrary
            | LoadError::Library { .. }
            | LoadError::NullVersion(_)
            | LoadError::Utf8(_) => CliError::LibraryUnavailable(err.to_string()),
        }
    }
}

impl From<raylib_dyn::Error> for CliError {
    fn from(err: raylib_dyn::Error) -> Self {
        use raylib_dyn::Error;

        match err {
            Error::LibraryNotLoaded(load_err) => load_err.into(),
            Error::SymbolNotFound(sym) => {
                CliError::LibraryUnavailable(format!("Symbol not found: {}", sym))
            }
            other => CliError::General(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::General(format!("I/O error: {}", err))
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}
