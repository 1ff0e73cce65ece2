// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::Error;
use raylib_dyn_sys::{self as ffi, trace};
use std::{ffi::CString, fmt, os::raw::c_int};

/// Log target used when forwarding raylib messages to the `log` crate
pub const LOG_TARGET: &str = "raylib";

/// raylib trace log levels
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TraceLogLevel {
    /// Display all logs
    All = ffi::TraceLogLevel_LOG_ALL,
    Trace = ffi::TraceLogLevel_LOG_TRACE,
    Debug = ffi::TraceLogLevel_LOG_DEBUG,
    Info = ffi::TraceLogLevel_LOG_INFO,
    Warning = ffi::TraceLogLevel_LOG_WARNING,
    Error = ffi::TraceLogLevel_LOG_ERROR,
    /// raylib aborts the program after logging at this level
    Fatal = ffi::TraceLogLevel_LOG_FATAL,
    /// Disable logging
    None = ffi::TraceLogLevel_LOG_NONE,
}

impl TraceLogLevel {
    /// Matching `log` level, `None` for the filter-only levels `All` and
    /// `None`.
    pub fn to_log_level(self) -> Option<log::Level> {
        match self {
            TraceLogLevel::Trace => Some(log::Level::Trace),
            TraceLogLevel::Debug => Some(log::Level::Debug),
            TraceLogLevel::Info => Some(log::Level::Info),
            TraceLogLevel::Warning => Some(log::Level::Warn),
            TraceLogLevel::Error | TraceLogLevel::Fatal => Some(log::Level::Error),
            TraceLogLevel::All | TraceLogLevel::None => Option::None,
        }
    }

    /// Threshold that lets through what `filter` lets through.
    pub fn from_level_filter(filter: log::LevelFilter) -> Self {
        match filter {
            log::LevelFilter::Off => TraceLogLevel::None,
            log::LevelFilter::Error => TraceLogLevel::Error,
            log::LevelFilter::Warn => TraceLogLevel::Warning,
            log::LevelFilter::Info => TraceLogLevel::Info,
            log::LevelFilter::Debug => TraceLogLevel::Debug,
            log::LevelFilter::Trace => TraceLogLevel::Trace,
        }
    }
}

impl TryFrom<i32> for TraceLogLevel {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            ffi::TraceLogLevel_LOG_ALL => Ok(TraceLogLevel::All),
            ffi::TraceLogLevel_LOG_TRACE => Ok(TraceLogLevel::Trace),
            ffi::TraceLogLevel_LOG_DEBUG => Ok(TraceLogLevel::Debug),
            ffi::TraceLogLevel_LOG_INFO => Ok(TraceLogLevel::Info),
            ffi::TraceLogLevel_LOG_WARNING => Ok(TraceLogLevel::Warning),
            ffi::TraceLogLevel_LOG_ERROR => Ok(TraceLogLevel::Error),
            ffi::TraceLogLevel_LOG_FATAL => Ok(TraceLogLevel::Fatal),
            ffi::TraceLogLevel_LOG_NONE => Ok(TraceLogLevel::None),
            other => Err(Error::InvalidLogLevel(other)),
        }
    }
}

impl fmt::Display for TraceLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraceLogLevel::All => "ALL",
            TraceLogLevel::Trace => "TRACE",
            TraceLogLevel::Debug => "DEBUG",
            TraceLogLevel::Info => "INFO",
            TraceLogLevel::Warning => "WARNING",
            TraceLogLevel::Error => "ERROR",
            TraceLogLevel::Fatal => "FATAL",
            TraceLogLevel::None => "NONE",
        };
        f.write_str(name)
    }
}

/// Wraps a level-aware callback for the raw trampoline. Levels raylib never
/// emits are reported as `Info`.
fn typed_callback<F>(callback: F) -> impl Fn(i32, &str) + Send + Sync + 'static
where
    F: Fn(TraceLogLevel, &str) + Send + Sync + 'static,
{
    move |level: i32, text: &str| {
        let level = TraceLogLevel::try_from(level).unwrap_or(TraceLogLevel::Info);
        callback(level, text)
    }
}

fn forward_to_log(level: TraceLogLevel, text: &str) {
    if let Some(level) = level.to_log_level() {
        log::log!(target: LOG_TARGET, level, "{}", text);
    }
}

/// Receive raylib's trace log messages in `callback`
///
/// Messages are formatted before delivery. Only one callback is active at a
/// time; a new call replaces the previous one.
pub fn set_trace_log_callback<F>(callback: F) -> Result<(), Error>
where
    F: Fn(TraceLogLevel, &str) + Send + Sync + 'static,
{
    // Nothing is installed unless raylib can actually take the callback
    let lib = ffi::init()?;
    if lib.SetTraceLogCallback.is_err() {
        return Err(Error::SymbolNotFound("SetTraceLogCallback".to_string()));
    }

    let trampoline = trace::trace_log_callback_wrapper(typed_callback(callback));
    // SAFETY: the trampoline stays valid for the life of the process
    unsafe { lib.SetTraceLogCallback(Some(trampoline)) };
    Ok(())
}

/// Send raylib's trace log messages to the `log` crate under the `raylib`
/// target and align raylib's threshold with [`log::max_level`].
pub fn forward_trace_log_to_log() -> Result<(), Error> {
    set_trace_log_callback(forward_to_log)?;
    set_trace_log_level(TraceLogLevel::from_level_filter(log::max_level()))
}

/// Restore raylib's built-in stdout logger
pub fn reset_trace_log_callback() -> Result<(), Error> {
    rl!(SetTraceLogCallback(None));
    trace::clear_trace_log_callback();
    Ok(())
}

/// Set the minimum level raylib reports
pub fn set_trace_log_level(level: TraceLogLevel) -> Result<(), Error> {
    rl!(SetTraceLogLevel(level as c_int));
    Ok(())
}

/// Log `message` through raylib's own logger
pub fn trace_log(level: TraceLogLevel, message: &str) -> Result<(), Error> {
    let message = CString::new(message)?;
    rl!(TraceLog(level as c_int, message.as_ptr()));
    Ok(())
}
