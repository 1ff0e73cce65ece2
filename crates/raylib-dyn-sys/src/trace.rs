// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Trampoline delivering raylib trace log messages to a Rust closure.
//!
//! raylib invokes its trace log callback as
//! `void cb(int logLevel, const char *text, va_list args)`, where `text` is a
//! printf format and `args` the matching variadic arguments. A plain
//! `extern "C" fn` cannot capture state, so the host closure lives in a
//! process-wide slot and [`trace_log_trampoline`] forwards to it after
//! formatting the message with the C runtime.

use std::{
    ffi::{c_char, c_int, c_void, CStr},
    panic::{self, AssertUnwindSafe},
    sync::{Arc, PoisonError, RwLock},
};

/// Native callback signature accepted by `SetTraceLogCallback`.
///
/// The `va_list` is passed as an opaque pointer. This matches the ABI on
/// Windows x64, x86_64 SysV and AArch64, where a `va_list` argument is a
/// pointer or is passed by reference.
pub type TraceLogCallback =
    unsafe extern "C" fn(log_level: c_int, text: *const c_char, args: *mut c_void);

type HostCallback = Arc<dyn Fn(i32, &str) + Send + Sync>;

/// Formatted messages are truncated to this many bytes, including the NUL.
/// 1024 is also the hard limit of `wvsprintfA`.
pub const MAX_MESSAGE_LENGTH: usize = 1024;

static HOST_CALLBACK: RwLock<Option<HostCallback>> = RwLock::new(None);

/// Installs `callback` as the receiver of raylib trace messages and returns
/// the trampoline to hand to `SetTraceLogCallback`.
///
/// Only one closure is active at a time; installing a new one replaces the
/// previous closure for every registration of the trampoline.
pub fn trace_log_callback_wrapper<F>(callback: F) -> TraceLogCallback
where
    F: Fn(i32, &str) + Send + Sync + 'static,
{
    let previous = HOST_CALLBACK
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(Arc::new(callback));
    drop(previous);
    trace_log_trampoline
}

/// Removes the installed closure. Messages arriving afterwards are dropped.
pub fn clear_trace_log_callback() {
    let previous = HOST_CALLBACK
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    drop(previous);
}

/// Returns true when a closure is installed.
pub fn has_trace_log_callback() -> bool {
    HOST_CALLBACK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// The `extern "C"` entry point registered with raylib.
///
/// # Safety
///
/// `text` must be null or a NUL-terminated string. `args` must be null or a
/// `va_list` matching the conversions in `text`.
pub unsafe extern "C" fn trace_log_trampoline(
    log_level: c_int,
    text: *const c_char,
    args: *mut c_void,
) {
    let mut buffer = [0u8; MAX_MESSAGE_LENGTH];

    let message = if text.is_null() {
        String::new()
    } else if !args.is_null() && unsafe { format_message(&mut buffer, text, args) } {
        // SAFETY: format_message NUL-terminates the buffer on success
        let formatted = unsafe { CStr::from_ptr(buffer.as_ptr().cast()) };
        formatted.to_string_lossy().into_owned()
    } else {
        // SAFETY: caller guarantees text is NUL-terminated
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    };

    // The guard is released before the call so the closure may replace or
    // clear the slot itself
    let callback = HOST_CALLBACK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    let Some(callback) = callback else {
        return;
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| callback(log_level, &message)));

    if result.is_err() {
        log::error!("trace log callback panicked on message: {}", message);
    }
}

#[cfg(windows)]
mod user32 {
    use std::{
        ffi::{c_char, c_int, c_void},
        sync::OnceLock,
    };

    type WvsprintfA =
        unsafe extern "system" fn(buf: *mut c_char, fmt: *const c_char, args: *mut c_void) -> c_int;

    struct User32 {
        _library: libloading::Library,
        wvsprintf_a: WvsprintfA,
    }

    static USER32: OnceLock<Option<User32>> = OnceLock::new();

    fn load() -> Option<User32> {
        // SAFETY: user32.dll has no initialization routines with preconditions
        let library = unsafe { libloading::Library::new("user32.dll") }
            .map_err(|err| log::debug!("user32.dll unavailable: {}", err))
            .ok()?;
        // SAFETY: the signature matches the documented wvsprintfA prototype
        let wvsprintf_a = unsafe { library.get::<WvsprintfA>(b"wvsprintfA\0") }
            .map(|symbol| *symbol)
            .map_err(|err| log::debug!("wvsprintfA unavailable: {}", err))
            .ok()?;
        Some(User32 {
            _library: library,
            wvsprintf_a,
        })
    }

    pub(super) unsafe fn wvsprintf(
        buffer: &mut [u8; super::MAX_MESSAGE_LENGTH],
        text: *const c_char,
        args: *mut c_void,
    ) -> bool {
        let Some(user32) = USER32.get_or_init(load) else {
            return false;
        };
        // SAFETY: buffer holds the 1024 bytes wvsprintfA may write
        let written = unsafe { (user32.wvsprintf_a)(buffer.as_mut_ptr().cast(), text, args) };
        written >= 0
    }
}

#[cfg(windows)]
unsafe fn format_message(
    buffer: &mut [u8; MAX_MESSAGE_LENGTH],
    text: *const c_char,
    args: *mut c_void,
) -> bool {
    unsafe { user32::wvsprintf(buffer, text, args) }
}

#[cfg(unix)]
extern "C" {
    fn vsnprintf(buf: *mut c_char, size: usize, fmt: *const c_char, args: *mut c_void) -> c_int;
}

#[cfg(unix)]
unsafe fn format_message(
    buffer: &mut [u8; MAX_MESSAGE_LENGTH],
    text: *const c_char,
    args: *mut c_void,
) -> bool {
    // SAFETY: vsnprintf writes at most buffer.len() bytes including the NUL
    let written = unsafe { vsnprintf(buffer.as_mut_ptr().cast(), buffer.len(), text, args) };
    written >= 0
}

#[cfg(not(any(unix, windows)))]
unsafe fn format_message(
    _buffer: &mut [u8; MAX_MESSAGE_LENGTH],
    _text: *const c_char,
    _args: *mut c_void,
) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::{
        ptr,
        sync::{Arc, Mutex},
    };

    type Received = Arc<Mutex<Vec<(i32, String)>>>;

    fn capture() -> (Received, TraceLogCallback) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let trampoline = trace_log_callback_wrapper(move |level, text| {
            sink.lock().unwrap().push((level, text.to_string()));
        });
        (received, trampoline)
    }

    #[test]
    #[serial]
    fn test_trampoline_delivers_raw_text() {
        let (received, trampoline) = capture();

        unsafe { trampoline(3, b"INIT: Initializing raylib 5.0\0".as_ptr().cast(), ptr::null_mut()) };

        assert_eq!(
            *received.lock().unwrap(),
            vec![(3, "INIT: Initializing raylib 5.0".to_string())]
        );
        clear_trace_log_callback();
    }

    #[test]
    #[serial]
    fn test_trampoline_null_text() {
        let (received, trampoline) = capture();

        unsafe { trampoline(4, ptr::null(), ptr::null_mut()) };

        assert_eq!(*received.lock().unwrap(), vec![(4, String::new())]);
        clear_trace_log_callback();
    }

    #[test]
    #[serial]
    fn test_trampoline_invalid_utf8() {
        let (received, trampoline) = capture();

        unsafe { trampoline(5, b"bad \xff byte\0".as_ptr().cast(), ptr::null_mut()) };

        assert_eq!(
            *received.lock().unwrap(),
            vec![(5, "bad \u{fffd} byte".to_string())]
        );
        clear_trace_log_callback();
    }

    #[test]
    #[serial]
    fn test_wrapper_replaces_previous_callback() {
        let (first, _) = capture();
        let (second, trampoline) = capture();

        unsafe { trampoline(3, b"hello\0".as_ptr().cast(), ptr::null_mut()) };

        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 1);
        clear_trace_log_callback();
    }

    #[test]
    #[serial]
    fn test_cleared_callback_drops_messages() {
        let (received, trampoline) = capture();
        assert!(has_trace_log_callback());

        clear_trace_log_callback();
        assert!(!has_trace_log_callback());

        unsafe { trampoline(3, b"dropped\0".as_ptr().cast(), ptr::null_mut()) };
        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_panicking_callback_is_contained() {
        let trampoline = trace_log_callback_wrapper(|_, _| panic!("boom"));

        unsafe { trampoline(6, b"fatal\0".as_ptr().cast(), ptr::null_mut()) };

        // The slot survives the panic and can be replaced
        let (received, trampoline) = capture();
        unsafe { trampoline(3, b"after\0".as_ptr().cast(), ptr::null_mut()) };
        assert_eq!(*received.lock().unwrap(), vec![(3, "after".to_string())]);
        clear_trace_log_callback();
    }

    #[test]
    #[serial]
    fn test_callback_can_clear_itself() {
        use std::{sync::mpsc, thread, time::Duration};

        let trampoline = trace_log_callback_wrapper(|level, _| {
            if level == 6 {
                clear_trace_log_callback();
            }
        });

        let (done, finished) = mpsc::channel();
        thread::spawn(move || {
            unsafe { trampoline(6, b"FATAL: unhooking\0".as_ptr().cast(), ptr::null_mut()) };
            done.send(()).unwrap();
        });

        finished
            .recv_timeout(Duration::from_secs(5))
            .expect("trampoline blocked while the callback cleared the slot");
        assert!(!has_trace_log_callback());
    }

    #[test]
    #[serial]
    fn test_callback_can_replace_itself() {
        let (received, _) = capture();
        let sink = Arc::clone(&received);
        let trampoline = trace_log_callback_wrapper(move |_, _| {
            let sink = Arc::clone(&sink);
            trace_log_callback_wrapper(move |level, text| {
                sink.lock().unwrap().push((level, text.to_string()));
            });
        });

        unsafe { trampoline(3, b"first\0".as_ptr().cast(), ptr::null_mut()) };
        unsafe { trampoline(4, b"second\0".as_ptr().cast(), ptr::null_mut()) };

        assert_eq!(*received.lock().unwrap(), vec![(4, "second".to_string())]);
        clear_trace_log_callback();
    }

    #[test]
    #[serial]
    fn test_trampoline_formats_va_list() {
        let (received, trampoline) = capture();

        unsafe {
            raylib_dyn_testshim::trace_with_args(
                trampoline,
                3,
                b"TEXTURE: [ID %d] loaded %s (%dx%d)\0".as_ptr().cast(),
                7 as c_int,
                b"atlas.png\0".as_ptr() as *const c_char,
                256 as c_int,
                128 as c_int,
            )
        };

        assert_eq!(
            *received.lock().unwrap(),
            vec![(3, "TEXTURE: [ID 7] loaded atlas.png (256x128)".to_string())]
        );
        clear_trace_log_callback();
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_trampoline_truncates_long_messages() {
        let (received, trampoline) = capture();
        let long = std::ffi::CString::new("x".repeat(3000)).unwrap();

        unsafe {
            raylib_dyn_testshim::trace_with_args(
                trampoline,
                4,
                b"%s\0".as_ptr().cast(),
                long.as_ptr(),
            )
        };

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].1.len(), MAX_MESSAGE_LENGTH - 1);
        assert!(received[0].1.bytes().all(|b| b == b'x'));
        drop(received);
        clear_trace_log_callback();
    }
}
