// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Test helper standing in for raylib's `TraceLog`: it forwards a printf
//! format and its variadic arguments to a trace log callback as a `va_list`.

use std::ffi::{c_char, c_int, c_void};

pub type TraceLogCallback =
    unsafe extern "C" fn(log_level: c_int, text: *const c_char, args: *mut c_void);

extern "C" {
    #[link_name = "raylib_dyn_trace_with_args"]
    pub fn trace_with_args(cb: TraceLogCallback, log_level: c_int, text: *const c_char, ...);
}
