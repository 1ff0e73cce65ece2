// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies
//
// Runtime tests against a real raylib 5.0 build.
//
// RUN (with the embedded library, or pointing at one):
//   RAYLIB_LIBRARY=/path/to/libraylib.so cargo test --test raylib_runtime -- --ignored --nocapture

use raylib_dyn::TraceLogLevel;
use serial_test::serial;
use std::sync::{Arc, Mutex};

#[test]
#[serial]
#[ignore = "requires raylib 5.0 (embedded or RAYLIB_LIBRARY)"]
fn test_load_and_version() {
    let _ = env_logger::builder().is_test(true).try_init();

    raylib_dyn::init().unwrap();
    assert!(raylib_dyn::is_loaded());
    assert_eq!(raylib_dyn::version().unwrap(), raylib_dyn::REQUIRED_VERSION);

    let path = raylib_dyn::library_path().unwrap();
    println!("raylib loaded from {}", path.display());
    assert!(path.exists());
}

#[test]
#[serial]
#[ignore = "requires raylib 5.0 (embedded or RAYLIB_LIBRARY)"]
fn test_trace_log_reaches_callback() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    raylib_dyn::set_trace_log_callback(move |level, text| {
        sink.lock().unwrap().push((level, text.to_string()));
    })
    .unwrap();
    raylib_dyn::set_trace_log_level(TraceLogLevel::All).unwrap();

    // A literal percent sign must survive the %s indirection
    raylib_dyn::trace_log(TraceLogLevel::Warning, "50% loaded").unwrap();

    raylib_dyn::reset_trace_log_callback().unwrap();

    let received = received.lock().unwrap();
    assert!(received.contains(&(TraceLogLevel::Warning, "50% loaded".to_string())));
}

#[test]
#[serial]
#[ignore = "requires raylib 5.0 (embedded or RAYLIB_LIBRARY)"]
fn test_trace_log_level_filters_messages() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    raylib_dyn::set_trace_log_callback(move |level, text| {
        sink.lock().unwrap().push((level, text.to_string()));
    })
    .unwrap();
    raylib_dyn::set_trace_log_level(TraceLogLevel::Error).unwrap();

    raylib_dyn::trace_log(TraceLogLevel::Info, "filtered").unwrap();
    raylib_dyn::trace_log(TraceLogLevel::Error, "kept").unwrap();

    raylib_dyn::reset_trace_log_callback().unwrap();
    raylib_dyn::set_trace_log_level(TraceLogLevel::Info).unwrap();

    let received = received.lock().unwrap();
    assert_eq!(
        *received,
        vec![(TraceLogLevel::Error, "kept".to_string())]
    );
}
