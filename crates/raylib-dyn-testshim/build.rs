// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

fn main() {
    println!("cargo:rerun-if-changed=csrc/trace_shim.c");

    cc::Build::new()
        .file("csrc/trace_shim.c")
        .compile("raylib_dyn_trace_shim");
}
