// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

// The raylib shared library is shipped inside the crate as a gzip blob and
// unpacked at runtime, so no rustc-link-lib directive is emitted here.

use std::{env, fs, path::PathBuf};

fn library_filename(target_os: &str) -> &'static str {
    match target_os {
        "windows" => "raylib.dll",
        "macos" | "ios" => "libraylib.dylib",
        _ => "libraylib.so",
    }
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    println!("cargo:rerun-if-env-changed=RAYLIB_DYN_BLOB");

    // RAYLIB_DYN_BLOB takes priority over the blob bundled with the crate
    let blob = match env::var_os("RAYLIB_DYN_BLOB") {
        Some(path) => PathBuf::from(path),
        None => manifest_dir
            .join("blobs")
            .join(format!("{}.gz", library_filename(&target_os))),
    };
    println!("cargo:rerun-if-changed={}", blob.display());

    let dest = out_dir.join("raylib.gz");
    if blob.is_file() {
        fs::copy(&blob, &dest).expect("Failed to copy embedded raylib blob");
    } else {
        // An empty payload is reported at runtime as "no embedded library"
        println!(
            "cargo:warning=no raylib blob found at {}, building without an embedded library",
            blob.display()
        );
        fs::write(&dest, b"").expect("Failed to write empty raylib payload");
    }
}
