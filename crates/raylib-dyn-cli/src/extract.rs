// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use clap::Args as ClapArgs;
use raylib_dyn::Unpacked;
use serde::Serialize;
use std::{fs, path::PathBuf};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Directory to extract into (default: RAYLIB_EXTRACT_DIR or the system temp dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Replace an existing library instead of keeping it
    #[arg(short, long)]
    force: bool,
}

#[derive(Debug, Serialize)]
struct ExtractResult {
    path: String,
    written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<u64>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing extract command: {:?}", args);

    if let Some(dir) = &args.dir {
        if !dir.is_dir() {
            return Err(CliError::InvalidArgs(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    }

    let loader = crate::loader(args.dir.as_deref());
    let path = loader.extract_path();

    if args.force && path.exists() {
        log::info!("Removing existing {}", path.display());
        fs::remove_file(&path)?;
    }

    let result = match loader.embedded_payload().unpack_to(&path)? {
        Unpacked::Existing => ExtractResult {
            path: path.display().to_string(),
            written: false,
            bytes: None,
        },
        Unpacked::Written(bytes) => ExtractResult {
            path: path.display().to_string(),
            written: true,
            bytes: Some(bytes),
        },
    };

    if json {
        let output = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::General(format!("Failed to serialize result: {}", e)))?;
        println!("{}", output);
    } else if let Some(bytes) = result.bytes {
        println!("Extracted {} bytes to {}", bytes, result.path);
    } else {
        println!("Already present: {}", result.path);
    }

    Ok(())
}
