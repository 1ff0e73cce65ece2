// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;
use std::{fs, io, path::PathBuf};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Directory the library was extracted into (default: RAYLIB_EXTRACT_DIR or the system temp dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CleanResult {
    path: String,
    removed: bool,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing clean command: {:?}", args);

    let path = crate::loader(args.dir.as_deref()).extract_path();

    let removed = match fs::remove_file(&path) {
        Ok(()) => true,
        Err(err) if err.kind() == io::ErrorKind::NotFound => false,
        Err(err) => return Err(err.into()),
    };

    let result = CleanResult {
        path: path.display().to_string(),
        removed,
    };

    if json {
        let output = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::General(format!("Failed to serialize result: {}", e)))?;
        println!("{}", output);
    } else if removed {
        println!("Removed {}", result.path);
    } else {
        println!("Nothing to remove at {}", result.path);
    }

    Ok(())
}
