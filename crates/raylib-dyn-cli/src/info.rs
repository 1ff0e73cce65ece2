// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use clap::Args as ClapArgs;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Only report the embedded payload, do not extract or load raylib
    #[arg(long)]
    no_load: bool,
}

#[derive(Debug, Serialize)]
struct LibraryInfo {
    required_version: String,
    embedded: bool,
    embedded_size: usize,
    extract_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    override_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    loaded: Option<LoadedInfo>,
}

#[derive(Debug, Serialize)]
struct LoadedInfo {
    version: String,
    path: String,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing info command: {:?}", args);

    let loader = crate::loader(None);
    let payload = loader.embedded_payload();

    let mut info = LibraryInfo {
        required_version: raylib_dyn::REQUIRED_VERSION.to_string(),
        embedded: !payload.is_empty(),
        embedded_size: payload.len(),
        extract_path: loader.extract_path().display().to_string(),
        override_path: loader.override_path().map(|p| p.display().to_string()),
        loaded: None,
    };

    if !args.no_load {
        info.loaded = Some(LoadedInfo {
            version: raylib_dyn::version()?,
            path: raylib_dyn::library_path()?.display().to_string(),
        });
    }

    if json {
        let output = serde_json::to_string_pretty(&info)
            .map_err(|e| CliError::General(format!("Failed to serialize info: {}", e)))?;
        println!("{}", output);
    } else {
        print_info(&info);
    }

    Ok(())
}

fn print_info(info: &LibraryInfo) {
    println!("Required version: {}", info.required_version);
    if info.embedded {
        println!("Embedded library: {} bytes (compressed)", info.embedded_size);
    } else {
        println!("Embedded library: none");
    }
    println!("Extract path:     {}", info.extract_path);
    if let Some(path) = &info.override_path {
        println!("Override path:    {}", path);
    }
    if let Some(loaded) = &info.loaded {
        println!("Loaded version:   {}", loaded.version);
        println!("Loaded from:      {}", loaded.path);
    }
}
