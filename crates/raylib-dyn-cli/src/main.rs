// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

mod clean;
mod error;
mod extract;
mod info;

use clap::{Parser, Subcommand};
use error::result_to_exit_code;
use std::process::ExitCode;

/// raylib-dyn CLI - Inspect and manage the embedded raylib library
#[derive(Parser)]
#[command(name = "raylib-dyn")]
#[command(version)]
#[command(about = "raylib-dyn CLI - Inspect and manage the embedded raylib library")]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=debug for more)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the embedded payload, extraction path and loaded raylib version
    Info(info::Args),

    /// Unpack the embedded raylib library to disk
    Extract(extract::Args),

    /// Remove a previously extracted raylib library
    Clean(clean::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Info(args) => info::execute(args, cli.json),
        Commands::Extract(args) => extract::execute(args, cli.json),
        Commands::Clean(args) => clean::execute(args, cli.json),
    };

    result_to_exit_code(result)
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    // Determine log level from flags or RUST_LOG environment variable
    let env = env_logger::Env::default();

    let env = if quiet {
        env.default_filter_or("error")
    } else if verbose {
        env.default_filter_or("debug")
    } else {
        env.default_filter_or("info")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::debug!("Logging initialized");
}

/// Loader honouring RAYLIB_LIBRARY / RAYLIB_EXTRACT_DIR, with `--dir`
/// taking priority over the environment.
pub(crate) fn loader(dir: Option<&std::path::Path>) -> raylib_dyn::Loader {
    let loader = raylib_dyn::Loader::from_env();
    match dir {
        Some(dir) => loader.extract_dir(dir),
        None => loader,
    }
}
