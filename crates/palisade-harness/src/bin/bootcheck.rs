//! CLI entrypoint for the palisade bootstrap checker.
//!
//! Runs the trusted bootstrap input resolver against a fixture directory
//! and prints the finalized inputs as JSON. This is also the single
//! controlled termination point: every bootstrap failure is logged once,
//! here, and the process exits nonzero.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use palisade_core::{Bootstrap, BootstrapRequest};
use palisade_harness::{BootReport, DirChannel, RecordingLoader};

/// Resolve trusted bootstrap inputs from a manifest fixture.
#[derive(Debug, Parser)]
#[command(name = "bootcheck")]
#[command(about = "Resolves trusted bootstrap inputs from a manifest fixture")]
struct Cli {
    /// Root directory backing the `file:` namespace.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Manifest URI (e.g. `file:app.manifest`).
    #[arg(long)]
    manifest: Option<String>,
    /// Executable URI (e.g. `file:app`).
    #[arg(long)]
    executable: Option<String>,
    /// Instance identifier recorded in the result.
    #[arg(long, default_value_t = 1)]
    instance: u64,
    /// Host environment entries (repeatable, `KEY=VALUE`).
    #[arg(long = "env", value_name = "KEY=VALUE")]
    envs: Vec<String>,
    /// Host command-line argv, program name first.
    args: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let channel = DirChannel::new(cli.root);
    let mut loader = RecordingLoader::default();
    let request = BootstrapRequest {
        instance_id: cli.instance,
        manifest_uri: cli.manifest,
        executable_uri: cli.executable,
        executable_image: None,
        args: cli.args,
        envs: cli.envs,
    };

    let result = match Bootstrap::new(&channel, &mut loader).run(request) {
        Ok(result) => result,
        Err(err) => {
            log::error!("bootstrap failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&BootReport::new(&result, &loader)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("cannot render report: {err}");
            ExitCode::FAILURE
        }
    }
}
