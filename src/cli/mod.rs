//! Command-line surface.

use crate::core::config::{self, Overrides, Settings};
use crate::core::error::{Result, UxrError};
use crate::core::pipeline;
use crate::core::types::RunSummary;
use crate::report::Reporter;
use crate::transport::ProcessRunner;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "uxrgen",
    version,
    about = "Generate Micro XRCE-DDS type support from installed ROS 2 message IDL files"
)]
pub struct Cli {
    /// File listing one `<package>/<MessageType>` per line
    pub message_file: PathBuf,

    /// Output directory [default: ./uxr_generated]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra include directories passed to the generator
    #[arg(short = 'I', long = "include", num_args = 1..)]
    pub include: Vec<PathBuf>,

    /// Do not overwrite existing generated files
    #[arg(long)]
    pub no_replace: bool,

    /// Enable debug output (generator command lines and output)
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file [default: ./uxrgen.yaml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generator binary
    #[arg(long)]
    pub generator: Option<String>,

    /// Resolve and print generator commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run summary to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            include: self.include.clone(),
            no_replace: self.no_replace,
            generator: self.generator.clone(),
            dry_run: self.dry_run,
            summary: self.summary.clone(),
        }
    }
}

/// Resolve settings from the config file (if any) and the flags.
pub fn build_settings(cli: &Cli, cwd: &Path, log: &dyn Reporter) -> Result<Settings> {
    let (file, used) = config::discover_config(cli.config.as_deref(), cwd)?;
    if let Some(path) = used {
        log.debug(&format!("Using config {}", path.display()));
    }
    Ok(Settings::merge(
        cli.message_file.clone(),
        file,
        cli.overrides(),
        cwd,
    ))
}

/// Run the CLI.
pub fn dispatch(
    cli: &Cli,
    runner: &dyn ProcessRunner,
    log: &dyn Reporter,
) -> Result<RunSummary> {
    let cwd = std::env::current_dir()
        .map_err(|e| UxrError::io("cannot determine current directory", e))?;
    let settings = build_settings(cli, &cwd, log)?;
    pipeline::run(&settings, runner, log)
}
