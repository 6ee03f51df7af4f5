//! Run orchestration: parse → resolve → generate → summarize.
//!
//! Strictly sequential. The two fatal checks (nothing parsed, nothing
//! resolved) happen before anything is written to the output root.

use super::config::Settings;
use super::error::{Result, UxrError};
use super::generator::{self, GenerateOptions};
use super::parser;
use super::resolver;
use super::types::RunSummary;
use crate::report::{summary, Reporter};
use crate::transport::ProcessRunner;
use std::path::Path;

/// Execute a full run.
pub fn run(
    settings: &Settings,
    runner: &dyn ProcessRunner,
    log: &dyn Reporter,
) -> Result<RunSummary> {
    // 1. Parse the message list
    log.info(&format!(
        "Parsing message list: {}",
        settings.message_file.display()
    ));
    let packages = parser::parse_message_list(&settings.message_file, log)?;
    if packages.is_empty() {
        return Err(UxrError::InputEmpty {
            path: settings.message_file.clone(),
        });
    }
    log.info(&format!("Found {} packages with messages", packages.len()));

    // 2. Locate IDL files
    log.info("Locating IDL files in ROS 2 system...");
    let resolution =
        resolver::locate_idl_files(&packages, &settings.registry_command, runner, log);
    if resolution.descriptors.is_empty() {
        return Err(UxrError::NoIdlFiles);
    }
    log.info(&format!(
        "Found {} IDL files for generation",
        resolution.descriptors.len()
    ));

    // 3. Generate
    log.info(&format!(
        "Generating code to: {}",
        settings.output_dir.display()
    ));
    let opts = GenerateOptions {
        generator: &settings.generator,
        output_dir: &settings.output_dir,
        include_dirs: &settings.include_dirs,
        replace: settings.replace,
        dry_run: settings.dry_run,
    };
    let outcome = generator::generate(&resolution.descriptors, &opts, runner, log)?;

    // 4. Report
    let mut diagnostics = resolution.diagnostics;
    diagnostics.extend(outcome.diagnostics);
    let run_summary = RunSummary {
        output_dir: settings.output_dir.clone(),
        packages_requested: packages.len(),
        descriptors_resolved: resolution.descriptors.len(),
        generated_files: outcome
            .generated
            .iter()
            .map(|p| relative_path(p, &settings.output_dir))
            .collect(),
        missing_packages: resolution.missing_packages,
        failed_packages: outcome.failed_packages,
        diagnostics,
    };

    if settings.dry_run {
        log.info("Dry run: generator not invoked.");
    } else {
        log.info("Generation completed!");
    }
    log.info(&format!(
        "Total files generated: {}",
        run_summary.generated_files.len()
    ));
    log.info(&format!(
        "Output directory: {}",
        std::path::absolute(&settings.output_dir)
            .unwrap_or_else(|_| settings.output_dir.clone())
            .display()
    ));

    if let Some(path) = &settings.summary_path {
        summary::write_summary(path, &run_summary)?;
        log.info(&format!("Summary written to {}", path.display()));
    }

    Ok(run_summary)
}

fn relative_path(path: &Path, root: &Path) -> std::path::PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
