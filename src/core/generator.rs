//! Batch generation: one generator process per package.
//!
//! For each package group: create `<output>/<package>/msg`, run the generator
//! over every resolved `.idl` of the package, then check that a lowercase
//! `.h`/`.c` pair exists for each message. A failing package is logged and
//! skipped; it never aborts the batch.

use super::error::{Result, UxrError};
use super::types::{Diagnostic, GeneratedFileSet, MessageDescriptor};
use crate::report::Reporter;
use crate::transport::{render_command, ProcessRunner};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

pub const CASE_SENSITIVE_FLAG: &str = "-cs";
pub const REPLACE_FLAG: &str = "-replace";
pub const OUTPUT_DIR_FLAG: &str = "-d";
pub const INCLUDE_FLAG: &str = "-I";

/// How to invoke the generator.
#[derive(Debug, Clone)]
pub struct GenerateOptions<'a> {
    pub generator: &'a str,
    pub output_dir: &'a Path,
    pub include_dirs: &'a [PathBuf],
    pub replace: bool,
    /// Log the command lines, touch nothing
    pub dry_run: bool,
}

/// Result of a generation batch.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    pub generated: GeneratedFileSet,
    /// Packages whose generator run failed
    pub failed_packages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Group descriptors by package, first-seen package order.
pub fn group_by_package(
    descriptors: &[MessageDescriptor],
) -> IndexMap<&str, Vec<&MessageDescriptor>> {
    let mut groups: IndexMap<&str, Vec<&MessageDescriptor>> = IndexMap::new();
    for d in descriptors {
        groups.entry(d.package.as_str()).or_default().push(d);
    }
    groups
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Build the generator argv for one package.
///
/// Order: binary, `-cs`, `-replace` (omitted when disabled), `-d <dir>`,
/// `-I <dir>` per include, then the absolute `.idl` paths.
pub fn build_command(
    opts: &GenerateOptions,
    pkg_output_dir: &Path,
    idl_files: &[&Path],
) -> Vec<String> {
    let replace_flag = if opts.replace { REPLACE_FLAG } else { "" };

    let mut argv = vec![
        opts.generator.to_string(),
        CASE_SENSITIVE_FLAG.to_string(),
        replace_flag.to_string(),
        OUTPUT_DIR_FLAG.to_string(),
        pkg_output_dir.display().to_string(),
    ];
    for include in opts.include_dirs {
        argv.push(INCLUDE_FLAG.to_string());
        argv.push(include.display().to_string());
    }
    argv.extend(idl_files.iter().map(|p| absolute(p).display().to_string()));

    argv.retain(|arg| !arg.is_empty());
    argv
}

fn relative_to<'p>(path: &'p Path, root: &Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Run the generator for every package group.
///
/// Only a failure to create the output root is an `Err`.
pub fn generate(
    descriptors: &[MessageDescriptor],
    opts: &GenerateOptions,
    runner: &dyn ProcessRunner,
    log: &dyn Reporter,
) -> Result<GenerationOutcome> {
    let mut outcome = GenerationOutcome::default();

    if !opts.dry_run {
        std::fs::create_dir_all(opts.output_dir).map_err(|e| {
            UxrError::io(format!("cannot create {}", opts.output_dir.display()), e)
        })?;
    }

    for (package, group) in group_by_package(descriptors) {
        log.info(&format!("Processing package: {}", package));

        let pkg_output_dir = opts.output_dir.join(group[0].rel_dir());
        let idl_files: Vec<&Path> = group.iter().map(|d| d.idl_path.as_path()).collect();
        let argv = build_command(opts, &pkg_output_dir, &idl_files);
        let command = render_command(&argv);

        if opts.dry_run {
            log.info(&format!("Would run: {}", command));
            continue;
        }

        if let Err(e) = std::fs::create_dir_all(&pkg_output_dir) {
            log.error(&format!(
                "Cannot create {} for package {}: {}",
                pkg_output_dir.display(),
                package,
                e
            ));
            record_failure(&mut outcome, package, command, -1, e.to_string());
            continue;
        }

        log.debug(&format!("Running command: {}", command));
        let out = match runner.run(&argv) {
            Ok(out) => out,
            Err(e) => {
                log.error(&format!("Failed to generate code for package {}", package));
                log.error(&format!("Command: {}", command));
                log.error(&format!("Could not start generator: {}", e));
                record_failure(&mut outcome, package, command, -1, e);
                continue;
            }
        };

        if !out.success() {
            log.error(&format!("Failed to generate code for package {}", package));
            log.error(&format!("Command: {}", command));
            log.error(&format!("Error code: {}", out.exit_code));
            log.error(&format!("Stderr:\n{}", out.stderr.trim_end()));
            record_failure(&mut outcome, package, command, out.exit_code, out.stderr);
            continue;
        }

        log.debug(&format!(
            "Generation output for {}:\n{}",
            package,
            out.stdout.trim_end()
        ));
        verify_outputs(&group, &pkg_output_dir, opts.output_dir, &mut outcome, log);
    }

    Ok(outcome)
}

fn record_failure(
    outcome: &mut GenerationOutcome,
    package: &str,
    command: String,
    exit_code: i32,
    stderr: String,
) {
    outcome.failed_packages.push(package.to_string());
    outcome.diagnostics.push(Diagnostic::GeneratorFailed {
        package: package.to_string(),
        command,
        exit_code,
        stderr,
    });
}

/// Record each message whose header and source both exist.
fn verify_outputs(
    group: &[&MessageDescriptor],
    pkg_output_dir: &Path,
    output_root: &Path,
    outcome: &mut GenerationOutcome,
    log: &dyn Reporter,
) {
    for d in group {
        let header = pkg_output_dir.join(d.header_name());
        let source = pkg_output_dir.join(d.source_name());

        if header.exists() && source.exists() {
            log.info(&format!(
                "Generated: {}",
                relative_to(&header, output_root).display()
            ));
            log.info(&format!(
                "Generated: {}",
                relative_to(&source, output_root).display()
            ));
            outcome.generated.push(header);
            outcome.generated.push(source);
        } else {
            log.warn(&format!(
                "Missing generated files for {}/{}",
                d.package, d.message_type
            ));
            outcome.diagnostics.push(Diagnostic::MissingGeneratedOutput {
                package: d.package.clone(),
                message_type: d.message_type.clone(),
            });
        }
    }
}
