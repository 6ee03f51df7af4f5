//! IDL location: package share directory lookup and `msg/<Type>.idl` checks.
//!
//! A package that cannot be found is recorded and skipped. A missing `msg`
//! directory or `.idl` file is warned about and skipped. Only an empty
//! overall result is fatal, and that is the caller's call.

use super::types::{Diagnostic, MessageDescriptor, PackageMessageMap};
use crate::report::Reporter;
use crate::transport::{render_command, ProcessRunner};
use std::path::PathBuf;

/// Result of resolving every package in the list.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Package order follows the list, message order follows the list
    pub descriptors: Vec<MessageDescriptor>,
    /// Packages whose registry lookup failed
    pub missing_packages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Ask the registry for a package's share directory.
///
/// `registry_command` gets the package name appended. A spawn failure,
/// a non-zero exit and empty output are all lookup failures.
pub fn find_share_dir(
    package: &str,
    registry_command: &[String],
    runner: &dyn ProcessRunner,
) -> Result<PathBuf, String> {
    let mut argv = registry_command.to_vec();
    argv.push(package.to_string());

    let out = runner
        .run(&argv)
        .map_err(|e| format!("cannot run `{}`: {}", render_command(&argv), e))?;
    if !out.success() {
        return Err(format!(
            "`{}` exited with code {}: {}",
            render_command(&argv),
            out.exit_code,
            out.stderr.trim()
        ));
    }

    let share = out.stdout.trim();
    if share.is_empty() {
        return Err(format!("empty share path for package '{}'", package));
    }
    Ok(PathBuf::from(share))
}

/// Locate `<share>/msg/<Type>.idl` for every listed message.
pub fn locate_idl_files(
    packages: &PackageMessageMap,
    registry_command: &[String],
    runner: &dyn ProcessRunner,
    log: &dyn Reporter,
) -> Resolution {
    let mut resolution = Resolution::default();

    for (package, message_types) in packages {
        let share_dir = match find_share_dir(package, registry_command, runner) {
            Ok(dir) => dir,
            Err(reason) => {
                log.error(&format!("Package '{}' not found. Is it installed?", package));
                log.debug(&format!("Lookup details for {}: {}", package, reason));
                resolution.missing_packages.push(package.clone());
                resolution.diagnostics.push(Diagnostic::PackageLookupFailed {
                    package: package.clone(),
                    reason,
                });
                continue;
            }
        };

        let msg_dir = share_dir.join("msg");
        if !msg_dir.is_dir() {
            log.warn(&format!(
                "No 'msg' directory found for package {} at {}",
                package,
                msg_dir.display()
            ));
            resolution.diagnostics.push(Diagnostic::MissingMsgDir {
                package: package.clone(),
                path: msg_dir,
            });
            continue;
        }

        for message_type in message_types {
            let idl_path = msg_dir.join(format!("{}.idl", message_type));
            if !idl_path.exists() {
                log.warn(&format!("IDL file not found: {}", idl_path.display()));
                resolution.diagnostics.push(Diagnostic::MissingIdlFile {
                    package: package.clone(),
                    message_type: message_type.clone(),
                    path: idl_path,
                });
                continue;
            }

            let descriptor = MessageDescriptor::new(package, message_type, idl_path);
            log.debug(&format!("Resolved {}", descriptor));
            resolution.descriptors.push(descriptor);
        }
    }

    if !resolution.missing_packages.is_empty() {
        log.error(&format!(
            "Missing packages: {}. Generation may be incomplete.",
            resolution.missing_packages.join(", ")
        ));
    }

    resolution
}
