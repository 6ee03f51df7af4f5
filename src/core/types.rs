//! Value types shared by the parse, resolve and generate stages.
//!
//! Everything here lives for a single invocation. Nothing is persisted except
//! the optional JSON run summary.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Parser output
// ============================================================================

/// Package name to message types, in the order the list file declared them.
///
/// Duplicate `package/Message` lines are kept; the generator overwrites its
/// own output so a repeated entry only costs a redundant run.
pub type PackageMessageMap = IndexMap<String, Vec<String>>;

// ============================================================================
// Resolver output
// ============================================================================

/// One interface definition located inside an installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDescriptor {
    /// Owning package (e.g. `sensor_msgs`)
    pub package: String,

    /// Message type name as written in the list (e.g. `Imu`)
    pub message_type: String,

    /// Path of `<share>/msg/<MessageType>.idl`
    pub idl_path: PathBuf,
}

impl MessageDescriptor {
    pub fn new(package: &str, message_type: &str, idl_path: PathBuf) -> Self {
        Self {
            package: package.to_string(),
            message_type: message_type.to_string(),
            idl_path,
        }
    }

    /// Header the generator is expected to emit, e.g. `imu.h`.
    pub fn header_name(&self) -> String {
        header_file_name(&self.message_type)
    }

    /// Source the generator is expected to emit, e.g. `imu.c`.
    pub fn source_name(&self) -> String {
        source_file_name(&self.message_type)
    }

    /// Output subdirectory relative to the output root, `<package>/msg`.
    pub fn rel_dir(&self) -> PathBuf {
        package_output_subdir(&self.package)
    }
}

impl fmt::Display for MessageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} at {}",
            self.package,
            self.message_type,
            self.idl_path.display()
        )
    }
}

pub fn header_file_name(message_type: &str) -> String {
    format!("{}.h", message_type.to_lowercase())
}

pub fn source_file_name(message_type: &str) -> String {
    format!("{}.c", message_type.to_lowercase())
}

pub fn package_output_subdir(package: &str) -> PathBuf {
    Path::new(package).join("msg")
}

// ============================================================================
// Generator output
// ============================================================================

/// Output files confirmed on disk after generation, across all packages.
pub type GeneratedFileSet = Vec<PathBuf>;

// ============================================================================
// Diagnostics
// ============================================================================

/// A non-fatal problem isolated to one package or message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Registry lookup failed or returned an empty path.
    PackageLookupFailed { package: String, reason: String },

    /// Share directory has no `msg` subdirectory.
    MissingMsgDir { package: String, path: PathBuf },

    /// `<MessageType>.idl` is absent from the `msg` directory.
    MissingIdlFile {
        package: String,
        message_type: String,
        path: PathBuf,
    },

    /// Generator exited non-zero (or could not be started, exit code -1).
    GeneratorFailed {
        package: String,
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// Generator succeeded but the expected `.h`/`.c` pair is incomplete.
    MissingGeneratedOutput {
        package: String,
        message_type: String,
    },
}

impl Diagnostic {
    pub fn package(&self) -> &str {
        match self {
            Self::PackageLookupFailed { package, .. }
            | Self::MissingMsgDir { package, .. }
            | Self::MissingIdlFile { package, .. }
            | Self::GeneratorFailed { package, .. }
            | Self::MissingGeneratedOutput { package, .. } => package,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageLookupFailed { package, reason } => {
                write!(f, "package '{}' lookup failed: {}", package, reason)
            }
            Self::MissingMsgDir { package, path } => write!(
                f,
                "no 'msg' directory for package {} at {}",
                package,
                path.display()
            ),
            Self::MissingIdlFile { path, .. } => {
                write!(f, "IDL file not found: {}", path.display())
            }
            Self::GeneratorFailed {
                package, exit_code, ..
            } => write!(
                f,
                "generator failed for package {} (exit code {})",
                package, exit_code
            ),
            Self::MissingGeneratedOutput {
                package,
                message_type,
            } => write!(
                f,
                "missing generated files for {}/{}",
                package, message_type
            ),
        }
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// What one invocation did; written as JSON with `--summary`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub packages_requested: usize,
    pub descriptors_resolved: usize,
    /// Relative to `output_dir`
    pub generated_files: Vec<PathBuf>,
    pub missing_packages: Vec<String>,
    pub failed_packages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}
