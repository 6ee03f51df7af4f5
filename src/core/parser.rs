//! Message list parsing.
//!
//! One `package/MessageType` entry per line. Blank lines and lines starting
//! with `#` are ignored. Malformed lines are skipped with a warning; a list
//! with some bad lines still yields the good ones.

use super::error::{Result, UxrError};
use super::types::PackageMessageMap;
use crate::report::Reporter;
use std::path::Path;

/// Classification of a single list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLine<'a> {
    /// Blank or comment
    Ignored,
    Entry {
        package: &'a str,
        message_type: &'a str,
    },
    /// No `/`, or an empty side once trimmed
    Malformed,
}

/// Classify one line. Splits on the first `/` only.
pub fn classify_line(line: &str) -> ListLine<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return ListLine::Ignored;
    }

    let Some((package, message_type)) = line.split_once('/') else {
        return ListLine::Malformed;
    };
    let package = package.trim();
    let message_type = message_type.trim();
    if package.is_empty() || message_type.is_empty() {
        return ListLine::Malformed;
    }

    ListLine::Entry {
        package,
        message_type,
    }
}

/// Parse a message list file from disk.
///
/// An empty result is not an error here; the caller decides that.
pub fn parse_message_list(path: &Path, log: &dyn Reporter) -> Result<PackageMessageMap> {
    if !path.exists() {
        return Err(UxrError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| UxrError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_message_list_str(&content, log))
}

/// Parse message list content.
pub fn parse_message_list_str(content: &str, log: &dyn Reporter) -> PackageMessageMap {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut packages = PackageMessageMap::new();

    for (idx, line) in content.lines().enumerate() {
        match classify_line(line) {
            ListLine::Ignored => {}
            ListLine::Entry {
                package,
                message_type,
            } => packages
                .entry(package.to_string())
                .or_default()
                .push(message_type.to_string()),
            ListLine::Malformed => log.warn(&format!(
                "Invalid message format on line {}: '{}'. Skipping.",
                idx + 1,
                line.trim()
            )),
        }
    }

    packages
}
