//! JSON run summary (`--summary <file>`).

use crate::core::error::{Result, UxrError};
use crate::core::types::RunSummary;
use std::path::Path;

/// Write the summary as pretty JSON, atomically (temp file, then rename).
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| UxrError::io(format!("cannot create {}", parent.display()), e))?;
    }

    let json = serde_json::to_string_pretty(summary).map_err(|e| {
        UxrError::io(
            "cannot serialize run summary",
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json)
        .map_err(|e| UxrError::io(format!("cannot write {}", tmp_path.display()), e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        UxrError::io(
            format!("cannot rename {} to {}", tmp_path.display(), path.display()),
            e,
        )
    })?;

    Ok(())
}
