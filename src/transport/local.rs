//! Local process runner on top of `std::process::Command`.

use super::{ExecOutput, ProcessRunner};
use std::process::{Command, Stdio};

/// Spawns argv[0] with the remaining arguments and waits for it.
/// No shell is involved and no timeout is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalRunner;

impl ProcessRunner for LocalRunner {
    fn run(&self, argv: &[String]) -> Result<ExecOutput, String> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| "empty command line".to_string())?;

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| format!("failed to spawn {}: {}", program, e))?;

        Ok(ExecOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
