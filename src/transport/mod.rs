//! External process execution.
//!
//! The registry lookup and the code generator are both reached through a
//! [`ProcessRunner`], so the stages never spawn processes themselves.

pub mod local;

#[cfg(test)]
pub mod fake;

pub use local::LocalRunner;

/// Output from running an external command to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an argv synchronously and captures its output.
///
/// `Err` means the process could not be started at all; a process that ran
/// and failed is `Ok` with a non-zero `exit_code`.
pub trait ProcessRunner {
    fn run(&self, argv: &[String]) -> Result<ExecOutput, String>;
}

/// Render an argv for logs, space separated.
pub fn render_command(argv: &[String]) -> String {
    argv.join(" ")
}
