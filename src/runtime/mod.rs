//! Container runtime client
//!
//! The session only talks to the runtime through [`ContainerRuntime`], so the
//! real CLI client can be swapped for a recorder (dry run) or a fake in tests.

mod cli;
mod dry_run;

use std::path::PathBuf;

pub use cli::CliRuntime;
pub use dry_run::{DryRunRuntime, Invocation};

use crate::error::{CommandFailure, Result};

/// Default container runtime client binary
pub const DEFAULT_RUNTIME: &str = "docker";

/// Parameters for creating a detached, long-lived container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpec {
    pub image: String,
    /// Host directory bound into the container
    pub host_dir: PathBuf,
    pub mount_point: String,
    /// Ask the runtime to delete the container once it stops
    pub auto_remove: bool,
    /// Foreground process that keeps the container alive
    pub command: Vec<String>,
}

/// Parameters for an interactive session inside a running container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachSpec {
    pub workdir: String,
    pub env: Vec<(String, String)>,
    pub command: Vec<String>,
}

/// Captured result of a non-interactive runtime call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr, the way the runtime printed them.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        out.push_str(&self.stderr);
        out
    }

    /// Turn a non-zero result into a [`CommandFailure`], keeping the raw output.
    pub fn check(self) -> std::result::Result<ExecOutput, CommandFailure> {
        if self.success() {
            Ok(self)
        } else {
            Err(CommandFailure::new(self.code, self.combined()))
        }
    }
}

/// Operations the session needs from a container runtime.
///
/// `Err` is reserved for failures to run the runtime at all; a runtime that ran
/// and reported failure comes back as an [`ExecOutput`] with a non-zero code.
pub trait ContainerRuntime {
    /// Create a detached container. On success `stdout` holds the container id.
    fn create(&mut self, spec: &CreateSpec) -> Result<ExecOutput>;

    /// Run a command inside a container and capture its output.
    fn exec(&mut self, container_id: &str, command: &[String]) -> Result<ExecOutput>;

    /// Run an interactive command with the caller's terminal passed through.
    /// Blocks until it ends and returns its exit code.
    fn attach(&mut self, container_id: &str, spec: &AttachSpec) -> Result<Option<i32>>;

    /// Remove a container.
    fn remove(&mut self, container_id: &str, force: bool) -> Result<ExecOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_success() {
        let out = ExecOutput {
            code: Some(0),
            stdout: "abc\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(out.check().unwrap().stdout, "abc\n");
    }

    #[test]
    fn test_check_failure_keeps_output() {
        let out = ExecOutput {
            code: Some(125),
            stdout: "partial\n".to_string(),
            stderr: "Unable to find image\n".to_string(),
        };
        let failure = out.check().unwrap_err();
        assert_eq!(failure.code, Some(125));
        assert_eq!(failure.output, "partial\nUnable to find image\n");
    }

    #[test]
    fn test_signal_is_not_success() {
        let out = ExecOutput::default();
        assert!(!out.success());
    }
}
