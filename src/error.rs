//! Error types for dcx

use std::fmt;

use thiserror::Error;

/// Exit status and combined output of a runtime invocation that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub output: String,
}

impl CommandFailure {
    pub fn new(code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DcxError {
    #[error("Error fetching current directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Error fetching current user: {0}")]
    UserLookup(String),

    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating container: {0}")]
    Create(CommandFailure),

    #[error("Error creating container: runtime returned no container id")]
    EmptyContainerId,

    #[error("Error determining container base: {0}")]
    BaseDetection(CommandFailure),

    #[error("Unsupported container base detected")]
    UnsupportedBase,

    #[error("Error updating package lists: {0}")]
    PackageRefresh(CommandFailure),

    #[error("Error installing Bash: {0}")]
    ShellInstall(CommandFailure),

    #[error("Error setting up environment: {0}")]
    PromptSetup(CommandFailure),

    #[error("Error attaching to container: {0}")]
    Attach(CommandFailure),

    #[error("Error cleaning up container: {0}")]
    Cleanup(CommandFailure),
}

impl DcxError {
    /// Raw runtime output attached to the failure, if any.
    pub fn runtime_output(&self) -> Option<&str> {
        match self {
            DcxError::Create(f)
            | DcxError::BaseDetection(f)
            | DcxError::PackageRefresh(f)
            | DcxError::ShellInstall(f)
            | DcxError::PromptSetup(f)
            | DcxError::Attach(f)
            | DcxError::Cleanup(f) => {
                let trimmed = f.output.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Human-readable hint for container creation failures, keyed on exit status.
    pub fn hint(&self) -> Option<String> {
        match self {
            DcxError::Create(CommandFailure { code: Some(code), .. }) => Some(match code {
                125 => "Is the container runtime daemon running?".to_string(),
                127 => "Command not found inside the container.".to_string(),
                other => format!("Unhandled runtime error with exit code: {}", other),
            }),
            DcxError::Spawn { program, .. } => Some(format!(
                "Is `{}` installed and on PATH?",
                program
            )),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DcxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hint_daemon() {
        let err = DcxError::Create(CommandFailure::new(Some(125), "Cannot connect"));
        assert_eq!(
            err.hint().as_deref(),
            Some("Is the container runtime daemon running?")
        );
    }

    #[test]
    fn test_create_hint_missing_command() {
        let err = DcxError::Create(CommandFailure::new(Some(127), ""));
        assert_eq!(
            err.hint().as_deref(),
            Some("Command not found inside the container.")
        );
    }

    #[test]
    fn test_create_hint_unrecognized() {
        let err = DcxError::Create(CommandFailure::new(Some(3), ""));
        assert_eq!(
            err.hint().as_deref(),
            Some("Unhandled runtime error with exit code: 3")
        );
    }

    #[test]
    fn test_hint_only_for_creation() {
        let err = DcxError::Attach(CommandFailure::new(Some(125), ""));
        assert!(err.hint().is_none());
        assert!(DcxError::UnsupportedBase.hint().is_none());
    }

    #[test]
    fn test_runtime_output_trimmed() {
        let err = DcxError::Create(CommandFailure::new(Some(125), "  daemon down\n"));
        assert_eq!(err.runtime_output(), Some("daemon down"));

        let err = DcxError::PromptSetup(CommandFailure::new(Some(1), "\n"));
        assert_eq!(err.runtime_output(), None);
    }

    #[test]
    fn test_display_includes_status() {
        let err = DcxError::ShellInstall(CommandFailure::new(Some(2), ""));
        assert_eq!(err.to_string(), "Error installing Bash: exit status 2");
    }
}
