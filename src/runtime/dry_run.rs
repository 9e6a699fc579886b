//! Recording runtime used by `--dry-run`

use serde::Serialize;

use super::cli::{attach_args, create_args, exec_args, remove_args, render};
use super::{AttachSpec, ContainerRuntime, CreateSpec, ExecOutput};
use crate::error::Result;

/// Placeholder handed back instead of a real container id
pub const DRY_RUN_CONTAINER_ID: &str = "<container-id>";

/// One runtime call that would have been made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn command_line(&self) -> String {
        render(&self.program, &self.args)
    }
}

/// Records every call and reports success without running anything.
///
/// The shell probe therefore always succeeds, so installation never shows up
/// in a dry-run plan.
#[derive(Debug, Clone)]
pub struct DryRunRuntime {
    program: String,
    invocations: Vec<Invocation>,
}

impl DryRunRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            invocations: Vec::new(),
        }
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    fn record(&mut self, args: Vec<String>, stdout: &str) -> ExecOutput {
        self.invocations.push(Invocation {
            program: self.program.clone(),
            args,
        });
        ExecOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }
}

impl ContainerRuntime for DryRunRuntime {
    fn create(&mut self, spec: &CreateSpec) -> Result<ExecOutput> {
        Ok(self.record(create_args(spec), DRY_RUN_CONTAINER_ID))
    }

    fn exec(&mut self, container_id: &str, command: &[String]) -> Result<ExecOutput> {
        Ok(self.record(exec_args(container_id, command), ""))
    }

    fn attach(&mut self, container_id: &str, spec: &AttachSpec) -> Result<Option<i32>> {
        self.record(attach_args(container_id, spec, true), "");
        Ok(Some(0))
    }

    fn remove(&mut self, container_id: &str, force: bool) -> Result<ExecOutput> {
        Ok(self.record(remove_args(container_id, force), ""))
    }
}
