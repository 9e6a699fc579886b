//! Runtime client backed by a docker-compatible command line tool

use std::process::{Command, Stdio};

use tracing::debug;

use super::{AttachSpec, ContainerRuntime, CreateSpec, ExecOutput};
use crate::error::{DcxError, Result};

/// Shells out to `docker` (or `podman`, or anything that speaks the same CLI).
#[derive(Debug, Clone)]
pub struct CliRuntime {
    program: String,
}

impl CliRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn output(&self, args: &[String]) -> Result<ExecOutput> {
        debug!(command = %render(&self.program, args), "running runtime command");
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.spawn_error(source))?;

        let result = ExecOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(code = ?result.code, "runtime command finished");
        Ok(result)
    }

    fn spawn_error(&self, source: std::io::Error) -> DcxError {
        DcxError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl ContainerRuntime for CliRuntime {
    fn create(&mut self, spec: &CreateSpec) -> Result<ExecOutput> {
        self.output(&create_args(spec))
    }

    fn exec(&mut self, container_id: &str, command: &[String]) -> Result<ExecOutput> {
        self.output(&exec_args(container_id, command))
    }

    fn attach(&mut self, container_id: &str, spec: &AttachSpec) -> Result<Option<i32>> {
        let args = attach_args(container_id, spec, stdin_is_terminal());
        debug!(command = %render(&self.program, &args), "attaching to container");
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| self.spawn_error(source))?;
        Ok(status.code())
    }

    fn remove(&mut self, container_id: &str, force: bool) -> Result<ExecOutput> {
        self.output(&remove_args(container_id, force))
    }
}

/// `run -d -v <host>:<mount> [--rm] <image> <command...>`
pub(crate) fn create_args(spec: &CreateSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "-v".to_string(),
        format!("{}:{}", spec.host_dir.display(), spec.mount_point),
    ];
    if spec.auto_remove {
        args.push("--rm".to_string());
    }
    args.push(spec.image.clone());
    args.extend(spec.command.iter().cloned());
    args
}

pub(crate) fn exec_args(container_id: &str, command: &[String]) -> Vec<String> {
    let mut args = vec!["exec".to_string(), container_id.to_string()];
    args.extend(command.iter().cloned());
    args
}

/// `exec -i[t] -w <dir> -e K=V... <id> <command...>`
pub(crate) fn attach_args(container_id: &str, spec: &AttachSpec, tty: bool) -> Vec<String> {
    let mut args = vec![
        "exec".to_string(),
        if tty { "-it" } else { "-i" }.to_string(),
        "-w".to_string(),
        spec.workdir.clone(),
    ];
    for (key, value) in &spec.env {
        args.push("-e".to_string());
        args.push(format!("{}={}", key, value));
    }
    args.push(container_id.to_string());
    args.extend(spec.command.iter().cloned());
    args
}

pub(crate) fn remove_args(container_id: &str, force: bool) -> Vec<String> {
    let mut args = vec!["rm".to_string()];
    if force {
        args.push("-f".to_string());
    }
    args.push(container_id.to_string());
    args
}

/// Shell-quoted command line for logs and dry-run output.
pub(crate) fn render(program: &str, args: &[String]) -> String {
    shell_words::join(std::iter::once(program).chain(args.iter().map(String::as_str)))
}

/// The runtime refuses `-t` when stdin is not a terminal.
fn stdin_is_terminal() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: isatty only inspects the file descriptor.
        unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn spec(auto_remove: bool) -> CreateSpec {
        CreateSpec {
            image: "alpine".to_string(),
            host_dir: PathBuf::from("/home/me/project"),
            mount_point: "/shared".to_string(),
            auto_remove,
            command: strings(&["sleep", "infinity"]),
        }
    }

    #[test]
    fn test_create_args_persistent() {
        assert_eq!(
            create_args(&spec(false)),
            strings(&[
                "run",
                "-d",
                "-v",
                "/home/me/project:/shared",
                "alpine",
                "sleep",
                "infinity"
            ])
        );
    }

    #[test]
    fn test_create_args_auto_remove() {
        let args = create_args(&spec(true));
        assert_eq!(args[4], "--rm");
        assert_eq!(args[5], "alpine");
    }

    #[test]
    fn test_attach_args() {
        let spec = AttachSpec {
            workdir: "/shared".to_string(),
            env: vec![
                ("HOST_PATH".to_string(), "/home/me".to_string()),
                ("PS1".to_string(), "$ ".to_string()),
            ],
            command: strings(&["bash"]),
        };
        assert_eq!(
            attach_args("c0ffee", &spec, true),
            strings(&[
                "exec",
                "-it",
                "-w",
                "/shared",
                "-e",
                "HOST_PATH=/home/me",
                "-e",
                "PS1=$ ",
                "c0ffee",
                "bash"
            ])
        );
        assert_eq!(attach_args("c0ffee", &spec, false)[1], "-i");
    }

    #[test]
    fn test_remove_args() {
        assert_eq!(remove_args("c0ffee", true), strings(&["rm", "-f", "c0ffee"]));
        assert_eq!(remove_args("c0ffee", false), strings(&["rm", "c0ffee"]));
    }

    #[test]
    fn test_render_quotes_arguments() {
        let args = strings(&["exec", "abc", "bash", "-c", "echo hi"]);
        assert_eq!(render("docker", &args), "docker exec abc bash -c 'echo hi'");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut runtime = CliRuntime::new("dcx-no-such-runtime-binary");
        let err = runtime.remove("abc", true).unwrap_err();
        assert!(matches!(err, DcxError::Spawn { .. }));
    }
}
