//! Session orchestration
//!
//! A session is a fixed sequence of steps against one container:
//!
//! 1. create a detached container with the working directory mounted
//! 2. probe for an interactive shell
//! 3. install it when missing
//! 4. write the prompt init script into the shared mount
//! 5. attach the caller's terminal
//! 6. in remove-on-exit mode, force-remove the container
//!
//! Every step runs once with no retries. In remove-on-exit mode step 6 runs
//! whenever step 1 produced a container, whatever happened in between.

pub mod distro;
pub mod intent;
pub mod prompt;

use tracing::{debug, info, warn};

use crate::error::{CommandFailure, DcxError, Result};
use crate::host::HostContext;
use crate::runtime::{AttachSpec, ContainerRuntime, CreateSpec};

pub use distro::{InstallStep, InstallStepKind, Installer};
pub use intent::{Intent, DEFAULT_IMAGE, REMOVE_TOKEN};

/// Container path the host working directory is bound to
pub const MOUNT_POINT: &str = "/shared";

/// Interactive shell the session runs, also the package that provides it
pub const SHELL: &str = "bash";

/// Keeps the container alive between steps
pub const KEEP_ALIVE: &[&str] = &["sleep", "infinity"];

/// Exit codes the runtime uses for its own failures rather than the shell's.
const ATTACH_FAILURE_CODES: std::ops::RangeInclusive<i32> = 125..=127;

/// What a finished session looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub container_id: String,
    pub shell_installed: bool,
    /// Exit status of the user's shell
    pub exit_code: i32,
    /// Whether the container was removed successfully afterwards
    pub removed: bool,
}

/// Drives one container through the session steps.
pub struct Session<R: ContainerRuntime> {
    runtime: R,
    intent: Intent,
    host: HostContext,
}

impl<R: ContainerRuntime> Session<R> {
    pub fn new(runtime: R, intent: Intent, host: HostContext) -> Self {
        Self {
            runtime,
            intent,
            host,
        }
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    /// Run every step. Cleanup failures are reported but never change the result.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let container_id = self.create_container()?;
        info!(container = %container_id, image = %self.intent.image, "container started");

        let result = self.provision_and_attach(&container_id);

        let removed = if self.intent.remove_on_exit {
            match self.cleanup(&container_id) {
                Ok(()) => true,
                Err(err) => {
                    eprintln!("{}", err);
                    if let Some(output) = err.runtime_output() {
                        eprintln!("Runtime output: {}", output);
                    }
                    false
                }
            }
        } else {
            debug!(container = %container_id, "leaving container running");
            false
        };

        let (shell_installed, exit_code) = result?;
        Ok(SessionOutcome {
            container_id,
            shell_installed,
            exit_code,
            removed,
        })
    }

    fn provision_and_attach(&mut self, container_id: &str) -> Result<(bool, i32)> {
        let mut installed = false;
        if !self.probe_shell(container_id)? {
            println!("Bash not found in the container. Installing...");
            self.install_shell(container_id)?;
            installed = true;
        }
        self.configure_prompt(container_id)?;
        let exit_code = self.attach(container_id)?;
        Ok((installed, exit_code))
    }

    fn create_container(&mut self) -> Result<String> {
        let spec = CreateSpec {
            image: self.intent.image.clone(),
            host_dir: self.host.working_directory.clone(),
            mount_point: MOUNT_POINT.to_string(),
            auto_remove: self.intent.remove_on_exit,
            command: KEEP_ALIVE.iter().map(|s| s.to_string()).collect(),
        };

        let output = self.runtime.create(&spec)?.check().map_err(DcxError::Create)?;
        let container_id = output.stdout.trim().to_string();
        if container_id.is_empty() {
            return Err(DcxError::EmptyContainerId);
        }
        Ok(container_id)
    }

    fn probe_shell(&mut self, container_id: &str) -> Result<bool> {
        let command = vec![
            SHELL.to_string(),
            "-c".to_string(),
            format!("echo '{} exists'", SHELL),
        ];
        let present = self.runtime.exec(container_id, &command)?.success();
        debug!(present, "probed for {}", SHELL);
        Ok(present)
    }

    fn install_shell(&mut self, container_id: &str) -> Result<()> {
        let command = vec!["cat".to_string(), distro::OS_RELEASE_PATH.to_string()];
        let os_release = self
            .runtime
            .exec(container_id, &command)?
            .check()
            .map_err(DcxError::BaseDetection)?
            .combined();

        let installer = Installer::detect(&os_release).ok_or(DcxError::UnsupportedBase)?;
        info!(?installer, "installing {}", SHELL);

        for step in installer.steps(SHELL) {
            let result = self.runtime.exec(container_id, &step.command)?.check();
            match step.kind {
                InstallStepKind::Refresh => result.map_err(DcxError::PackageRefresh)?,
                InstallStepKind::Install => result.map_err(DcxError::ShellInstall)?,
            };
        }
        Ok(())
    }

    fn configure_prompt(&mut self, container_id: &str) -> Result<()> {
        let snippet = prompt::init_snippet(&self.prompt_format());
        let command = prompt::write_snippet_command(SHELL, MOUNT_POINT, &snippet);
        self.runtime
            .exec(container_id, &command)?
            .check()
            .map_err(DcxError::PromptSetup)?;
        Ok(())
    }

    fn attach(&mut self, container_id: &str) -> Result<i32> {
        let spec = AttachSpec {
            workdir: MOUNT_POINT.to_string(),
            env: vec![
                (
                    prompt::HOST_PATH_VAR.to_string(),
                    self.host.working_directory.display().to_string(),
                ),
                (prompt::PROMPT_VAR.to_string(), self.prompt_format()),
            ],
            command: vec![SHELL.to_string()],
        };

        match self.runtime.attach(container_id, &spec)? {
            Some(code) if ATTACH_FAILURE_CODES.contains(&code) => {
                Err(DcxError::Attach(CommandFailure::new(Some(code), "")))
            }
            Some(code) => {
                debug!(code, "interactive session ended");
                Ok(code)
            }
            None => Err(DcxError::Attach(CommandFailure::new(None, ""))),
        }
    }

    fn cleanup(&mut self, container_id: &str) -> Result<()> {
        match self.runtime.remove(container_id, true) {
            Ok(output) => {
                output.check().map_err(DcxError::Cleanup)?;
                info!(container = %container_id, "container removed");
                Ok(())
            }
            Err(err) => {
                warn!(container = %container_id, "container removal could not run");
                Err(err)
            }
        }
    }

    fn prompt_format(&self) -> String {
        prompt::prompt_format(&self.host.user_name)
    }
}
