//! Process execution with event emission

use async_trait::async_trait;
use pkgv_errors::PlatformError;
use pkgv_events::{AppEvent, EventEmitter, PlatformEvent};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::core::PlatformContext;

/// Platform-specific command builder
#[derive(Debug, Clone)]
pub struct PlatformCommand {
    program: PathBuf,
    args: Vec<String>,
    env_vars: Vec<(String, String)>,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env_vars: Vec::new(),
        }
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set an environment variable for the child process
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn get_env_vars(&self) -> &[(String, String)] {
        &self.env_vars
    }

    /// Program and arguments as one shell-like string, for messages
    #[must_use]
    pub fn display(&self) -> String {
        let mut text = self.program.display().to_string();
        for arg in &self.args {
            text.push(' ');
            text.push_str(arg);
        }
        text
    }
}

/// Output from command execution
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    #[must_use]
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    #[must_use]
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Execute a command and return the output
    ///
    /// A non-zero exit status is not an error here; callers inspect
    /// [`CommandOutput::status`].
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, PlatformError>;
}

/// Runs commands on the host with `tokio::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProcessOperations;

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl ProcessOperations for HostProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, PlatformError> {
        let start = Instant::now();
        let command_str = cmd.program().display().to_string();

        ctx.emit(AppEvent::Platform(PlatformEvent::ProcessExecutionStarted {
            command: command_str.clone(),
            args: cmd.get_args().to_vec(),
        }));

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());
        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        match command.output().await {
            Ok(output) => {
                ctx.emit(AppEvent::Platform(PlatformEvent::ProcessExecutionCompleted {
                    command: command_str,
                    exit_code: output.status.code(),
                    duration_ms: duration_to_millis(start.elapsed()),
                }));
                Ok(CommandOutput {
                    status: output.status,
                    stdout: output.stdout,
                    stderr: output.stderr,
                })
            }
            Err(e) => {
                ctx.emit(AppEvent::Platform(PlatformEvent::ProcessExecutionFailed {
                    command: command_str.clone(),
                    error_message: e.to_string(),
                    duration_ms: duration_to_millis(start.elapsed()),
                }));
                Err(PlatformError::ProcessExecutionFailed {
                    command: command_str,
                    message: e.to_string(),
                })
            }
        }
    }
}
