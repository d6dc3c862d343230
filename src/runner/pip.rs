//! pip invoked as a child process.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use super::{CommandError, CommandRunner, OutputMode, Subcommand};

/// Runs `<program> <base_args> <subcommand> <args>`, by default
/// `python -m pip ...`.
///
/// The child is killed if the future running it is dropped, so an
/// interrupted call never leaves a package manager running behind it.
#[derive(Debug, Clone)]
pub struct PipRunner {
    program: PathBuf,
    base_args: Vec<String>,
}

impl Default for PipRunner {
    fn default() -> Self {
        Self::new("python")
    }
}

impl PipRunner {
    /// Run pip as a module of the given Python interpreter.
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self::with_program(python, ["-m", "pip"])
    }

    /// Run an arbitrary pip-compatible program.
    pub fn with_program<I, S>(program: impl Into<PathBuf>, base_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            base_args: base_args.into_iter().map(Into::into).collect(),
        }
    }

    /// The full command line for a run, as shown in logs and errors.
    pub fn command_line(&self, subcommand: Subcommand, args: &[String]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.base_args.iter().cloned());
        parts.extend(subcommand.pip_args().iter().map(|s| s.to_string()));
        parts.extend(args.iter().cloned());
        parts.join(" ")
    }

    fn command(&self, subcommand: Subcommand, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(subcommand.pip_args())
            .args(args)
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CommandRunner for PipRunner {
    #[tracing::instrument(skip(self))]
    async fn run(
        &self,
        subcommand: Subcommand,
        args: &[String],
        mode: OutputMode,
    ) -> Result<Option<String>> {
        let command_line = self.command_line(subcommand, args);
        let mut cmd = self.command(subcommand, args);
        debug!("Running {}", command_line);

        match mode {
            OutputMode::Capture => {
                let output = cmd
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .with_context(|| format!("Failed to run {}", command_line))?;

                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

                if !output.status.success() {
                    debug!("{} failed with {}", command_line, output.status);
                    return Err(CommandError {
                        command: command_line,
                        status: output.status.code(),
                        stderr: Some(stderr),
                    }
                    .into());
                }
                if !stderr.trim().is_empty() {
                    debug!("{} stderr: {}", command_line, stderr.trim_end());
                }

                info!("{} finished", command_line);
                Ok(Some(stdout))
            }
            OutputMode::Inherit => {
                let status = cmd
                    .status()
                    .await
                    .with_context(|| format!("Failed to run {}", command_line))?;

                if !status.success() {
                    return Err(CommandError {
                        command: command_line,
                        status: status.code(),
                        stderr: None,
                    }
                    .into());
                }

                info!("{} finished", command_line);
                Ok(None)
            }
        }
    }
}
