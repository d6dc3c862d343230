//! Package manager invocation.
//!
//! A [`CommandRunner`] executes one package manager subcommand and hands back
//! its standard output when asked to capture it. Captured output is collected
//! into buffers owned by the call; the caller's own stdout and stderr are
//! never redirected.

mod pip;

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

pub use pip::PipRunner;

/// Package manager operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    Install,
    Uninstall,
    Freeze,
    Upgrade,
}

impl Subcommand {
    /// Arguments that select this operation on the pip command line.
    ///
    /// Uninstall never prompts, since a captured run has no terminal to
    /// answer on.
    pub fn pip_args(&self) -> &'static [&'static str] {
        match self {
            Subcommand::Install => &["install"],
            Subcommand::Uninstall => &["uninstall", "--yes"],
            Subcommand::Freeze => &["freeze"],
            Subcommand::Upgrade => &["install", "--upgrade"],
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subcommand::Install => write!(f, "install"),
            Subcommand::Uninstall => write!(f, "uninstall"),
            Subcommand::Freeze => write!(f, "freeze"),
            Subcommand::Upgrade => write!(f, "upgrade"),
        }
    }
}

/// What happens to the child's output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Collect stdout and stderr; stdout is returned, stderr feeds errors
    #[default]
    Capture,
    /// Let the child write straight to this process's terminal
    Inherit,
}

/// A package manager run that exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    /// The command line that was run
    pub command: String,
    /// Exit code, `None` if the child was killed by a signal
    pub status: Option<i32>,
    /// Captured standard error, `None` when output was not captured
    pub stderr: Option<String>,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stderr.as_deref().map(str::trim) {
            Some(stderr) if !stderr.is_empty() => f.write_str(stderr),
            _ => {
                write!(f, "Error running command: \"{}\"", self.command)?;
                if let Some(code) = self.status {
                    write!(f, " (exit code {})", code)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Runs package manager subcommands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `subcommand` with `args`.
    ///
    /// Returns the captured standard output in [`OutputMode::Capture`] and
    /// `None` in [`OutputMode::Inherit`]. A nonzero exit yields a
    /// [`CommandError`].
    async fn run(
        &self,
        subcommand: Subcommand,
        args: &[String],
        mode: OutputMode,
    ) -> Result<Option<String>>;
}
