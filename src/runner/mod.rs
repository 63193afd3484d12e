//! External command execution layer
//!
//! Every external tool (docker, git, kubectl, the registry CLI) is reached
//! through the [CommandRunner] trait. Commands are described structurally by
//! [CommandSpec] as a program plus an argument array and never pass through
//! a shell, so config-sourced values such as image names or namespaces cannot
//! inject extra commands.
//!
//! # Implementations
//!
//! - [process::ProcessRunner]: spawns real processes with `std::process`
//! - [mock::MockRunner]: records commands and replays scripted outputs
//!
//! ```rust
//! # use docs_release::runner::{CommandRunner, CommandSpec};
//! # fn example<R: CommandRunner>(runner: &R) -> docs_release::Result<()> {
//! let output = runner.run(&CommandSpec::new("git").args(["tag", "--sort=-v:refname"]).quiet())?;
//! println!("{}", output.stdout);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod process;

pub use mock::MockRunner;
pub use process::ProcessRunner;

use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// How a command's output reaches the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Echo the command line and stream stdout/stderr to the console
    Stream,
    /// Echo the command line, capture stdout, stream stderr
    CaptureStdout,
    /// No echo; capture both streams silently
    Quiet,
}

/// A structured external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub output: OutputMode,
    /// Only queries external state; still executed in dry-run mode
    pub read_only: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            output: OutputMode::Stream,
            read_only: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Capture everything without echoing; marks the command read-only
    pub fn quiet(mut self) -> Self {
        self.output = OutputMode::Quiet;
        self.read_only = true;
        self
    }

    /// Echo the command, capture stdout; marks the command read-only
    pub fn capture_stdout(mut self) -> Self {
        self.output = OutputMode::CaptureStdout;
        self.read_only = true;
        self
    }

    /// The command as an operator would type it
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(display_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn display_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Successful output carrying the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// Failed output with an exit code and stderr text
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Non-empty trimmed stdout lines
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Synchronous command execution
///
/// `run` blocks until the command exits. A non-success exit status is an
/// error ([crate::error::ReleaseError::ExternalCommandFailed]), so callers
/// only ever see output from commands that succeeded.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}
