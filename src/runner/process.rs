use crate::error::{ReleaseError, Result};
use crate::runner::{CommandOutput, CommandRunner, CommandSpec, OutputMode};
use crate::ui;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    dry_run: bool,
}

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner { dry_run: false }
    }

    /// Skip every command that is not read-only, echoing it instead
    pub fn dry_run(dry_run: bool) -> Self {
        ProcessRunner { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let line = spec.command_line();

        if spec.output != OutputMode::Quiet {
            ui::display_command(&line);
        }

        if self.dry_run && !spec.read_only {
            info!(command = %line, "dry run: skipped");
            ui::display_skipped(&line);
            return Ok(CommandOutput::success(""));
        }

        debug!(
            program = %spec.program,
            args = ?spec.args,
            cwd = ?spec.current_dir,
            "spawning command"
        );

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }

        let (stdout, stderr) = match spec.output {
            OutputMode::Stream => (Stdio::inherit(), Stdio::inherit()),
            OutputMode::CaptureStdout => (Stdio::piped(), Stdio::inherit()),
            OutputMode::Quiet => (Stdio::piped(), Stdio::piped()),
        };
        cmd.stdin(Stdio::inherit()).stdout(stdout).stderr(stderr);

        let output = cmd.output().map_err(|source| ReleaseError::CommandSpawn {
            program: spec.program.clone(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        };

        debug!(command = %line, code = ?result.code, "command finished");

        if !output.status.success() {
            return Err(ReleaseError::ExternalCommandFailed {
                command: line,
                code: result.code,
                stderr: result.stderr,
            });
        }

        Ok(result)
    }
}
