use crate::error::{ReleaseError, Result};
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};
use std::sync::Mutex;

/// Scripted response keyed on a command-line prefix
#[derive(Debug, Clone)]
struct Rule {
    prefix: Vec<String>,
    output: CommandOutput,
}

/// Mock runner for testing without spawning processes
///
/// Every command is recorded. The first rule whose prefix matches the
/// program and leading arguments decides the output; unmatched commands
/// succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl MockRunner {
    /// Create a new mock runner with no scripted responses
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Reply with `stdout` to commands starting with `prefix`
    pub fn respond<I, S>(mut self, prefix: I, stdout: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.push(Rule {
            prefix: prefix.into_iter().map(Into::into).collect(),
            output: CommandOutput::success(stdout),
        });
        self
    }

    /// Fail commands starting with `prefix` with the given exit code
    pub fn fail<I, S>(mut self, prefix: I, code: i32, stderr: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.push(Rule {
            prefix: prefix.into_iter().map(Into::into).collect(),
            output: CommandOutput::failure(code, stderr),
        });
        self
    }

    /// All commands run so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Command lines run so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(CommandSpec::command_line).collect()
    }

    /// Whether any recorded command starts with `prefix`
    pub fn ran(&self, prefix: &[&str]) -> bool {
        self.calls().iter().any(|c| matches_prefix(c, prefix))
    }
}

fn matches_prefix<S: AsRef<str>>(spec: &CommandSpec, prefix: &[S]) -> bool {
    let mut words = std::iter::once(spec.program.as_str()).chain(spec.args.iter().map(String::as_str));
    prefix
        .iter()
        .all(|expected| words.next() == Some(expected.as_ref()))
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(spec.clone());
        }

        let output = self
            .rules
            .iter()
            .find(|rule| matches_prefix(spec, rule.prefix.as_slice()))
            .map(|rule| rule.output.clone())
            .unwrap_or_else(|| CommandOutput::success(""));

        if output.is_success() {
            Ok(output)
        } else {
            Err(ReleaseError::ExternalCommandFailed {
                command: spec.command_line(),
                code: output.code,
                stderr: output.stderr,
            })
        }
    }
}
