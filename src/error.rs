use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for docs-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Malformed version '{tag}': {reason}")]
    MalformedVersion { tag: String, reason: String },

    #[error("No version tags found in repository")]
    NoVersionHistory,

    #[error("Invalid bump kind '{0}' (expected prerelease, patch, minor or major)")]
    InvalidBumpKind(String),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid image reference: {0}")]
    InvalidImage(String),

    #[error("Command `{command}` failed with exit code {}{}", code_label(.code), stderr_suffix(.stderr))]
    ExternalCommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to start `{program}`: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected command output: {0}")]
    UnexpectedOutput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// Convenience type alias for Results in docs-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a malformed version error for the given tag
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseError::MalformedVersion {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid image error with context
    pub fn image(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidImage(msg.into())
    }

    /// Create an unexpected output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        ReleaseError::UnexpectedOutput(msg.into())
    }
}
