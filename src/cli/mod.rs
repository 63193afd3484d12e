//! Command-line tasks, independent of argument parsing.

pub mod orchestration;

pub use orchestration::{NextVersion, ReleaseResult};
