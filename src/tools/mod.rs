//! Command builders for the external tools docs-release drives
//!
//! Each submodule turns settings and release values into [CommandSpec]s and,
//! where a step is a single command, runs it through the task's runner.
//!
//! [CommandSpec]: crate::runner::CommandSpec

pub mod docker;
pub mod git;
pub mod kubectl;
pub mod registry;
