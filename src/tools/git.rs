//! Version-control commands, run through the system `git`

use crate::context::TaskContext;
use crate::domain::ReleaseTag;
use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};

/// Tag listing sorted newest first by version order
pub fn list_tags_command() -> CommandSpec {
    CommandSpec::new("git")
        .args(["tag", "--sort=-v:refname"])
        .quiet()
}

/// Annotated tag carrying the release message
pub fn create_tag_command(tag: &ReleaseTag) -> CommandSpec {
    CommandSpec::new("git").args(["tag", tag.as_str(), "-m", tag.message().as_str()])
}

pub fn push_tag_command(remote: &str, tag: &ReleaseTag) -> CommandSpec {
    CommandSpec::new("git").args(["push", remote, tag.as_str()])
}

/// All tags, newest version first
pub fn list_tags<R: CommandRunner>(ctx: &TaskContext<R>) -> Result<Vec<String>> {
    let output = ctx
        .runner
        .run(&list_tags_command().current_dir(ctx.root()))?;
    Ok(output.lines())
}

pub fn create_tag<R: CommandRunner>(ctx: &TaskContext<R>, tag: &ReleaseTag) -> Result<()> {
    ctx.runner
        .run(&create_tag_command(tag).current_dir(ctx.root()))?;
    Ok(())
}

pub fn push_tag<R: CommandRunner>(ctx: &TaskContext<R>, tag: &ReleaseTag) -> Result<()> {
    ctx.runner
        .run(&push_tag_command(&ctx.settings.git.remote, tag).current_dir(ctx.root()))?;
    Ok(())
}
