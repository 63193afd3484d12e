//! Container registry push

use crate::config::RegistryConfig;
use crate::context::TaskContext;
use crate::error::{ReleaseError, Result};
use crate::runner::{CommandRunner, CommandSpec};

pub fn push_command(registry: &RegistryConfig, image: &str) -> Result<CommandSpec> {
    let (program, args) = registry
        .push_command
        .split_first()
        .ok_or_else(|| ReleaseError::config("registry.push_command must not be empty"))?;

    Ok(CommandSpec::new(program.as_str())
        .args(args.iter().cloned())
        .arg(image))
}

pub fn push<R: CommandRunner>(ctx: &TaskContext<R>, image: &str) -> Result<()> {
    let cmd = push_command(&ctx.settings.registry, image)?.current_dir(ctx.root());
    ctx.runner.run(&cmd)?;
    Ok(())
}
