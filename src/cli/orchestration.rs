//! Task workflows
//!
//! Each public function here is one CLI task. They take a [TaskContext] so
//! the same logic runs against real processes or a recording mock. Steps
//! run strictly in order and the first failure aborts the task; nothing is
//! retried or rolled back.

use semver::Version;
use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::config::ReleaseConfig;
use crate::context::TaskContext;
use crate::domain::{self, BumpKind, ImageRef, ReleaseTag};
use crate::error::{ReleaseError, Result};
use crate::runner::CommandRunner;
use crate::tools::{docker, git, kubectl, registry};
use crate::ui;

/// Result of a successful release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseResult {
    /// Tag applied to both the image and the repository
    pub tag: ReleaseTag,

    /// Image name without tag
    pub image: String,

    /// Fully-qualified image reference that was pushed
    pub reference: String,
}

/// Outcome of computing the next version
#[derive(Debug, Clone, PartialEq)]
pub struct NextVersion {
    /// Latest existing tag, if any
    pub previous: Option<String>,
    pub version: Version,
}

/// Compute the next version from the repository's tags
///
/// A repository without tags starts at `release.initial_version`; the bump
/// kind is not applied to the seed.
pub fn next_version<R: CommandRunner>(ctx: &TaskContext<R>, bump: BumpKind) -> Result<NextVersion> {
    let tags = git::list_tags(ctx)?;

    match domain::latest_tag(&tags) {
        Ok(latest) => {
            let version = domain::resolve(latest, bump)?;
            info!(previous = latest, next = %version, bump = %bump, "resolved version");
            Ok(NextVersion {
                previous: Some(latest.to_string()),
                version,
            })
        }
        Err(ReleaseError::NoVersionHistory) => {
            let seed = &ctx.settings.release.initial_version;
            let version = Version::parse(seed).map_err(|e| {
                ReleaseError::config(format!("release.initial_version '{}': {}", seed, e))
            })?;
            ui::display_boundary_warning(&BoundaryWarning::NoVersionHistory {
                seed: version.to_string(),
            });
            Ok(NextVersion {
                previous: None,
                version,
            })
        }
        Err(e) => Err(e),
    }
}

/// Generate the HTML documentation
///
/// Builds the docs builder image through docker-compose first if it is not
/// present locally.
pub fn prepare<R: CommandRunner>(ctx: &TaskContext<R>) -> Result<()> {
    if !docker::builder_image_exists(ctx)? {
        ui::display_status(&format!(
            "Builder image '{}' not found, building it",
            ctx.settings.docs.builder_image
        ));
        ctx.runner.run(
            &docker::compose_build_command(&ctx.settings.docs.builder_service)
                .current_dir(ctx.root()),
        )?;
    }

    ctx.runner.run(&docker::render_docs_command(ctx))?;
    Ok(())
}

/// Generate docs, then build the server image tagged `image`
pub fn build<R: CommandRunner>(ctx: &TaskContext<R>, image: &str) -> Result<()> {
    prepare(ctx)?;
    ctx.runner.run(&docker::build_image_command(ctx, image))?;
    Ok(())
}

/// Run an image locally, publishing the server port on `port`
pub fn run<R: CommandRunner>(ctx: &TaskContext<R>, image: &str, port: u16) -> Result<()> {
    ImageRef::parse(image)?;
    ctx.runner.run(&docker::run_image_command(
        image,
        port,
        ctx.settings.deploy.container_port,
    ))?;
    Ok(())
}

/// Build and push `<IMAGE>:<version_tag>`, returning the pushed reference
pub fn push<R: CommandRunner>(
    ctx: &TaskContext<R>,
    config: &ReleaseConfig,
    version_tag: &str,
) -> Result<String> {
    let reference = ImageRef::parse(&config.image)?.qualified(version_tag)?;

    build(ctx, &reference)?;
    registry::push(ctx, &reference)?;
    Ok(reference)
}

/// Bump the version, push the image and publish the git tag
///
/// Order: resolve version, build, registry push, create tag, push tag.
/// Commit changes before releasing; a failure leaves earlier steps in place.
pub fn release<R: CommandRunner>(
    ctx: &TaskContext<R>,
    config: &ReleaseConfig,
    bump: BumpKind,
) -> Result<ReleaseResult> {
    let image = ImageRef::parse(&config.image)?;
    let next = next_version(ctx, bump)?;
    let tag = ReleaseTag::new(next.version);
    let reference = image.qualified(tag.as_str())?;

    ui::display_status(&format!(
        "Releasing {} ({} -> {})",
        reference,
        next.previous.as_deref().unwrap_or("none"),
        tag
    ));

    build(ctx, &reference)?;
    registry::push(ctx, &reference)?;
    ui::display_success(&format!("Pushed image {}", reference));

    git::create_tag(ctx, &tag)?;
    git::push_tag(ctx, &tag)?;
    ui::display_success(&format!(
        "Pushed tag {} to {}",
        tag, ctx.settings.git.remote
    ));

    Ok(ReleaseResult {
        tag,
        image: image.name,
        reference,
    })
}

/// Point the cluster deployment at `<IMAGE>:<version_tag>`
pub fn deploy<R: CommandRunner>(
    ctx: &TaskContext<R>,
    config: &ReleaseConfig,
    version_tag: &str,
) -> Result<String> {
    let target = config.deployment()?;
    let reference = ImageRef::parse(&config.image)?.qualified(version_tag)?;

    ctx.runner.run(&kubectl::set_image_command(
        &target,
        &ctx.settings.deploy.container,
        &reference,
    ))?;
    Ok(reference)
}

/// Image currently running in the cluster deployment
pub fn live<R: CommandRunner>(ctx: &TaskContext<R>, config: &ReleaseConfig) -> Result<String> {
    let target = config.deployment()?;
    let output = ctx.runner.run(&kubectl::get_deployment_command(&target))?;

    let live = kubectl::parse_live_image(&output.stdout, &ctx.settings.deploy.container)?;
    if !live.matched {
        ui::display_boundary_warning(&BoundaryWarning::ContainerNotFound {
            expected: ctx.settings.deploy.container.clone(),
            used: live.container.clone(),
            deployment: target.project_name.to_string(),
        });
    }
    Ok(live.image)
}
