//! Container commands: docs builder, image build, local run

use crate::context::TaskContext;
use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};
use std::path::Path;

/// Prints the builder image id, or nothing when it is missing
pub fn builder_image_query(builder_image: &str) -> CommandSpec {
    CommandSpec::new("docker")
        .args(["images", "-q", builder_image])
        .quiet()
}

pub fn compose_build_command(service: &str) -> CommandSpec {
    CommandSpec::new("docker-compose").args(["build", service])
}

/// Generate the HTML docs inside the builder container
///
/// Source and build directories are bind-mounted from the project root.
pub fn render_docs_command<R: CommandRunner>(ctx: &TaskContext<R>) -> CommandSpec {
    let docs = &ctx.settings.docs;
    let workdir = docs.workdir.trim_end_matches('/');
    let mount = |host: &Path, name: &str| {
        let container = format!("{}/{}", workdir, name);
        format!("{}:{}", ctx.root().join(host).display(), container)
    };

    CommandSpec::new("docker")
        .args(["run", "--rm", "-v"])
        .arg(mount(docs.source_dir.as_path(), "source"))
        .arg("-v")
        .arg(mount(docs.build_dir.as_path(), "build"))
        .args(["-w", workdir, docs.builder_image.as_str()])
        .args(["bundle", "exec", "middleman", "build", "--clean"])
        .current_dir(ctx.root())
}

pub fn build_image_command<R: CommandRunner>(ctx: &TaskContext<R>, image: &str) -> CommandSpec {
    CommandSpec::new("docker")
        .args(["build", "-f"])
        .arg(ctx.settings.paths.dockerfile.display().to_string())
        .args(["-t", image, "."])
        .current_dir(ctx.root())
}

pub fn run_image_command(image: &str, host_port: u16, container_port: u16) -> CommandSpec {
    CommandSpec::new("docker").args([
        "run".to_string(),
        "-p".to_string(),
        format!("{}:{}", host_port, container_port),
        image.to_string(),
    ])
}

/// Whether the docs builder image exists locally
pub fn builder_image_exists<R: CommandRunner>(ctx: &TaskContext<R>) -> Result<bool> {
    let output = ctx
        .runner
        .run(&builder_image_query(&ctx.settings.docs.builder_image))?;
    Ok(!output.stdout.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::runner::MockRunner;

    fn ctx() -> TaskContext<MockRunner> {
        TaskContext::new(MockRunner::new(), Settings::default(), "/repo")
    }

    #[test]
    fn test_render_docs_command_mounts_project_dirs() {
        let cmd = render_docs_command(&ctx());
        assert_eq!(
            cmd.command_line(),
            "docker run --rm -v /repo/source:/usr/src/app/source -v /repo/build:/usr/src/app/build \
             -w /usr/src/app docs_middleman bundle exec middleman build --clean"
        );
    }

    #[test]
    fn test_build_image_command() {
        let cmd = build_image_command(&ctx(), "registry/app:v1.0.0");
        assert_eq!(
            cmd.command_line(),
            "docker build -f server/Dockerfile -t registry/app:v1.0.0 ."
        );
        assert_eq!(cmd.current_dir.as_deref(), Some(Path::new("/repo")));
    }

    #[test]
    fn test_run_image_command() {
        assert_eq!(
            run_image_command("docs:v1", 8080, 80).command_line(),
            "docker run -p 8080:80 docs:v1"
        );
    }

    #[test]
    fn test_builder_image_exists() {
        let present = TaskContext::new(
            MockRunner::new().respond(["docker", "images"], "3f2a9c1b\n"),
            Settings::default(),
            "/repo",
        );
        assert!(builder_image_exists(&present).unwrap());
        assert!(!builder_image_exists(&ctx()).unwrap());
    }
}
