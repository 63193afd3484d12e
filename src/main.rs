use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use docs_release::boundary::BoundaryWarning;
use docs_release::cli::orchestration;
use docs_release::config::load_settings;
use docs_release::context::TaskContext;
use docs_release::domain::BumpKind;
use docs_release::logging;
use docs_release::runner::ProcessRunner;
use docs_release::ui;

#[derive(Parser)]
#[command(
    name = "docs-release",
    version,
    about = "Build, version, release and deploy the documentation server image"
)]
struct Args {
    #[arg(long, global = true, help = "Project root (defaults to the current directory)")]
    root: Option<PathBuf>,

    #[arg(long, global = true, help = "Custom settings file path")]
    settings: Option<PathBuf>,

    #[arg(long, global = true, help = "Print side-effecting commands instead of running them")]
    dry_run: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the docs HTML
    Prepare,

    /// Build the server docker image
    Build {
        /// Image reference to tag the build with
        tag: String,
    },

    /// Run a docker image locally
    Run {
        image: String,
        /// Host port mapped to the server port
        port: u16,
    },

    /// Build, tag and push the docker image
    Push {
        /// Config name (resolved under the config directory) or path
        config: String,
        version_tag: String,
    },

    /// Print the next version number derived from git tags
    Version {
        #[arg(long, default_value = "prerelease")]
        bump: BumpKind,
    },

    /// Bump version, push docker image, push git tag (commit changes first)
    Release {
        config: String,
        #[arg(long, default_value = "prerelease")]
        version_bump: BumpKind,
    },

    /// Update the cluster deployment to a version
    Deploy {
        config: String,
        version_tag: String,
    },

    /// Show which image is live in the cluster
    Live { config: String },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let settings = load_settings(args.settings.as_deref(), &root)
        .context("Error loading settings")?;

    if args.dry_run {
        ui::display_boundary_warning(&BoundaryWarning::DryRun);
    }

    let ctx = TaskContext::new(ProcessRunner::dry_run(args.dry_run), settings, root);

    match args.command {
        Commands::Prepare => {
            orchestration::prepare(&ctx).context("prepare failed")?;
            ui::display_success("Documentation built");
        }
        Commands::Build { tag } => {
            orchestration::build(&ctx, &tag).context("build failed")?;
            ui::display_success(&format!("Built image {}", tag));
        }
        Commands::Run { image, port } => {
            orchestration::run(&ctx, &image, port).context("run failed")?;
        }
        Commands::Push {
            config,
            version_tag,
        } => {
            let config = ctx.load_config(&config)?;
            let reference =
                orchestration::push(&ctx, &config, &version_tag).context("push failed")?;
            ui::display_success(&format!("Pushed image {}", reference));
        }
        Commands::Version { bump } => {
            let next = orchestration::next_version(&ctx, bump)?;
            println!("{}", next.version);
        }
        Commands::Release {
            config,
            version_bump,
        } => {
            let config = ctx.load_config(&config)?;
            let result =
                orchestration::release(&ctx, &config, version_bump).context("release failed")?;
            ui::display_release_info(&result);
        }
        Commands::Deploy {
            config,
            version_tag,
        } => {
            let config = ctx.load_config(&config)?;
            let reference =
                orchestration::deploy(&ctx, &config, &version_tag).context("deploy failed")?;
            ui::display_success(&format!("Deployment updated to {}", reference));
        }
        Commands::Live { config } => {
            let config = ctx.load_config(&config)?;
            let image = orchestration::live(&ctx, &config).context("live check failed")?;
            println!("{}", image);
        }
    }

    Ok(())
}
