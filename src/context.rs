use crate::config::{ConfigLoader, ReleaseConfig, Settings};
use crate::error::Result;
use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};

/// Everything a task needs: where the project lives, how it is configured,
/// and how external commands are run.
pub struct TaskContext<R: CommandRunner> {
    pub runner: R,
    pub settings: Settings,
    root: PathBuf,
}

impl<R: CommandRunner> TaskContext<R> {
    pub fn new(runner: R, settings: Settings, root: impl Into<PathBuf>) -> Self {
        TaskContext {
            runner,
            settings,
            root: root.into(),
        }
    }

    /// Project root; external commands run here
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_loader(&self) -> ConfigLoader {
        ConfigLoader::from_settings(&self.root, &self.settings)
    }

    /// Load a release config by name or path
    pub fn load_config(&self, name: &str) -> Result<ReleaseConfig> {
        self.config_loader().load(name)
    }
}
