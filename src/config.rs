use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for tool settings
pub const SETTINGS_FILE: &str = "docs-release.toml";

/// Extension appended to release config names
pub const CONFIG_EXTENSION: &str = ".yaml";

/// Tool-level settings for docs-release.
///
/// Every section has defaults matching the documentation server layout, so an
/// absent settings file is equivalent to an empty one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub release: ReleaseSettings,
}

/// Repository-relative locations.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the release configs, relative to the project root
    pub config_dir: PathBuf,
    pub dockerfile: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            config_dir: PathBuf::from("server"),
            dockerfile: PathBuf::from("server/Dockerfile"),
        }
    }
}

/// Documentation builder container.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    pub builder_image: String,
    /// docker-compose service that builds `builder_image`
    pub builder_service: String,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Working directory inside the builder container
    pub workdir: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            builder_image: "docs_middleman".to_string(),
            builder_service: "middleman".to_string(),
            source_dir: PathBuf::from("source"),
            build_dir: PathBuf::from("build"),
            workdir: "/usr/src/app".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GitConfig {
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: "origin".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Program and leading arguments; the image reference is appended
    pub push_command: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            push_command: vec![
                "gcloud".to_string(),
                "docker".to_string(),
                "--".to_string(),
                "push".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeployConfig {
    /// Container name inside the deployment whose image is updated
    pub container: String,
    /// Port the server listens on inside the container
    pub container_port: u16,
}

impl Default for DeployConfig {
    fn default() -> Self {
        DeployConfig {
            container: "docs-server".to_string(),
            container_port: 80,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReleaseSettings {
    /// Version published when the repository has no tags yet
    pub initial_version: String,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        ReleaseSettings {
            initial_version: "0.1.0".to_string(),
        }
    }
}

impl Settings {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.registry.push_command.is_empty() {
            return Err(ReleaseError::config("registry.push_command must not be empty"));
        }
        if self.git.remote.trim().is_empty() {
            return Err(ReleaseError::config("git.remote must not be empty"));
        }
        semver::Version::parse(&self.release.initial_version).map_err(|e| {
            ReleaseError::config(format!(
                "release.initial_version '{}' is not a semantic version: {}",
                self.release.initial_version, e
            ))
        })?;
        Ok(())
    }
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `docs-release.toml` in the project root
/// 3. `docs-release.toml` in the user config directory
/// 4. Default settings if no file found
pub fn load_settings(custom: Option<&Path>, root: &Path) -> Result<Settings> {
    let path = match custom {
        Some(path) => {
            if !path.exists() {
                return Err(ReleaseError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path.to_path_buf())
        }
        None => settings_candidates(root).into_iter().find(|p| p.exists()),
    };

    let settings = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading settings");
            let text = fs::read_to_string(&path)?;
            toml::from_str::<Settings>(&text).map_err(|e| {
                ReleaseError::config(format!("{}: {}", path.display(), e))
            })?
        }
        None => Settings::default(),
    };

    settings.validate()?;
    Ok(settings)
}

fn settings_candidates(root: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![root.join(SETTINGS_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(SETTINGS_FILE));
    }
    candidates
}

/// Per-environment release configuration (`server/<name>.yaml`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Image identifier, `name[:tag]`; the tag is replaced on release
    #[serde(rename = "IMAGE")]
    pub image: String,

    #[serde(rename = "PROJECT_NAME", default)]
    pub project_name: Option<String>,

    #[serde(rename = "NAMESPACE", default)]
    pub namespace: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Deployment coordinates required by deploy and live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentTarget<'a> {
    pub project_name: &'a str,
    pub namespace: &'a str,
}

impl ReleaseConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: ReleaseConfig =
            serde_yaml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))?;
        if config.image.trim().is_empty() {
            return Err(ReleaseError::config("IMAGE must not be empty"));
        }
        Ok(config)
    }

    /// Project name and namespace, failing when either is missing
    pub fn deployment(&self) -> Result<DeploymentTarget<'_>> {
        let project_name = required(&self.project_name, "PROJECT_NAME")?;
        let namespace = required(&self.namespace, "NAMESPACE")?;
        Ok(DeploymentTarget {
            project_name,
            namespace,
        })
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ReleaseError::config(format!("missing required key {}", key))),
    }
}

/// Resolves release config names against an explicit base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        ConfigLoader {
            base_dir: base_dir.into(),
        }
    }

    /// Loader rooted at `<root>/<paths.config_dir>`
    pub fn from_settings(root: &Path, settings: &Settings) -> Self {
        ConfigLoader::new(root.join(&settings.paths.config_dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map a config name to its file path
    ///
    /// `prod` becomes `<base>/prod.yaml`; absolute paths are kept as given.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let mut file = name.to_string();
        if !file.ends_with(CONFIG_EXTENSION) {
            file.push_str(CONFIG_EXTENSION);
        }

        let path = PathBuf::from(file);
        if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn load(&self, name: &str) -> Result<ReleaseConfig> {
        let path = self.resolve(name);
        if !path.is_file() {
            return Err(ReleaseError::ConfigNotFound(path));
        }

        tracing::debug!(path = %path.display(), "loading release config");
        let text = fs::read_to_string(&path)?;
        ReleaseConfig::from_yaml(&text)
            .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.paths.config_dir, PathBuf::from("server"));
        assert_eq!(settings.git.remote, "origin");
        assert_eq!(settings.deploy.container, "docs-server");
        assert_eq!(settings.release.initial_version, "0.1.0");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings: Settings = toml::from_str("[git]\nremote = \"upstream\"\n").unwrap();
        assert_eq!(settings.git.remote, "upstream");
        assert_eq!(settings.docs.builder_image, "docs_middleman");
        assert_eq!(settings.deploy.container_port, 80);
    }

    #[test]
    fn test_settings_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.registry.push_command.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.release.initial_version = "one".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_resolve_appends_extension() {
        let loader = ConfigLoader::new("/repo/server");
        assert_eq!(loader.resolve("prod"), PathBuf::from("/repo/server/prod.yaml"));
        assert_eq!(
            loader.resolve("prod.yaml"),
            PathBuf::from("/repo/server/prod.yaml")
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_path() {
        let loader = ConfigLoader::new("/repo/server");
        assert_eq!(
            loader.resolve("/etc/docs/staging"),
            PathBuf::from("/etc/docs/staging.yaml")
        );
    }

    #[test]
    fn test_from_settings_joins_root() {
        let loader = ConfigLoader::from_settings(Path::new("/repo"), &Settings::default());
        assert_eq!(loader.base_dir(), Path::new("/repo/server"));
    }

    #[test]
    fn test_release_config_from_yaml() {
        let config = ReleaseConfig::from_yaml(
            "IMAGE: gcr.io/docs/server:latest\nPROJECT_NAME: docs\nNAMESPACE: prod\nREPLICAS: 2\n",
        )
        .unwrap();
        assert_eq!(config.image, "gcr.io/docs/server:latest");
        let target = config.deployment().unwrap();
        assert_eq!(target.project_name, "docs");
        assert_eq!(target.namespace, "prod");
        assert!(config.extra.contains_key("REPLICAS"));
    }

    #[test]
    fn test_release_config_requires_image() {
        assert!(ReleaseConfig::from_yaml("PROJECT_NAME: docs\n").is_err());
        assert!(ReleaseConfig::from_yaml("IMAGE: ''\n").is_err());
    }

    #[test]
    fn test_deployment_requires_keys() {
        let config = ReleaseConfig::from_yaml("IMAGE: docs\nPROJECT_NAME: docs\n").unwrap();
        let err = config.deployment().unwrap_err();
        assert!(err.to_string().contains("NAMESPACE"));
    }
}
