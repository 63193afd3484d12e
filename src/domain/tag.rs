use semver::Version;
use std::fmt;

/// Prefix joining a version into a release tag
pub const TAG_PREFIX: &str = "v";

/// The `v`-prefixed tag naming one release
///
/// The same string tags the container image and the git repository, so the
/// two can never disagree for a given release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    version: Version,
    name: String,
}

impl ReleaseTag {
    pub fn new(version: Version) -> Self {
        let name = format!("{}{}", TAG_PREFIX, version);
        ReleaseTag { version, name }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Annotation message stored on the git tag
    pub fn message(&self) -> String {
        format!("Version {}", self.version)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
