use crate::domain::prerelease::next_prerelease;
use crate::error::{ReleaseError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// Which component of a version a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpKind {
    #[default]
    Prerelease,
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    /// All bump kinds, in increasing order of impact
    pub const ALL: [BumpKind; 4] = [
        BumpKind::Prerelease,
        BumpKind::Patch,
        BumpKind::Minor,
        BumpKind::Major,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BumpKind::Prerelease => "prerelease",
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
        }
    }
}

impl FromStr for BumpKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prerelease" => Ok(BumpKind::Prerelease),
            "patch" => Ok(BumpKind::Patch),
            "minor" => Ok(BumpKind::Minor),
            "major" => Ok(BumpKind::Major),
            _ => Err(ReleaseError::InvalidBumpKind(s.to_string())),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a version from a tag string (e.g., "v1.2.3" -> 1.2.3)
///
/// A single leading non-digit character is treated as a prefix and dropped.
pub fn parse_tag(tag: &str) -> Result<Version> {
    let trimmed = tag.trim();
    let mut chars = trimmed.chars();
    let body = match chars.next() {
        Some(c) if !c.is_ascii_digit() => chars.as_str(),
        Some(_) => trimmed,
        None => return Err(ReleaseError::malformed(tag, "empty tag")),
    };

    Version::parse(body).map_err(|e| ReleaseError::malformed(tag, e.to_string()))
}

/// Bump a version according to the bump kind
///
/// - **Prerelease**: advance the pre-release, keep major/minor/patch
/// - **Patch**: patch += 1
/// - **Minor**: minor += 1, patch = 0
/// - **Major**: major += 1, minor = 0, patch = 0
///
/// Every kind except `Prerelease` clears the pre-release. Build metadata is
/// always dropped.
pub fn bump(version: &Version, kind: BumpKind) -> Result<Version> {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;

    match kind {
        BumpKind::Prerelease => {
            next.pre = next_prerelease(&version.pre)?;
        }
        BumpKind::Patch => {
            next.patch = checked_inc(version.patch, version)?;
            next.pre = Prerelease::EMPTY;
        }
        BumpKind::Minor => {
            next.minor = checked_inc(version.minor, version)?;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        BumpKind::Major => {
            next.major = checked_inc(version.major, version)?;
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
    }

    Ok(next)
}

fn checked_inc(n: u64, version: &Version) -> Result<u64> {
    n.checked_add(1)
        .ok_or_else(|| ReleaseError::malformed(version.to_string(), "component overflow"))
}

/// Resolve the next version from the latest tag and a bump kind
pub fn resolve(latest_tag: &str, kind: BumpKind) -> Result<Version> {
    let current = parse_tag(latest_tag)?;
    bump(&current, kind)
}

/// Pick the latest tag from a listing already sorted newest first
///
/// Blank lines are ignored. An empty listing has no basis for a bump.
pub fn latest_tag(tags: &[String]) -> Result<&str> {
    tags.iter()
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .ok_or(ReleaseError::NoVersionHistory)
}
