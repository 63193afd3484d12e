//! Pre-release identifier handling for semantic versioning
//!
//! A pre-release is the dot-separated identifier list after the `-` in a
//! version (https://semver.org/#spec-item-9). Bumping a pre-release follows
//! the usual increment rules:
//!
//! - no pre-release: start a new one at `0`
//! - trailing identifier numeric: increment it (`rc.1` -> `rc.2`)
//! - trailing identifier alphanumeric: append `.0` (`alpha` -> `alpha.0`)

use crate::error::{ReleaseError, Result};
use semver::Prerelease;

/// Identifier used when a release version enters its first pre-release.
pub const INITIAL_PRERELEASE: &str = "0";

/// Compute the pre-release that follows `current`.
///
/// The result always sorts after `current` when `current` is non-empty.
pub fn next_prerelease(current: &Prerelease) -> Result<Prerelease> {
    if current.is_empty() {
        return build(INITIAL_PRERELEASE);
    }

    let text = current.as_str();
    let next = match text.rsplit_once('.') {
        Some((head, last)) => match last.parse::<u64>() {
            Ok(n) => format!("{}.{}", head, increment(n, text)?),
            Err(_) => format!("{}.0", text),
        },
        None => match text.parse::<u64>() {
            Ok(n) => increment(n, text)?.to_string(),
            Err(_) => format!("{}.0", text),
        },
    };

    build(&next)
}

fn increment(n: u64, text: &str) -> Result<u64> {
    n.checked_add(1)
        .ok_or_else(|| ReleaseError::malformed(text, "pre-release counter overflow"))
}

fn build(text: &str) -> Result<Prerelease> {
    Prerelease::new(text).map_err(|e| ReleaseError::malformed(text, e.to_string()))
}
