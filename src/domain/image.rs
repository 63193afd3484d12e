use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Container image name with an optional tag (`registry/app[:tag]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub name: String,
    pub tag: Option<String>,
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").expect("tag pattern is valid")
    })
}

/// Check a string against the container tag grammar
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag_pattern().is_match(tag) {
        Ok(())
    } else {
        Err(ReleaseError::image(format!("'{}' is not a valid image tag", tag)))
    }
}

impl ImageRef {
    /// Parse an image identifier
    ///
    /// A `:` only starts a tag when it comes after the last `/`, so a
    /// registry port such as `localhost:5000/app` stays part of the name.
    pub fn parse(identifier: &str) -> Result<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ReleaseError::image("image identifier is empty"));
        }
        if identifier.chars().any(char::is_whitespace) {
            return Err(ReleaseError::image(format!(
                "'{}' contains whitespace",
                identifier
            )));
        }

        let last_segment_start = identifier.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (name, tag) = match identifier[last_segment_start..].rfind(':') {
            Some(offset) => {
                let split = last_segment_start + offset;
                (&identifier[..split], Some(&identifier[split + 1..]))
            }
            None => (identifier, None),
        };

        if name.is_empty() || name.ends_with('/') {
            return Err(ReleaseError::image(format!(
                "'{}' has no repository name",
                identifier
            )));
        }

        Ok(ImageRef {
            name: name.to_string(),
            tag: tag.map(str::to_string),
        })
    }

    /// Fully-qualified reference for `tag`, replacing any existing tag
    pub fn qualified(&self, tag: &str) -> Result<String> {
        validate_tag(tag)?;
        Ok(format!("{}:{}", self.name, tag))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}:{}", self.name, tag),
            None => f.write_str(&self.name),
        }
    }
}
