//! Domain logic - pure release rules independent of external tools

pub mod image;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use image::ImageRef;
pub use tag::ReleaseTag;
pub use version::{bump, latest_tag, parse_tag, resolve, BumpKind};
