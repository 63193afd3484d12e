//! User interface module - operator-facing output.
//!
//! Styling lives in `formatter`; this module re-exports it for callers.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command, display_error, display_release_info,
    display_skipped, display_status, display_success,
};
