pub mod boundary;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod logging;
pub mod runner;
pub mod tools;
pub mod ui;

pub use error::{ReleaseError, Result};
