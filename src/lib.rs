pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseVersionError, Result};
pub use resolver::{resolve_next_version, ResolvedVersion, Resolution, VersionResolver, VersionSource};
