//! Domain logic - pure version rules independent of git and manifests

pub mod tag;
pub mod version;
pub mod versionsort;

pub use tag::{LegacyVersion, Tag};
pub use version::{SemVer, Version};
pub use versionsort::{VersionSort, DEFAULT_PRERELEASE_SUFFIXES};
