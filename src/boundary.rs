use std::fmt;

/// Non-fatal conditions met while resolving a version.
/// These are reported to the user but never change the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// The repository has no tags yet, so the seed version is used
    NoTags { seed: String },
    /// A manifest version was supplied but there is no tag to anchor a bump
    ManifestIgnoredWithoutTags {
        current_version: String,
        seed: String,
    },
    /// The manifest version is not semver compatible and was not compared
    ManifestNotSemver { current_version: String },
    /// The latest tag is not semver compatible; a legacy rule was applied
    NonSemverTag { tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags { seed } => {
                write!(f, "No existing tag found, using version {}", seed)
            }
            BoundaryWarning::ManifestIgnoredWithoutTags {
                current_version,
                seed,
            } => write!(
                f,
                "Manifest version '{}' ignored: no tags exist, using seed {}",
                current_version, seed
            ),
            BoundaryWarning::ManifestNotSemver { current_version } => write!(
                f,
                "Manifest version '{}' is not semver compatible",
                current_version
            ),
            BoundaryWarning::NonSemverTag { tag } => {
                write!(f, "Tag '{}' is not semver compatible", tag)
            }
        }
    }
}
