//! Next release version resolution
//!
//! Reconciles the latest git tag with the version declared in the project
//! manifest so that every release strictly increases the published version,
//! even when a manual bump happened without a tag or when this is the first
//! release of a project.

use crate::boundary::BoundaryWarning;
use crate::config::ResolverConfig;
use crate::domain::{LegacyVersion, SemVer, Tag, Version, VersionSort};
use crate::error::{ReleaseVersionError, Result};
use std::fmt;
use tracing::{debug, info};

/// Version returned when no tag exists
pub const DEFAULT_SEED_VERSION: Version = Version {
    major: 1,
    minor: 0,
    patch: 0,
};

/// The next version to publish, without `v` prefix or prerelease suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedVersion(String);

impl ResolvedVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Version> for ResolvedVersion {
    fn from(version: Version) -> Self {
        ResolvedVersion(version.to_string())
    }
}

impl From<LegacyVersion> for ResolvedVersion {
    fn from(version: LegacyVersion) -> Self {
        ResolvedVersion(version.to_string())
    }
}

impl PartialEq<str> for ResolvedVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResolvedVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which rule produced the resolved version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// No tags: the configured seed
    Seed,
    /// Patch bump of the latest semver tag
    Tag,
    /// The manifest version was ahead of the tag history
    Manifest,
    /// Bare integer tag continued as `N.0.1`
    LegacyInteger,
    /// Last numeric segment of a dotted tag incremented
    LegacyDotted,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            VersionSource::Seed => "seed version",
            VersionSource::Tag => "latest tag",
            VersionSource::Manifest => "manifest version",
            VersionSource::LegacyInteger => "integer tag",
            VersionSource::LegacyDotted => "dotted tag",
        };
        f.write_str(text)
    }
}

/// Outcome of a resolution with the diagnostics that led to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: ResolvedVersion,
    pub latest_tag: Option<String>,
    pub source: VersionSource,
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes the next release version from tag history and manifest version.
///
/// Pure and deterministic: the same inputs always give the same result, and
/// the resolver holds no mutable state, so one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    seed: Version,
    sort: VersionSort,
}

impl Default for VersionResolver {
    fn default() -> Self {
        VersionResolver {
            seed: DEFAULT_SEED_VERSION,
            sort: VersionSort::default(),
        }
    }
}

impl VersionResolver {
    /// Build a resolver from configuration, validating the seed and suffixes
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        Ok(VersionResolver {
            seed: config.seed()?,
            sort: config.version_sort()?,
        })
    }

    pub fn with_parts(seed: Version, sort: VersionSort) -> Self {
        VersionResolver { seed, sort }
    }

    pub fn seed(&self) -> Version {
        self.seed
    }

    /// The ordering used to pick the latest tag
    pub fn version_sort(&self) -> &VersionSort {
        &self.sort
    }

    /// Compute the next release version.
    ///
    /// # Arguments
    /// * `tags` - All known tags, in any order
    /// * `current_version` - The manifest version, if any; blank counts as absent
    ///
    /// # Returns
    /// * `Ok(ResolvedVersion)` - The version to publish next
    /// * `Err(InvalidTagFormat)` - The latest tag matches no supported scheme
    pub fn resolve_next_version<S: AsRef<str>>(
        &self,
        tags: &[S],
        current_version: Option<&str>,
    ) -> Result<ResolvedVersion> {
        Ok(self.resolve(tags, current_version)?.version)
    }

    /// Like [`resolve_next_version`](Self::resolve_next_version) but also
    /// reports the latest tag, the rule applied and any warnings.
    pub fn resolve<S: AsRef<str>>(
        &self,
        tags: &[S],
        current_version: Option<&str>,
    ) -> Result<Resolution> {
        let current_version = current_version.map(str::trim).filter(|v| !v.is_empty());
        let tags: Vec<&str> = tags
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();

        let Some(latest) = self.sort.latest(tags.as_slice()) else {
            return Ok(self.seed_resolution(current_version));
        };

        let tag = Tag::new(latest);
        debug!(tag = %tag, "testing whether latest tag is semver compatible");

        let mut warnings = Vec::new();
        // Bare integers always take the legacy `N.0.1` rule
        let semver = if tag.is_integer() { None } else { tag.semver() };
        let (version, source) = match semver {
            Some(semver) => {
                debug!(tag = %tag, "latest tag is semver compatible");
                self.next_from_semver(&tag, &semver, current_version, &mut warnings)?
            }
            None => {
                debug!(tag = %tag, "latest tag is not semver compatible");
                warnings.push(BoundaryWarning::NonSemverTag {
                    tag: tag.name.clone(),
                });
                let legacy = tag.next_legacy_version()?;
                let source = match legacy {
                    LegacyVersion::Integer(_) => VersionSource::LegacyInteger,
                    LegacyVersion::Dotted(_) => VersionSource::LegacyDotted,
                };
                (ResolvedVersion::from(legacy), source)
            }
        };

        info!(version = %version, tag = %tag, source = %source, "resolved next release version");
        Ok(Resolution {
            version,
            latest_tag: Some(tag.name),
            source,
            warnings,
        })
    }

    fn seed_resolution(&self, current_version: Option<&str>) -> Resolution {
        let seed = self.seed.to_string();
        info!(seed = %seed, "no existing tag found, using seed version");

        let mut warnings = vec![BoundaryWarning::NoTags { seed: seed.clone() }];
        if let Some(current) = current_version {
            warnings.push(BoundaryWarning::ManifestIgnoredWithoutTags {
                current_version: current.to_string(),
                seed,
            });
        }

        Resolution {
            version: self.seed.into(),
            latest_tag: None,
            source: VersionSource::Seed,
            warnings,
        }
    }

    fn next_from_semver(
        &self,
        tag: &Tag,
        semver: &SemVer,
        current_version: Option<&str>,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<(ResolvedVersion, VersionSource)> {
        let from_tag = semver
            .core()
            .next_patch()
            .ok_or_else(|| ReleaseVersionError::invalid_tag(&tag.name, "patch number is too large"))?;

        let Some(current) = current_version else {
            return Ok((from_tag.into(), VersionSource::Tag));
        };

        debug!(current_version = current, "testing whether manifest version is semver compatible");
        let Some(manifest) = SemVer::parse(current) else {
            debug!(current_version = current, "manifest version is not semver compatible");
            warnings.push(BoundaryWarning::ManifestNotSemver {
                current_version: current.to_string(),
            });
            return Ok((from_tag.into(), VersionSource::Tag));
        };

        // A prerelease manifest (e.g. 2.0-SNAPSHOT) already names the release it leads to
        let from_manifest = if manifest.is_prerelease() {
            Some(manifest.core())
        } else {
            manifest.core().next_patch()
        };

        match from_manifest {
            Some(candidate) if candidate > from_tag => {
                info!(
                    manifest = %candidate,
                    tag = %from_tag,
                    "manifest version is ahead of tag history"
                );
                Ok((candidate.into(), VersionSource::Manifest))
            }
            _ => Ok((from_tag.into(), VersionSource::Tag)),
        }
    }
}

/// Compute the next release version with the default seed and suffixes.
///
/// # Example
/// ```
/// use release_version::resolve_next_version;
///
/// let next = resolve_next_version(&["v1.0.0", "v1.0.1"], None).unwrap();
/// assert_eq!(next.as_str(), "1.0.2");
/// ```
pub fn resolve_next_version<S: AsRef<str>>(
    tags: &[S],
    current_version: Option<&str>,
) -> Result<ResolvedVersion> {
    VersionResolver::default().resolve_next_version(tags, current_version)
}
