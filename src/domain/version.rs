use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Semver grammar with optional minor/patch, an optional `v` prefix and
/// optional prerelease/build metadata. Numeric fields reject leading zeros.
static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[vV]?(?P<major>0|[1-9][0-9]*)",
        r"(?:\.(?P<minor>0|[1-9][0-9]*)(?:\.(?P<patch>0|[1-9][0-9]*))?)?",
        r"(?:-(?P<prerelease>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?",
        r"(?:\+(?P<build>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    ))
    .expect("semver pattern compiles")
});

/// Release version triple (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Same major.minor line with the patch incremented, `None` on overflow
    pub fn next_patch(&self) -> Option<Self> {
        Some(Version {
            patch: self.patch.checked_add(1)?,
            ..*self
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Structured semantic version as found in tags and manifests.
///
/// Short forms are accepted and padded: `"2"` is `2.0.0` and
/// `"2.0-SNAPSHOT"` is `2.0.0` with prerelease `SNAPSHOT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemVer {
    /// Parse `text`, returning `None` when it is not semver compatible.
    ///
    /// Components too large for `u64` are treated as incompatible.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = SEMVER_PATTERN.captures(text.trim())?;

        let number = |name: &str| -> Option<u64> {
            match captures.name(name) {
                Some(m) => m.as_str().parse::<u64>().ok(),
                None => Some(0),
            }
        };

        Some(SemVer {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            prerelease: captures.name("prerelease").map(|m| m.as_str().to_string()),
            build: captures.name("build").map(|m| m.as_str().to_string()),
        })
    }

    /// The release triple, dropping prerelease and build metadata
    pub fn core(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.core())?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
