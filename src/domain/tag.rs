use crate::domain::version::SemVer;
use crate::error::{ReleaseVersionError, Result};
use std::fmt;

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

/// Next version derived from a tag outside the semver grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyVersion {
    /// A bare integer tag `N`, continued as `N.0.1`
    Integer(u64),
    /// A dotted tag with its last numeric segment incremented
    Dotted(String),
}

impl fmt::Display for LegacyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyVersion::Integer(major) => write!(f, "{}.0.1", major),
            LegacyVersion::Dotted(version) => write!(f, "{}", version),
        }
    }
}

impl Tag {
    /// Create a new tag from a string, trimming surrounding whitespace
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Tag {
            name: name.trim().to_string(),
        }
    }

    /// Tag text without a single leading `v`/`V` (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        self.name
            .strip_prefix('v')
            .or_else(|| self.name.strip_prefix('V'))
            .unwrap_or(&self.name)
    }

    /// Whether the tag is a bare integer such as `5` or `v007`
    pub fn is_integer(&self) -> bool {
        is_digits(self.version_part())
    }

    /// Parse the tag as a semantic version
    pub fn semver(&self) -> Option<SemVer> {
        SemVer::parse(&self.name)
    }

    /// Compute the next version for a tag that is not semver compatible.
    ///
    /// A plain integer `N` becomes `N.0.1`. Otherwise the segment after the
    /// last `.` must be numeric and is incremented in place, so
    /// `release-1.9` becomes `release-1.10`.
    pub fn next_legacy_version(&self) -> Result<LegacyVersion> {
        let text = self.version_part();

        if is_digits(text) {
            let major = text
                .parse::<u64>()
                .map_err(|_| self.invalid("number is too large"))?;
            return Ok(LegacyVersion::Integer(major));
        }

        let idx = match text.rfind('.') {
            Some(idx) if idx > 0 => idx,
            _ => {
                return Err(self.invalid(
                    "expected major.minor.patch or a trailing '.'-separated number to increment",
                ))
            }
        };

        let segment = &text[idx + 1..];
        if !is_digits(segment) {
            return Err(self.invalid(format!("last segment '{}' is not a number", segment)));
        }

        let next = segment
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| self.invalid(format!("segment '{}' is too large", segment)))?;

        Ok(LegacyVersion::Dotted(format!("{}{}", &text[..=idx], next)))
    }

    fn invalid(&self, reason: impl Into<String>) -> ReleaseVersionError {
        ReleaseVersionError::invalid_tag(&self.name, reason)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
