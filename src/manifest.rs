//! Reading the declared project version from a build manifest
//!
//! Supports Maven `pom.xml`, npm `package.json` and Cargo `Cargo.toml`.

use crate::error::{ReleaseVersionError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static XML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern compiles"));

static PARENT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<parent\s*>.*?</parent\s*>").expect("parent pattern compiles"));

static VERSION_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<version\s*>\s*([^<]*?)\s*</version\s*>").expect("version pattern compiles")
});

/// Sections of a POM after which `<version>` elements belong to other artifacts
const POM_NESTED_SECTIONS: [&str; 6] = [
    "<dependencyManagement",
    "<dependencies",
    "<build",
    "<profiles",
    "<reporting",
    "<modules",
];

/// Supported manifest formats, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Pom,
    PackageJson,
    CargoToml,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 3] = [
        ManifestKind::Pom,
        ManifestKind::PackageJson,
        ManifestKind::CargoToml,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::Pom => "pom.xml",
            ManifestKind::PackageJson => "package.json",
            ManifestKind::CargoToml => "Cargo.toml",
        }
    }

    /// Determine the format from a file name
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        ManifestKind::ALL
            .into_iter()
            .find(|kind| kind.file_name() == name)
    }

    /// Extract the declared version from manifest contents
    pub fn parse_version(&self, contents: &str) -> Result<Option<String>> {
        match self {
            ManifestKind::Pom => Ok(pom_version(contents)),
            ManifestKind::PackageJson => package_json_version(contents),
            ManifestKind::CargoToml => cargo_toml_version(contents),
        }
    }
}

/// Find the first supported manifest in `dir`
pub fn detect_manifest(dir: &Path) -> Option<PathBuf> {
    ManifestKind::ALL
        .iter()
        .map(|kind| dir.join(kind.file_name()))
        .find(|path| path.is_file())
}

/// Read the version declared in the manifest at `path`.
///
/// # Returns
/// * `Ok(Some(version))` - The declared version
/// * `Ok(None)` - The manifest declares no version of its own
/// * `Err` - Unknown manifest name, unreadable or malformed file
pub fn read_manifest_version(path: &Path) -> Result<Option<String>> {
    let kind = ManifestKind::from_path(path).ok_or_else(|| {
        ReleaseVersionError::manifest(format!(
            "unsupported manifest '{}': expected pom.xml, package.json or Cargo.toml",
            path.display()
        ))
    })?;

    let contents = fs::read_to_string(path).map_err(|e| {
        ReleaseVersionError::manifest(format!("cannot read {}: {}", path.display(), e))
    })?;

    let version = kind.parse_version(&contents)?;
    tracing::debug!(path = %path.display(), version = ?version, "read manifest version");
    Ok(version)
}

fn pom_version(contents: &str) -> Option<String> {
    let without_comments = XML_COMMENT.replace_all(contents, "");

    let parent_version = PARENT_BLOCK
        .find(&without_comments)
        .and_then(|block| first_version_element(block.as_str()));

    let project = PARENT_BLOCK.replace(&without_comments, "");
    let end = POM_NESTED_SECTIONS
        .iter()
        .filter_map(|section| project.find(section))
        .min()
        .unwrap_or(project.len());

    // Without its own <version> a module inherits the parent's
    first_version_element(&project[..end]).or(parent_version)
}

fn first_version_element(xml: &str) -> Option<String> {
    VERSION_ELEMENT
        .captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|v| !v.is_empty())
}

fn package_json_version(contents: &str) -> Result<Option<String>> {
    let json: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| ReleaseVersionError::manifest(format!("invalid package.json: {}", e)))?;

    Ok(json
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string))
}

fn cargo_toml_version(contents: &str) -> Result<Option<String>> {
    let table: toml::Table = toml::from_str(contents)
        .map_err(|e| ReleaseVersionError::manifest(format!("invalid Cargo.toml: {}", e)))?;

    let package_version = table
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str());

    let workspace_version = table
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str());

    // `version.workspace = true` is a table, not a string, and falls through
    Ok(package_version.or(workspace_version).map(str::to_string))
}
