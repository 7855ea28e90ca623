use crate::domain::{Version, VersionSort, DEFAULT_PRERELEASE_SUFFIXES};
use crate::error::{ReleaseVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "releaseversion.toml";

/// Represents the complete configuration for release-version.
///
/// Everything the tool needs is read from here or from the command line;
/// nothing is picked up from ambient environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Returns the version used for a first release.
fn default_seed_version() -> String {
    "1.0.0".to_string()
}

/// Returns the default prerelease suffixes, earliest first.
fn default_prerelease_suffixes() -> Vec<String> {
    DEFAULT_PRERELEASE_SUFFIXES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Configuration for next-version resolution.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResolverConfig {
    #[serde(default = "default_seed_version")]
    pub seed_version: String,

    #[serde(default = "default_prerelease_suffixes")]
    pub prerelease_suffixes: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            seed_version: default_seed_version(),
            prerelease_suffixes: default_prerelease_suffixes(),
        }
    }
}

impl ResolverConfig {
    /// The seed version as a release triple.
    ///
    /// Must be a plain `MAJOR.MINOR.PATCH` without prerelease or build metadata.
    pub fn seed(&self) -> Result<Version> {
        let parsed = semver::Version::parse(self.seed_version.trim()).map_err(|e| {
            ReleaseVersionError::config(format!(
                "seed_version '{}' is not a valid version: {}",
                self.seed_version, e
            ))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ReleaseVersionError::config(format!(
                "seed_version '{}' must not carry prerelease or build metadata",
                self.seed_version
            )));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Tag ordering built from the configured suffixes
    pub fn version_sort(&self) -> Result<VersionSort> {
        if let Some(bad) = self
            .prerelease_suffixes
            .iter()
            .find(|s| s.trim().is_empty())
        {
            return Err(ReleaseVersionError::config(format!(
                "prerelease suffix '{}' must not be blank",
                bad
            )));
        }
        Ok(VersionSort::new(self.prerelease_suffixes.iter().cloned()))
    }
}

/// Where to read the current project version from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ManifestConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Git settings used when listing and fetching tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct GitConfig {
    #[serde(default)]
    pub remote: Option<String>,
}

impl Config {
    /// Check values that serde cannot validate on its own
    pub fn validate(&self) -> Result<()> {
        self.resolver.seed()?;
        self.resolver.version_sort()?;
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaseversion.toml` in current directory
/// 3. `.releaseversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config(),
    };

    let Some(path) = path else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseVersionError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str).map_err(|e| {
        ReleaseVersionError::config(format!("cannot parse {}: {}", path.display(), e))
    })?;
    config.validate()?;
    Ok(config)
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join(format!(".{}", CONFIG_FILE_NAME));
    user.exists().then_some(user)
}
