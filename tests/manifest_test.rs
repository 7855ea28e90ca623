// tests/manifest_test.rs
use release_version::manifest::{detect_manifest, read_manifest_version, ManifestKind};
use release_version::VersionResolver;
use std::fs;
use tempfile::TempDir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>foo</groupId>
  <artifactId>far</artifactId>
  <version>2.0-SNAPSHOT</version>
</project>
"#;

#[test]
fn test_read_pom_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pom.xml");
    fs::write(&path, POM).unwrap();

    assert_eq!(
        read_manifest_version(&path).unwrap().as_deref(),
        Some("2.0-SNAPSHOT")
    );
}

#[test]
fn test_read_package_json_and_cargo_toml() {
    let dir = TempDir::new().unwrap();

    let package_json = dir.path().join("package.json");
    fs::write(&package_json, r#"{"name":"web","version":"1.4.2"}"#).unwrap();
    assert_eq!(
        read_manifest_version(&package_json).unwrap().as_deref(),
        Some("1.4.2")
    );

    let cargo_toml = dir.path().join("Cargo.toml");
    fs::write(&cargo_toml, "[package]\nname = \"x\"\nversion = \"0.9.0\"\n").unwrap();
    assert_eq!(
        read_manifest_version(&cargo_toml).unwrap().as_deref(),
        Some("0.9.0")
    );
}

#[test]
fn test_detect_manifest_prefers_pom() {
    let dir = TempDir::new().unwrap();
    assert_eq!(detect_manifest(dir.path()), None);

    fs::write(dir.path().join("package.json"), "{}").unwrap();
    assert_eq!(
        detect_manifest(dir.path()),
        Some(dir.path().join(ManifestKind::PackageJson.file_name()))
    );

    fs::write(dir.path().join("pom.xml"), POM).unwrap();
    assert_eq!(
        detect_manifest(dir.path()),
        Some(dir.path().join("pom.xml"))
    );
}

#[test]
fn test_unsupported_manifest_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("build.gradle");
    fs::write(&path, "version = '1.0'").unwrap();

    let err = read_manifest_version(&path).unwrap_err();
    assert!(err.to_string().contains("unsupported manifest"));
}

#[test]
fn test_missing_manifest_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(read_manifest_version(&dir.path().join("pom.xml")).is_err());
}

#[test]
fn test_manifest_version_feeds_resolver() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pom.xml");
    fs::write(&path, POM).unwrap();
    let current = read_manifest_version(&path).unwrap();

    let tags = vec!["v1.0.0".to_string(), "v1.0.1".to_string()];
    let next = VersionResolver::default()
        .resolve_next_version(&tags, current.as_deref())
        .unwrap();
    assert_eq!(next, "2.0.0");
}
