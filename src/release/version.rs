//! Release version and date resolution.
//!
//! An explicit version wins; otherwise it is read from the project manifest
//! (`package.json`, then `Cargo.toml`).

use std::path::Path;

use chrono::Local;
use semver::Version;
use tracing::debug;

use crate::error::ReleaseError;

/// Release version: the explicit one, or the project manifest's.
pub fn resolve_release_version(
    explicit: Option<&Version>,
    root: &Path,
) -> Result<Version, ReleaseError> {
    if let Some(version) = explicit {
        return Ok(version.clone());
    }

    detect_project_version(root)?.ok_or_else(|| {
        ReleaseError::MissingArgument(
            "--release-version (no version found in package.json or Cargo.toml)".to_string(),
        )
    })
}

/// Release date: the explicit one, or today as `YYYY-MM-DD`.
pub fn resolve_release_date(explicit: Option<&str>) -> String {
    match explicit {
        Some(date) => date.to_string(),
        None => Local::now().format("%Y-%m-%d").to_string(),
    }
}

/// Read the version from the first manifest found in `root`.
pub fn detect_project_version(root: &Path) -> Result<Option<Version>, ReleaseError> {
    let package_path = root.join("package.json");
    if package_path.exists() {
        if let Some(version) = read_package_json_version(&package_path)? {
            debug!(path = %package_path.display(), %version, "found project version");
            return Ok(Some(version));
        }
    }

    let cargo_path = root.join("Cargo.toml");
    if cargo_path.exists() {
        if let Some(version) = read_cargo_version(&cargo_path)? {
            debug!(path = %cargo_path.display(), %version, "found project version");
            return Ok(Some(version));
        }
    }

    Ok(None)
}

// --- package.json ---

fn read_package_json_version(path: &Path) -> Result<Option<Version>, ReleaseError> {
    let content = read_file(path)?;
    let json: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ReleaseError::InvalidManifest {
            path: path.to_path_buf(),
            reason: format!("Invalid JSON: {}", e),
        })?;

    Ok(json
        .get("version")
        .and_then(|v| v.as_str())
        .and_then(|s| Version::parse(s).ok()))
}

// --- Cargo.toml ---

fn read_cargo_version(path: &Path) -> Result<Option<Version>, ReleaseError> {
    let content = read_file(path)?;
    let doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| ReleaseError::InvalidManifest {
            path: path.to_path_buf(),
            reason: format!("Invalid TOML: {}", e),
        })?;

    Ok(doc
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .and_then(|s| Version::parse(s).ok()))
}

fn read_file(path: &Path) -> Result<String, ReleaseError> {
    std::fs::read_to_string(path).map_err(|e| ReleaseError::InvalidManifest {
        path: path.to_path_buf(),
        reason: format!("Failed to read: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_version_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"version": "9.9.9"}"#).unwrap();

        let version = resolve_release_version(Some(&Version::new(1, 2, 3)), dir.path()).unwrap();
        assert_eq!(version, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_from_package_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "version": "2.4.1"}"#,
        )
        .unwrap();

        assert_eq!(
            resolve_release_version(None, dir.path()).unwrap(),
            Version::new(2, 4, 1)
        );
    }

    #[test]
    fn test_version_from_cargo_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"app\"\nversion = \"0.7.0\"\n",
        )
        .unwrap();

        assert_eq!(
            resolve_release_version(None, dir.path()).unwrap(),
            Version::new(0, 7, 0)
        );
    }

    #[test]
    fn test_package_json_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"app\"\nversion = \"3.0.0\"\n",
        )
        .unwrap();

        assert_eq!(detect_project_version(dir.path()).unwrap(), Some(Version::new(1, 0, 0)));
    }

    #[test]
    fn test_missing_version_is_missing_argument() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_release_version(None, dir.path());

        assert!(matches!(result, Err(ReleaseError::MissingArgument(_))));
    }

    #[test]
    fn test_invalid_package_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{ nope").unwrap();

        assert!(matches!(
            detect_project_version(dir.path()),
            Err(ReleaseError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn test_release_date() {
        assert_eq!(resolve_release_date(Some("21-12-2012")), "21-12-2012");

        let today = resolve_release_date(None);
        assert_eq!(today.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
