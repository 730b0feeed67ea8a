//! Whole-file changelog reads and writes.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ChangelogError;

use super::format::DEFAULT_TEMPLATE;

/// Read the changelog, or `None` if the file does not exist.
pub fn read_changelog(path: &Path) -> Result<Option<String>, ChangelogError> {
    if !path.exists() {
        return Ok(None);
    }

    std::fs::read_to_string(path)
        .map(Some)
        .map_err(ChangelogError::ReadFailed)
}

/// Replace the changelog with `content`.
///
/// - Backs up an existing file to `<filename>.bak` (e.g., `CHANGELOG.md.bak`)
/// - Writes through a temporary file in the same directory and renames it
///   over the target, so readers never see a partial file
pub fn write_changelog(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let existing_permissions = if path.exists() {
        let backup = backup_path(path);
        std::fs::copy(path, &backup).map_err(ChangelogError::BackupFailed)?;
        debug!(backup = %backup.display(), "backed up changelog");

        let metadata = std::fs::metadata(path).map_err(ChangelogError::ReadFailed)?;
        Some(metadata.permissions())
    } else {
        None
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(ChangelogError::WriteFailed)?;
    file.write_all(content.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;

    // The temp file is created owner-only; keep the target's mode.
    if let Some(permissions) = existing_permissions {
        file.as_file()
            .set_permissions(permissions)
            .map_err(ChangelogError::WriteFailed)?;
    }

    file.persist(path)
        .map_err(|e| ChangelogError::WriteFailed(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote changelog");
    Ok(())
}

/// Load the release template, falling back to the built-in one.
pub fn load_template(path: Option<&Path>) -> Result<String, ChangelogError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| {
            ChangelogError::TemplateReadFailed {
                path: path.to_path_buf(),
                source,
            }
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}
