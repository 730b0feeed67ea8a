//! Changelog classification buckets and built-in texts.

/// Classification buckets, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseCategory {
    Added,
    Fixed,
    Changed,
}

impl ReleaseCategory {
    pub const ALL: [ReleaseCategory; 3] = [Self::Added, Self::Fixed, Self::Changed];

    /// Get the display name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Fixed => "Fixed",
            Self::Changed => "Changed",
        }
    }

    /// Name of the template placeholder holding this bucket's rows.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Added => "addedCommits",
            Self::Fixed => "fixedCommits",
            Self::Changed => "changedCommits",
        }
    }
}

impl std::fmt::Display for ReleaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header for changelog files created from scratch.
pub const CHANGELOG_HEADER: &str = r#"# Changelog

All notable changes to this project will be documented in this file.
"#;

/// Release template used when no custom template is configured.
///
/// Placeholders are `${name}`; see [`render`](super::template::render).
pub const DEFAULT_TEMPLATE: &str = r#"## [${releaseVersion}] - ${releaseDate}
### Added
${addedCommits}

### Fixed
${fixedCommits}

### Changed
${changedCommits}
"#;
