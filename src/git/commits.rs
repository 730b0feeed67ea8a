//! Commit record and per-commit accessors.

use chrono::{DateTime, TimeZone, Utc};
use regex_lite::Regex;

use crate::error::GitError;

/// A single commit as read from repository history.
///
/// `message` is the commit summary (first line). Changelog rows are single
/// lines, and the message text is the only key linking a row back to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    pub date: DateTime<Utc>,
    pub message: String,
}

impl Commit {
    /// Create a Commit from a git2 Commit.
    pub fn from_git2_commit(commit: &git2::Commit) -> Result<Self, GitError> {
        let hash = commit.id().to_string();
        let message = commit.summary().unwrap_or("").trim().to_string();
        let author = commit.author();
        let time = commit.time();
        let date = Utc
            .timestamp_opt(time.seconds(), 0)
            .single()
            .ok_or_else(|| {
                GitError::ParseCommit(git2::Error::from_str(&format!(
                    "commit {} has invalid timestamp (seconds={})",
                    hash,
                    time.seconds()
                )))
            })?;

        Ok(Self {
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            hash,
            date,
            message,
        })
    }
}

/// Test a message against a pattern.
///
/// Returns `None` when either side is absent, so callers can tell
/// "not applicable" apart from "no match".
pub fn matches(message: Option<&str>, pattern: Option<&Regex>) -> Option<bool> {
    match (message, pattern) {
        (Some(message), Some(pattern)) => Some(pattern.is_match(message)),
        _ => None,
    }
}

/// The commit's message, or `""` when there is no commit.
pub fn message_of(commit: Option<&Commit>) -> &str {
    commit.map(|c| c.message.as_str()).unwrap_or("")
}

pub fn date_of(commit: Option<&Commit>) -> Option<DateTime<Utc>> {
    commit.map(|c| c.date)
}

pub fn hash_of(commit: Option<&Commit>) -> Option<&str> {
    commit.map(|c| c.hash.as_str())
}
