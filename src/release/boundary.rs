//! Locating the previous release in commit history.
//!
//! The last rendered release is read back from the changelog, its rows are
//! stripped to bare commit messages and matched against history. The most
//! recent matching commit is the release boundary; everything newer is
//! unreleased.

use tracing::debug;

use crate::changelog::parser::{change_rows, most_recent_release, strip_row_prefix};
use crate::changelog::{all_releases, split_lines, strip_task_link};
use crate::config::CompiledConfig;
use crate::error::ReleaseError;
use crate::git::{Commit, commits_with_messages, hash_of, next_commit_after, sort_by_date_descending};

/// Commit range holding unreleased work, as newest/oldest hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreleasedRange {
    /// Inclusive range, `from` being the newest commit.
    Commits { from: String, to: String },
    /// The previous release already covers the newest commit.
    UpToDate,
}

/// Bare commit messages listed in the most recent release of `changelog`.
pub fn previous_release_messages(changelog: &str, config: &CompiledConfig) -> Vec<String> {
    let releases = all_releases(&split_lines(changelog));

    let Some(release) = most_recent_release(&releases) else {
        return Vec::new();
    };

    change_rows(&split_lines(release), &config.change_row)
        .into_iter()
        .map(|row| strip_task_link(row, &config.jira_link))
        .map(|row| strip_row_prefix(&row, &config.template_row_prefix))
        .collect()
}

/// The commit that closed the previous release.
///
/// Each message maps to the oldest commit carrying it (the last one in a
/// newest-first history), so a newer commit repeating a released message,
/// common for `[NO-TASK]` rows, does not move the boundary past unreleased
/// work. The newest of those commits wins.
pub fn last_released_commit(history: &[Commit], messages: &[String]) -> Option<Commit> {
    let released: Vec<Commit> = messages
        .iter()
        .filter_map(|message| commits_with_messages(history, std::slice::from_ref(message)).pop())
        .collect();

    sort_by_date_descending(&released).into_iter().next()
}

/// Work out which commits are newer than the last release in `changelog`.
///
/// Fails when the previous release cannot be matched to any commit, rather
/// than guessing a range.
pub fn resolve_unreleased_range(
    history: &[Commit],
    changelog: &str,
    config: &CompiledConfig,
) -> Result<UnreleasedRange, ReleaseError> {
    if all_releases(&split_lines(changelog)).is_empty() {
        return Err(ReleaseError::UnresolvableRange(
            "the changelog has no previous release; use --from-commit and --to-commit for the first release".to_string(),
        ));
    }

    let messages = previous_release_messages(changelog, config);
    if messages.is_empty() {
        return Err(ReleaseError::UnresolvableRange(
            "the most recent release has no task rows to match against commits".to_string(),
        ));
    }

    let Some(last) = last_released_commit(history, &messages) else {
        return Err(ReleaseError::UnresolvableRange(format!(
            "none of the {} rows of the most recent release match a commit message",
            messages.len()
        )));
    };

    debug!(hash = %last.hash, message = %last.message, "last released commit");

    let Some(to) = next_commit_after(history, Some(&last.hash)) else {
        return Ok(UnreleasedRange::UpToDate);
    };

    match hash_of(history.first()) {
        Some(from) => Ok(UnreleasedRange::Commits {
            from: from.to_string(),
            to: to.hash.clone(),
        }),
        None => Ok(UnreleasedRange::UpToDate),
    }
}
