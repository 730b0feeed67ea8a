//! Selection utilities over an ordered commit history.
//!
//! Histories are slices in provider order (newest-first for
//! [`GitHistory`](super::history::GitHistory)); positional functions such as
//! [`slice_between_hashes`] and [`next_commit_after`] depend on that order.

use regex_lite::Regex;

use super::commits::{Commit, matches};

/// Position of the first commit with the given hash.
pub fn index_by_hash(history: &[Commit], hash: Option<&str>) -> Option<usize> {
    let hash = hash?;
    history.iter().position(|c| c.hash == hash)
}

/// Keep commits whose message matches `pattern`.
///
/// Returns `None` when there is no pattern.
pub fn filter_by_match(history: &[Commit], pattern: Option<&Regex>) -> Option<Vec<Commit>> {
    let pattern = pattern?;
    Some(
        history
            .iter()
            .filter(|c| matches(Some(&c.message), Some(pattern)) == Some(true))
            .cloned()
            .collect(),
    )
}

/// Drop commits whose message matches `pattern`.
///
/// Without a pattern the history is returned unchanged.
pub fn exclude_by_match(history: &[Commit], pattern: Option<&Regex>) -> Vec<Commit> {
    match pattern {
        Some(pattern) => history
            .iter()
            .filter(|c| !pattern.is_match(&c.message))
            .cloned()
            .collect(),
        None => history.to_vec(),
    }
}

/// Inclusive range from `hash_from` to `hash_to` (or to the end of history).
///
/// Returns `None` without a start hash. An unknown hash, or an end that lies
/// before the start, yields an empty selection.
pub fn slice_between_hashes(
    history: &[Commit],
    hash_from: Option<&str>,
    hash_to: Option<&str>,
) -> Option<Vec<Commit>> {
    hash_from?;

    let Some(start) = index_by_hash(history, hash_from) else {
        return Some(Vec::new());
    };

    let end = match hash_to {
        Some(_) => match index_by_hash(history, hash_to) {
            Some(end) if end >= start => end + 1,
            _ => return Some(Vec::new()),
        },
        None => history.len(),
    };

    Some(history[start..end].to_vec())
}

/// Commits whose message is one of `messages`.
///
/// Surrounding whitespace is ignored on both sides.
pub fn commits_with_messages(history: &[Commit], messages: &[String]) -> Vec<Commit> {
    history
        .iter()
        .filter(|c| {
            let message = c.message.trim();
            messages.iter().any(|m| m.trim() == message)
        })
        .cloned()
        .collect()
}

/// Stable sort, newest date first.
pub fn sort_by_date_descending(history: &[Commit]) -> Vec<Commit> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The commit one position before `hash`, i.e. the next newer commit in a
/// newest-first history.
///
/// `None` when the hash is unknown or already the newest commit.
pub fn next_commit_after<'a>(history: &'a [Commit], hash: Option<&str>) -> Option<&'a Commit> {
    let index = index_by_hash(history, hash)?;
    index.checked_sub(1).and_then(|i| history.get(i))
}
