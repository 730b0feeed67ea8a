//! Line-oriented changelog parsing and release splicing.
//!
//! A changelog is a free-form head followed by release blocks. Each block
//! starts at a header such as `## [1.2.3] - 2024-01-01` and runs until the
//! next header or the end of the document. Blocks are newest-first.

use regex_lite::Regex;

/// Split changelog text into lines (`\n` or `\r\n`).
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Whether a line opens a release block: `##`, one whitespace character and
/// `[X.Y.Z]` with numeric components of any width.
pub fn is_release_header(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("##") else {
        return false;
    };

    let mut chars = rest.chars();
    if !chars.next().is_some_and(char::is_whitespace) {
        return false;
    }

    let Some(rest) = chars.as_str().strip_prefix('[') else {
        return false;
    };
    let Some(end) = rest.find(']') else {
        return false;
    };

    let mut parts = rest[..end].split('.');
    let numeric = |p: Option<&str>| p.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    numeric(parts.next()) && numeric(parts.next()) && numeric(parts.next()) && parts.next().is_none()
}

/// All release header lines, in document order.
pub fn release_headers<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines.iter().copied().filter(|l| is_release_header(l)).collect()
}

/// Join `lines[start..end]` with newlines. `end` is clamped to the length.
pub fn release_block(lines: &[&str], start: usize, end: usize) -> String {
    let end = end.min(lines.len());
    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n")
}

/// Every release block, newest first.
///
/// Blocks are cut at header positions, so two identical header lines still
/// produce two blocks.
pub fn all_releases(lines: &[&str]) -> Vec<String> {
    let starts = header_positions(lines);

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(lines.len());
            release_block(lines, start, end)
        })
        .collect()
}

pub fn most_recent_release(releases: &[String]) -> Option<&str> {
    releases.first().map(String::as_str)
}

/// Lines of a release block that match `row_pattern`.
pub fn change_rows<'a>(release_lines: &[&'a str], row_pattern: &Regex) -> Vec<&'a str> {
    release_lines
        .iter()
        .copied()
        .filter(|l| row_pattern.is_match(l))
        .collect()
}

/// Remove the leading row marker (e.g. `- `) to recover the bare message.
pub fn strip_row_prefix(row: &str, prefix: &str) -> String {
    row.strip_prefix(prefix).unwrap_or(row).to_string()
}

/// Everything above the first release header, without trailing blank lines.
pub fn document_head(lines: &[&str]) -> String {
    let first = header_positions(lines).first().copied().unwrap_or(lines.len());

    let mut head = &lines[..first];
    while let Some((last, rest)) = head.split_last() {
        if !last.trim().is_empty() {
            break;
        }
        head = rest;
    }

    head.join("\n")
}

/// Insert `new_release` ahead of every existing release.
///
/// The result is `head`, a blank line, the new block, a blank line and the
/// existing releases re-joined line by line, ending with a newline. Existing
/// blocks come back byte-for-byte (line endings are normalised to `\n`).
pub fn splice_new_release(changelog: &str, new_release: &str) -> String {
    let lines = split_lines(changelog);
    let head = document_head(&lines);
    let releases = all_releases(&lines);

    let mut spliced = String::new();

    if !head.is_empty() {
        spliced.push_str(&head);
        spliced.push_str("\n\n");
    }

    spliced.push_str(new_release.trim());
    spliced.push('\n');

    if !releases.is_empty() {
        spliced.push('\n');
        spliced.push_str(&releases.join("\n"));
        spliced.push('\n');
    }

    spliced
}

fn header_positions(lines: &[&str]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| is_release_header(l))
        .map(|(i, _)| i)
        .collect()
}
