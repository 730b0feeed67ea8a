//! Candidate selection and keyword classification.

use regex_lite::Regex;

use crate::changelog::{ReleaseCategory, TemplateContext, add_task_link};
use crate::config::CompiledConfig;
use crate::git::{Commit, exclude_by_match, filter_by_match};

/// Commits of one release, bucketed by keyword.
///
/// Buckets are tested independently, so a commit may sit in several of them
/// or in none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseClassification {
    pub added_commits: Vec<Commit>,
    pub fixed_commits: Vec<Commit>,
    pub changed_commits: Vec<Commit>,
}

impl ReleaseClassification {
    pub fn commits(&self, category: ReleaseCategory) -> &[Commit] {
        match category {
            ReleaseCategory::Added => &self.added_commits,
            ReleaseCategory::Fixed => &self.fixed_commits,
            ReleaseCategory::Changed => &self.changed_commits,
        }
    }

    /// Number of rows the release will contain.
    pub fn total(&self) -> usize {
        ReleaseCategory::ALL.iter().map(|c| self.commits(*c).len()).sum()
    }

    /// Non-empty buckets with their sizes, in render order.
    pub fn count_by_category(&self) -> Vec<(ReleaseCategory, usize)> {
        ReleaseCategory::ALL
            .into_iter()
            .map(|c| (c, self.commits(c).len()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Keep task-linked commits and drop the escaped ones.
pub fn select_candidates(commits: &[Commit], config: &CompiledConfig) -> Vec<Commit> {
    let task_commits = filter_by_match(commits, Some(&config.commit_prefix)).unwrap_or_default();
    exclude_by_match(&task_commits, config.escape_tasks_prefix.as_ref())
}

/// Bucket candidates by the fix/change/added keyword patterns.
pub fn classify(candidates: &[Commit], config: &CompiledConfig) -> ReleaseClassification {
    let bucket = |pattern: Option<&Regex>| filter_by_match(candidates, pattern).unwrap_or_default();

    ReleaseClassification {
        added_commits: bucket(config.added_keywords.as_ref()),
        fixed_commits: bucket(config.fix_keywords.as_ref()),
        changed_commits: bucket(config.change_keywords.as_ref()),
    }
}

/// Messages of `commits`, each linked to the tracker when `link` is given.
pub fn decorate(commits: &[Commit], link: Option<(&str, &Regex)>) -> Vec<String> {
    commits
        .iter()
        .map(|c| match link {
            Some((url, task_pattern)) => add_task_link(&c.message, url, task_pattern),
            None => c.message.clone(),
        })
        .collect()
}

/// Build the template context for a classified release.
pub fn template_context(
    classification: &ReleaseClassification,
    release_version: &str,
    release_date: &str,
    config: &CompiledConfig,
    with_link: bool,
) -> TemplateContext {
    let link = with_link.then_some((config.jira_link.as_str(), &config.task_prefix));

    TemplateContext {
        release_version: release_version.to_string(),
        release_date: release_date.to_string(),
        added_commits: decorate(&classification.added_commits, link),
        fixed_commits: decorate(&classification.fixed_commits, link),
        changed_commits: decorate(&classification.changed_commits, link),
    }
}

/// Summary line for the user.
pub fn generate_summary(classification: &ReleaseClassification, file_name: &str) -> String {
    let total = classification.total();
    let counts = classification.count_by_category();

    if counts.is_empty() {
        return format!("No entries added to {}", file_name);
    }

    let details: Vec<String> = counts
        .iter()
        .map(|(category, count)| format!("{}: {}", category, count))
        .collect();

    let entry_word = if total == 1 { "entry" } else { "entries" };

    format!(
        "Added {} {} ({}) to {}",
        total,
        entry_word,
        details.join(", "),
        file_name
    )
}
