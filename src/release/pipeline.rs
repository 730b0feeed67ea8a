//! Generate pipeline: pick the release's commits, render them and splice the
//! block into the changelog.
//!
//! Steps run strictly in order and the first failure aborts the rest. The
//! changelog is written once, as a whole file, at the very end.

use std::path::PathBuf;

use semver::Version;
use tracing::{info, warn};

use crate::changelog::{
    CHANGELOG_HEADER, load_template, read_changelog, render, splice_new_release, write_changelog,
};
use crate::config::CompiledConfig;
use crate::error::ReleaseError;
use crate::git::{Commit, HistoryProvider, slice_between_hashes};

use super::boundary::{UnreleasedRange, resolve_unreleased_range};
use super::classify::{ReleaseClassification, classify, select_candidates, template_context};
use super::version::{resolve_release_date, resolve_release_version};

/// Inputs of one `generate` run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub repo_path: PathBuf,
    pub changelog_path: PathBuf,
    pub from_commit: Option<String>,
    pub to_commit: Option<String>,
    pub release_version: Option<Version>,
    pub release_date: Option<String>,
    pub with_link: bool,
    pub dry_run: bool,
    /// Checkout the changelog branch and pull before reading history.
    pub sync: bool,
}

/// How the commit range is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeMode {
    /// Everything newer than the last release in the changelog.
    Unreleased,
    /// Caller-supplied inclusive range, `from` being the newer commit.
    Explicit { from: String, to: String },
}

impl RangeMode {
    /// Both hashes or neither.
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, ReleaseError> {
        match (from, to) {
            (Some(from), Some(to)) => Ok(Self::Explicit {
                from: from.to_string(),
                to: to.to_string(),
            }),
            (Some(_), None) => Err(ReleaseError::MissingArgument("--to-commit".to_string())),
            (None, Some(_)) => Err(ReleaseError::MissingArgument("--from-commit".to_string())),
            (None, None) => Ok(Self::Unreleased),
        }
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// No task commits in range; the changelog was not touched.
    NoCommits,
    /// Dry run: the rendered block, nothing written.
    Preview { release: String },
    Written {
        path: PathBuf,
        classification: ReleaseClassification,
    },
}

/// Run the pipeline against `provider`.
pub fn generate<P: HistoryProvider + ?Sized>(
    provider: &P,
    request: &GenerateRequest,
    config: &CompiledConfig,
) -> Result<GenerateOutcome, ReleaseError> {
    let mode = RangeMode::from_args(request.from_commit.as_deref(), request.to_commit.as_deref())?;
    let version = resolve_release_version(request.release_version.as_ref(), &request.repo_path)?;
    let release_date = resolve_release_date(request.release_date.as_deref());

    if request.sync && mode == RangeMode::Unreleased {
        let branch = &config.changelog_branch;
        println!("✓ Start checkout to {}", branch);
        provider.checkout(&request.repo_path, branch)?;
        println!("✓ Checkout to {}", branch);

        println!("✓ Start pulling changes");
        provider.pull(&request.repo_path)?;
        println!("✓ Pull changes");
    }

    println!("✓ Start parsing commits");
    let history = provider.list_commits(&request.repo_path)?;
    println!("✓ Gotten {} commits", history.len());

    let existing = read_changelog(&request.changelog_path)?;

    let selected = match &mode {
        RangeMode::Explicit { from, to } => select_explicit(&history, from, to),
        RangeMode::Unreleased => {
            let changelog = existing.as_deref().ok_or_else(|| {
                ReleaseError::UnresolvableRange(format!(
                    "{} does not exist",
                    request.changelog_path.display()
                ))
            })?;

            match resolve_unreleased_range(&history, changelog, config)? {
                UnreleasedRange::Commits { from, to } => select_explicit(&history, &from, &to),
                UnreleasedRange::UpToDate => Vec::new(),
            }
        }
    };

    let candidates = select_candidates(&selected, config);
    if candidates.is_empty() {
        warn!(selected = selected.len(), "no task commits in range");
        return Ok(GenerateOutcome::NoCommits);
    }

    println!("✓ Generating changelog");
    let classification = classify(&candidates, config);
    info!(
        candidates = candidates.len(),
        added = classification.added_commits.len(),
        fixed = classification.fixed_commits.len(),
        changed = classification.changed_commits.len(),
        "classified commits"
    );

    let template = load_template(config.template_file_name.as_deref())?;
    let context = template_context(
        &classification,
        &version.to_string(),
        &release_date,
        config,
        request.with_link,
    );
    let release = render(&template, &context, &config.template_row_prefix);

    if request.dry_run {
        return Ok(GenerateOutcome::Preview { release });
    }

    let base = existing.as_deref().unwrap_or(CHANGELOG_HEADER);
    let changelog = splice_new_release(base, &release);
    write_changelog(&request.changelog_path, &changelog)?;

    Ok(GenerateOutcome::Written {
        path: request.changelog_path.clone(),
        classification,
    })
}

fn select_explicit(history: &[Commit], from: &str, to: &str) -> Vec<Commit> {
    let selected = slice_between_hashes(history, Some(from), Some(to)).unwrap_or_default();
    if selected.is_empty() {
        warn!(from, to, "commit range is empty or a hash is not in history");
    }
    selected
}
