//! Repository history and branch synchronisation.
//!
//! History and checkout go through git2. Pulling shells out to the system
//! `git` binary so the user's credential helpers and SSH agent are used.

use std::path::Path;
use std::process::Command;

use git2::build::CheckoutBuilder;
use git2::{BranchType, ErrorCode, Repository, Sort};
use tracing::{debug, info};

use crate::error::GitError;

use super::commits::Commit;

/// Source of commit history and branch operations.
///
/// This abstraction allows mocking the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait HistoryProvider {
    /// All commits reachable from HEAD, newest first.
    fn list_commits(&self, path: &Path) -> Result<Vec<Commit>, GitError>;

    /// Switch the working tree to `branch`.
    fn checkout(&self, path: &Path, branch: &str) -> Result<(), GitError>;

    /// Pull the current branch from its upstream.
    fn pull(&self, path: &Path) -> Result<(), GitError>;
}

/// Default provider backed by git2 and the git CLI.
pub struct GitHistory;

impl HistoryProvider for GitHistory {
    fn list_commits(&self, path: &Path) -> Result<Vec<Commit>, GitError> {
        let repo = open_repository(path)?;

        let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
        revwalk.push_head().map_err(GitError::RevwalkError)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(GitError::RevwalkError)?;

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result.map_err(GitError::RevwalkError)?;
            let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
            commits.push(Commit::from_git2_commit(&commit)?);
        }

        debug!(count = commits.len(), "read commit history");
        Ok(commits)
    }

    fn checkout(&self, path: &Path, branch: &str) -> Result<(), GitError> {
        let repo = open_repository(path)?;
        let checkout_failed = |source| GitError::CheckoutFailed {
            branch: branch.to_string(),
            source,
        };

        let local = match repo.find_branch(branch, BranchType::Local) {
            Ok(local) => local,
            Err(e) if e.code() != ErrorCode::NotFound => return Err(checkout_failed(e)),
            Err(_) => {
                // Only a remote-tracking branch exists; create the local one.
                let upstream = format!("origin/{}", branch);
                let remote = repo
                    .find_branch(&upstream, BranchType::Remote)
                    .map_err(|e| GitError::ReferenceNotFound(branch.to_string(), e))?;
                let commit = remote.get().peel_to_commit().map_err(GitError::ParseCommit)?;

                let mut local = repo.branch(branch, &commit, false).map_err(checkout_failed)?;
                local.set_upstream(Some(&upstream)).map_err(checkout_failed)?;
                info!(branch, upstream = %upstream, "created local branch");
                local
            }
        };

        let reference = local.into_reference();
        let refname = reference
            .name()
            .ok_or_else(|| checkout_failed(git2::Error::from_str("branch name is not valid UTF-8")))?
            .to_string();
        let target = reference.peel_to_commit().map_err(GitError::ParseCommit)?;

        repo.checkout_tree(target.as_object(), Some(CheckoutBuilder::new().safe()))
            .map_err(checkout_failed)?;
        repo.set_head(&refname).map_err(checkout_failed)?;

        info!(branch, "checked out branch");
        Ok(())
    }

    fn pull(&self, path: &Path) -> Result<(), GitError> {
        let git = which::which("git").map_err(|_| GitError::GitNotInstalled)?;

        let output = Command::new(git)
            .arg("pull")
            .current_dir(path)
            .output()
            .map_err(|e| GitError::PullFailed(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::PullFailed(stderr.trim().to_string()));
        }

        info!(path = %path.display(), "pulled changes");
        Ok(())
    }
}

fn open_repository(path: &Path) -> Result<Repository, GitError> {
    Repository::open(path).map_err(|source| GitError::OpenRepository {
        path: path.to_path_buf(),
        source,
    })
}
