//! # Git Module
//!
//! Derives a version string from the git repository containing a directory.

use std::path::{Path, PathBuf};

use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use tracing::debug;

/// Error type for git lookups.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
  /// No repository could be opened at or above the directory.
  #[error("Failed to open git repository at '{path}': {source}")]
  Open { path: PathBuf, source: git2::Error },

  /// The repository has no commit to describe, or describing failed.
  #[error("Failed to describe git repository at '{path}': {source}")]
  Describe { path: PathBuf, source: git2::Error },
}

/// Returns the `git describe --always` string for the repository that
/// contains `dir`.
///
/// That is the nearest annotated tag plus distance and abbreviated commit id
/// (`v1.2-3-gabc1234`), the bare tag when HEAD is tagged, or just the
/// abbreviated commit id when there is no tag.
///
/// # Errors
///
/// Returns an error if `dir` is not inside a repository or HEAD cannot be
/// described (e.g. no commits yet).
pub fn version_from_git(dir: &Path) -> Result<String, GitError> {
  debug!("Describing git repository at: {}", dir.display());

  let repo = Repository::discover(dir).map_err(|e| GitError::Open {
    path: dir.to_path_buf(),
    source: e,
  })?;

  let describe_err = |e: git2::Error| GitError::Describe {
    path: dir.to_path_buf(),
    source: e,
  };

  let mut describe_opts = DescribeOptions::new();
  describe_opts.show_commit_oid_as_fallback(true);

  let description = repo.describe(&describe_opts).map_err(describe_err)?;
  let version = description
    .format(Some(&DescribeFormatOptions::new()))
    .map_err(describe_err)?;

  Ok(version.trim().to_string())
}
