mod common;

use anyhow::Result;
use common::{commit_file, git_stdout, init_git_repo, is_git_available, tag_annotated};
use safefile::{GitError, version_from_git};
use tempfile::tempdir;

#[test]
fn test_version_is_commit_id_without_tags() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test: git is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  commit_file(temp_dir.path(), "a.txt", "a", "first")?;

  let head = git_stdout(temp_dir.path(), &["rev-parse", "HEAD"])?;
  let version = version_from_git(temp_dir.path())?;

  assert!(!version.is_empty());
  assert!(head.starts_with(&version), "{version} is not a prefix of {head}");
  Ok(())
}

#[test]
fn test_version_matches_git_describe() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test: git is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  commit_file(temp_dir.path(), "a.txt", "a", "first")?;
  tag_annotated(temp_dir.path(), "v1.0")?;

  assert_eq!(version_from_git(temp_dir.path())?, "v1.0");

  commit_file(temp_dir.path(), "b.txt", "b", "second")?;
  let version = version_from_git(temp_dir.path())?;
  assert!(version.starts_with("v1.0-1-g"), "unexpected version {version}");
  assert_eq!(version, git_stdout(temp_dir.path(), &["describe", "--always"])?);
  Ok(())
}

#[test]
fn test_version_from_subdirectory() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test: git is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  commit_file(temp_dir.path(), "a.txt", "a", "first")?;
  tag_annotated(temp_dir.path(), "v2.3")?;
  let nested = temp_dir.path().join("nested").join("dir");
  std::fs::create_dir_all(&nested)?;

  assert_eq!(version_from_git(&nested)?, "v2.3");
  Ok(())
}

#[test]
fn test_version_outside_repository_fails() -> Result<()> {
  let temp_dir = tempdir()?;
  // Guard against a repository somewhere above the temp dir.
  if git2::Repository::discover(temp_dir.path()).is_ok() {
    return Ok(());
  }

  assert!(matches!(version_from_git(temp_dir.path()), Err(GitError::Open { .. })));
  Ok(())
}

#[test]
fn test_version_without_commits_fails() -> Result<()> {
  if !is_git_available() {
    println!("Skipping test: git is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;

  assert!(matches!(version_from_git(temp_dir.path()), Err(GitError::Describe { .. })));
  Ok(())
}
