#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr on
/// failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Runs a git command and returns its trimmed stdout.
pub fn git_stdout(dir: &Path, args: &[&str]) -> Result<String> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  // Disable signing for test isolation
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  run_git(dir, &["config", "tag.gpgsign", "false"])?;
  Ok(())
}

/// Writes a file, stages it and creates a commit.
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) -> Result<()> {
  std::fs::write(dir.join(file), content)?;
  run_git(dir, &["add", file])?;
  run_git(dir, &["commit", "-m", message])
}

/// Creates an annotated tag on HEAD.
pub fn tag_annotated(dir: &Path, name: &str) -> Result<()> {
  run_git(dir, &["tag", "-a", name, "-m", name])
}
