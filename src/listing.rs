//! # Directory Listing
//!
//! Recursive file enumeration built on `walkdir`.

use std::path::{Path, PathBuf};

use tracing::{debug, error};
use walkdir::WalkDir;

/// Returns the absolute path of every file below `root`.
///
/// Directories are not listed and symbolic links to directories are neither
/// listed nor descended into. The order is whatever the traversal produces.
///
/// This is fail-safe: if `root` is missing, is not a directory or cannot be
/// read, the error is logged and the result is empty. Unreadable entries
/// further down are logged and skipped.
pub fn list_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
  let root = root.as_ref();
  let root_abs = match std::path::absolute(root) {
    Ok(abs) => abs,
    Err(e) => {
      error!(path = %root.display(), kind = ?e.kind(), "Could not get files: {e}");
      return Vec::new();
    }
  };

  let start_time = std::time::Instant::now();
  let mut files = Vec::new();

  for entry in WalkDir::new(&root_abs) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        let kind = e.io_error().map(std::io::Error::kind);
        error!(path = ?e.path(), kind = ?kind, "Could not get files: {e}");
        if e.depth() == 0 {
          return Vec::new();
        }
        continue;
      }
    };

    let file_type = entry.file_type();
    if entry.depth() == 0 && !entry.path().is_dir() {
      error!(path = %root_abs.display(), "Could not get files: not a directory");
      return Vec::new();
    }
    if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
      continue;
    }
    files.push(entry.into_path());
  }

  debug!(
    "Found {} files in {} in {}ms",
    files.len(),
    root_abs.display(),
    start_time.elapsed().as_millis()
  );

  files
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn lists_nested_files_but_not_directories() -> std::io::Result<()> {
    let temp = tempfile::tempdir()?;
    fs::create_dir_all(temp.path().join("sub/deeper"))?;
    fs::write(temp.path().join("top.txt"), b"a")?;
    fs::write(temp.path().join("sub/deeper/leaf.txt"), b"b")?;

    let mut files = list_files(temp.path());
    files.sort();

    assert_eq!(
      files,
      vec![temp.path().join("sub/deeper/leaf.txt"), temp.path().join("top.txt")]
    );
    Ok(())
  }

  #[test]
  fn empty_directory_lists_nothing() -> std::io::Result<()> {
    let temp = tempfile::tempdir()?;
    fs::create_dir(temp.path().join("empty"))?;
    assert!(list_files(temp.path()).is_empty());
    Ok(())
  }

  #[test]
  fn missing_root_lists_nothing() {
    assert!(list_files("/none_existing/dir").is_empty());
  }

  #[test]
  fn root_that_is_a_file_lists_nothing() -> std::io::Result<()> {
    let temp = tempfile::tempdir()?;
    let file = temp.path().join("single.bin");
    fs::write(&file, b"x")?;
    assert!(list_files(&file).is_empty());
    Ok(())
  }
}
