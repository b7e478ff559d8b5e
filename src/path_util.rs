//! # Path Utilities
//!
//! Parent-directory resolution, directory creation for a target file, and
//! file name sanitizing.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

/// Default upper bound for sanitized names, in characters.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 200;

/// Characters kept by [`safe_name`] unless told otherwise.
pub const DEFAULT_ALLOWED_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_+. ";

/// Returns the absolute directory containing `path`.
///
/// Relative paths are resolved against the current directory and `.`/`..`
/// are folded lexically before the last component is dropped. The filesystem
/// is not consulted, so `path` does not need to exist and symlinks are not
/// resolved.
///
/// # Errors
///
/// Fails if `path` is empty or the current directory cannot be determined.
pub fn directory_of(path: impl AsRef<Path>) -> io::Result<PathBuf> {
  let absolute = normalize_lexically(&std::path::absolute(path.as_ref())?);
  Ok(match absolute.parent() {
    Some(parent) => parent.to_path_buf(),
    None => absolute,
  })
}

/// Folds `.` and `..` components without touching the filesystem. `..` at
/// the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if matches!(out.components().next_back(), Some(Component::Normal(_))) {
          out.pop();
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

/// Creates every missing directory above `path`.
///
/// Existing directories are fine; only real failures (permissions, a file in
/// the way, ...) are returned.
///
/// # Errors
///
/// Returns the underlying I/O error from directory creation.
pub fn ensure_dir_for(path: impl AsRef<Path>) -> io::Result<()> {
  let dir = directory_of(path)?;
  trace!("Ensuring directory {}", dir.display());
  std::fs::create_dir_all(&dir)
}

/// Controls which characters survive [`safe_name_with`] and how long the
/// result may be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeNameOptions {
  /// Maximum length of the result in characters.
  pub max_length: usize,
  /// Every character allowed in the result. Spaces listed here are still
  /// turned into underscores.
  pub allowed_chars: String,
}

impl Default for SafeNameOptions {
  fn default() -> Self {
    Self {
      max_length: DEFAULT_MAX_NAME_LENGTH,
      allowed_chars: DEFAULT_ALLOWED_CHARS.to_string(),
    }
  }
}

impl SafeNameOptions {
  pub const fn with_max_length(mut self, max_length: usize) -> Self {
    self.max_length = max_length;
    self
  }

  pub fn with_allowed_chars(mut self, allowed_chars: impl Into<String>) -> Self {
    self.allowed_chars = allowed_chars.into();
    self
  }
}

/// Sanitizes `name` with the default options.
///
/// ```rust
/// use safefile::path_util::safe_name;
///
/// assert_eq!(safe_name("/()=Hello%&World!? Foo"), "HelloWorld_Foo");
/// ```
pub fn safe_name(name: &str) -> String {
  safe_name_with(name, &SafeNameOptions::default())
}

/// Keeps only allowed characters, replaces spaces with underscores and cuts
/// the result to `options.max_length` characters.
pub fn safe_name_with(name: &str, options: &SafeNameOptions) -> String {
  name
    .chars()
    .filter(|c| options.allowed_chars.contains(*c))
    .map(|c| if c == ' ' { '_' } else { c })
    .take(options.max_length)
    .collect()
}
