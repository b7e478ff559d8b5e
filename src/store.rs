//! # Fail-safe File Store
//!
//! Read, write and delete helpers that never hand an error back to the caller.
//! Every failure is logged through `tracing` at error level, with the
//! [`io::ErrorKind`] and message, and then turned into a harmless result:
//! empty content for reads, nothing written for writes, nothing removed for
//! deletes.
//!
//! Writes create missing parent directories. An existing target is only
//! replaced with [`WriteOptions::overwrite`]; with
//! [`WriteOptions::copy_on_conflict`] the content goes to a numbered sibling
//! instead (see [`next_suffixed_path`]).
//!
//! None of this is coordinated across threads or processes. Two concurrent
//! copy-on-conflict writes to the same path compute the same sibling name and
//! the later one wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::path_util::ensure_dir_for;

/// Flags for [`write_binary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
  /// Replace the target if it already exists.
  pub overwrite: bool,
  /// When the target exists and `overwrite` is off, write to the next
  /// numbered sibling instead.
  pub copy_on_conflict: bool,
}

impl WriteOptions {
  pub const fn new() -> Self {
    Self {
      overwrite: false,
      copy_on_conflict: false,
    }
  }

  pub const fn overwrite(mut self, overwrite: bool) -> Self {
    self.overwrite = overwrite;
    self
  }

  pub const fn copy_on_conflict(mut self, copy_on_conflict: bool) -> Self {
    self.copy_on_conflict = copy_on_conflict;
    self
  }
}

/// What [`write_binary`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
  /// Content was written to the requested path.
  Written(PathBuf),
  /// The requested path existed; content was written to this numbered sibling.
  Copied(PathBuf),
  /// The requested path existed and neither flag allowed touching it.
  Skipped,
  /// An I/O error occurred and was logged.
  Failed,
}

/// Reads the whole file at `path`.
///
/// Symbolic links are not followed: the result is the text
/// `symbolic link -> <target>`. Any error is logged and yields an empty
/// buffer.
pub fn read_binary(path: impl AsRef<Path>) -> Vec<u8> {
  let path = path.as_ref();
  match try_read(path) {
    Ok(content) => content,
    Err(e) => {
      error!(path = %path.display(), kind = ?e.kind(), "Could not read file: {e}");
      Vec::new()
    }
  }
}

fn try_read(path: &Path) -> io::Result<Vec<u8>> {
  let metadata = fs::symlink_metadata(path)?;
  if metadata.file_type().is_symlink() {
    let target = fs::read_link(path)?;
    return Ok(format!("symbolic link -> {}", target.display()).into_bytes());
  }
  fs::read(path)
}

/// Writes `content` to `path` according to `options`.
///
/// Never fails: errors are logged and reported as [`WriteOutcome::Failed`].
pub fn write_binary(content: impl AsRef<[u8]>, path: impl AsRef<Path>, options: WriteOptions) -> WriteOutcome {
  let path = path.as_ref();
  match try_write(content.as_ref(), path, options) {
    Ok(outcome) => outcome,
    Err(e) => {
      error!(path = %path.display(), kind = ?e.kind(), "Could not write file: {e}");
      WriteOutcome::Failed
    }
  }
}

fn try_write(content: &[u8], path: &Path, options: WriteOptions) -> io::Result<WriteOutcome> {
  ensure_dir_for(path)?;

  if !path.exists() || options.overwrite {
    fs::write(path, content)?;
    return Ok(WriteOutcome::Written(path.to_path_buf()));
  }

  if options.copy_on_conflict {
    let copy_path = next_suffixed_path(path);
    debug!("{} exists, writing copy to {}", path.display(), copy_path.display());
    fs::write(&copy_path, content)?;
    return Ok(WriteOutcome::Copied(copy_path));
  }

  debug!("{} exists, leaving it untouched", path.display());
  Ok(WriteOutcome::Skipped)
}

/// Removes the file at `path`.
///
/// Returns `true` if a file was removed. A missing file, like any other
/// failure, is logged and reported as `false`.
pub fn delete_file(path: impl AsRef<Path>) -> bool {
  let path = path.as_ref();
  match fs::remove_file(path) {
    Ok(()) => true,
    Err(e) => {
      error!(path = %path.display(), kind = ?e.kind(), "Could not delete file: {e}");
      false
    }
  }
}

/// Computes the numbered sibling used for copy-on-conflict writes.
///
/// A trailing `-<digits>` is incremented, anything else gets `-1` appended.
/// Works on the raw bytes of the path only, so non-UTF-8 names keep their
/// stem intact, and never checks whether the result exists.
///
/// ```rust
/// use std::path::PathBuf;
/// use safefile::store::next_suffixed_path;
///
/// assert_eq!(next_suffixed_path("/foo/bar"), PathBuf::from("/foo/bar-1"));
/// assert_eq!(next_suffixed_path("/foo/bar-11"), PathBuf::from("/foo/bar-12"));
/// assert_eq!(next_suffixed_path("foo-34/bar"), PathBuf::from("foo-34/bar-1"));
/// ```
pub fn next_suffixed_path(path: impl AsRef<Path>) -> PathBuf {
  let path = path.as_ref();

  #[cfg(unix)]
  {
    use std::ffi::OsString;
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    PathBuf::from(OsString::from_vec(next_suffixed_name(path.as_os_str().as_bytes())))
  }

  #[cfg(not(unix))]
  {
    let name = next_suffixed_name(path.to_string_lossy().as_bytes());
    PathBuf::from(String::from_utf8_lossy(&name).into_owned())
  }
}

/// Byte-level suffix rule; the stem is copied through untouched.
fn next_suffixed_name(name: &[u8]) -> Vec<u8> {
  if let Some(dash) = name.iter().rposition(|&b| b == b'-') {
    let digits = &name[dash + 1..];
    if !digits.is_empty() && digits.iter().all(u8::is_ascii_digit) {
      let mut out = name[..=dash].to_vec();
      out.extend(increment_decimal(digits));
      return out;
    }
  }

  let mut out = name.to_vec();
  out.extend_from_slice(b"-1");
  out
}

/// Adds one to a run of ASCII digits without an integer width limit.
/// Leading zeros are dropped, matching integer parsing.
fn increment_decimal(digits: &[u8]) -> Vec<u8> {
  let first_significant = digits.iter().position(|&b| b != b'0').unwrap_or(digits.len());
  let mut out = digits[first_significant..].to_vec();

  let mut carry = true;
  for digit in out.iter_mut().rev() {
    if *digit == b'9' {
      *digit = b'0';
    } else {
      *digit += 1;
      carry = false;
      break;
    }
  }
  if carry {
    out.insert(0, b'1');
  }

  out
}
