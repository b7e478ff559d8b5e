//! MD5 content digests computed over chunked reads.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use md5::{Digest, Md5};

use crate::chunks::{DEFAULT_CHUNK_SIZE, read_in_chunks};

/// Computes the lowercase hex MD5 digest of everything `reader` yields.
///
/// # Errors
///
/// Propagates the first read error.
pub fn md5sum<R: Read>(reader: R) -> io::Result<String> {
  md5sum_with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
}

/// Same as [`md5sum`] with an explicit chunk size. The digest does not depend
/// on `chunk_size`.
///
/// # Errors
///
/// Propagates the first read error.
pub fn md5sum_with_chunk_size<R: Read>(reader: R, chunk_size: usize) -> io::Result<String> {
  let mut hasher = Md5::new();
  for chunk in read_in_chunks(reader, chunk_size) {
    hasher.update(chunk?);
  }
  Ok(format!("{:x}", hasher.finalize()))
}

/// Opens `path` and hashes its contents.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn md5sum_file(path: &Path) -> io::Result<String> {
  let file = File::open(path)?;
  md5sum(io::BufReader::new(file))
}
