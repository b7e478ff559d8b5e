//! # Chunked Reading
//!
//! Lazily splits any [`Read`] source into bounded byte chunks so large files
//! can be processed without loading them into memory at once.
//!
//! ```rust
//! use safefile::chunks::read_in_chunks;
//!
//! let data: &[u8] = b"hello world";
//! let chunks: Vec<Vec<u8>> = read_in_chunks(data, 4).collect::<Result<_, _>>()?;
//! assert_eq!(chunks, vec![b"hell".to_vec(), b"o wo".to_vec(), b"rld".to_vec()]);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, ErrorKind, Read};

/// Chunk size used when callers do not ask for a specific one.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Iterator over fixed-size chunks of a reader.
///
/// Each item holds at most `chunk_size` bytes. Iteration ends on the first
/// zero-length read. Read errors are yielded once, after which the iterator
/// is exhausted.
#[derive(Debug)]
pub struct Chunks<R> {
  reader: R,
  chunk_size: usize,
  done: bool,
}

impl<R: Read> Chunks<R> {
  /// Wraps `reader`, clamping a zero `chunk_size` to one byte.
  pub fn new(reader: R, chunk_size: usize) -> Self {
    Self {
      reader,
      chunk_size: chunk_size.max(1),
      done: false,
    }
  }

  /// The effective chunk size.
  pub const fn chunk_size(&self) -> usize {
    self.chunk_size
  }

  /// Gives the underlying reader back.
  pub fn into_inner(self) -> R {
    self.reader
  }
}

impl<R: Read> Iterator for Chunks<R> {
  type Item = io::Result<Vec<u8>>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }

    let mut buf = vec![0u8; self.chunk_size];
    loop {
      match self.reader.read(&mut buf) {
        Ok(0) => {
          self.done = true;
          return None;
        }
        Ok(n) => {
          buf.truncate(n);
          return Some(Ok(buf));
        }
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e) => {
          self.done = true;
          return Some(Err(e));
        }
      }
    }
  }
}

/// Reads `reader` lazily in chunks of at most `chunk_size` bytes.
pub fn read_in_chunks<R: Read>(reader: R, chunk_size: usize) -> Chunks<R> {
  Chunks::new(reader, chunk_size)
}
