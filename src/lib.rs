//! # safefile
//!
//! Small, independent file helpers for best-effort processing pipelines.
//!
//! ## Features
//!
//! * Fail-safe read, write and delete that log errors instead of returning them
//! * Copy-on-conflict writes to numbered siblings (`report`, `report-1`, ...)
//! * File name sanitizing with a configurable whitelist and length limit
//! * Recursive file listing
//! * Chunked reading and MD5 digests of arbitrary readers
//! * Human readable byte counts with binary prefixes
//! * Environment variable overlays for sectioned configuration
//! * Version strings from `git describe`
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use safefile::store::{WriteOptions, read_binary, write_binary};
//! use safefile::hash::md5sum;
//!
//! fn main() -> std::io::Result<()> {
//!     safefile::logging::init_tracing(false, 0);
//!
//!     // Never fails; errors end up in the log.
//!     write_binary(b"payload", "out/data.bin", WriteOptions::new().copy_on_conflict(true));
//!
//!     let content = read_binary("out/data.bin");
//!     println!("{}", md5sum(content.as_slice())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`store`] - Fail-safe read/write/delete and copy numbering
//! * [`path_util`] - Parent directories and safe file names
//! * [`listing`] - Recursive file listing
//! * [`chunks`] / [`hash`] - Chunked reading and MD5 digests
//! * [`size`] - Human readable sizes
//! * [`config`] - Sectioned config with environment overrides
//! * [`git`] - Version strings from git
//! * [`logging`] - Tracing setup and output helpers

pub mod chunks;
pub mod config;
pub mod git;
pub mod hash;
pub mod listing;
pub mod logging;
pub mod path_util;
pub mod size;
pub mod store;

pub use chunks::{Chunks, DEFAULT_CHUNK_SIZE, read_in_chunks};
pub use config::{Config, ConfigError, apply_env_overrides, update_config_from_env};
pub use git::{GitError, version_from_git};
pub use hash::{md5sum, md5sum_file, md5sum_with_chunk_size};
pub use listing::list_files;
pub use path_util::{SafeNameOptions, directory_of, ensure_dir_for, safe_name, safe_name_with};
pub use size::human_readable_size;
pub use store::{WriteOptions, WriteOutcome, delete_file, next_suffixed_path, read_binary, write_binary};
