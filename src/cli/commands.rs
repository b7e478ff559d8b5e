//! # Command Handlers
//!
//! Fail-safe commands (`copy`, `rm`, `ls`) always succeed; their errors show
//! up in the log. The others propagate errors and exit non-zero.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use safefile::config::{Config, update_config_from_env};
use safefile::hash::md5sum_with_chunk_size;
use safefile::logging::{init_tracing, set_quiet, set_verbose};
use safefile::path_util::{SafeNameOptions, safe_name_with};
use safefile::store::{WriteOptions, WriteOutcome, delete_file, read_binary, write_binary};
use safefile::{human_readable_size, info_log, list_files, verbose_log, version_from_git};
use tracing::debug;

use super::{Cli, Command, GlobalArgs};

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
  setup_output(&cli.global);

  match cli.command {
    Command::Md5 { files, chunk_size } => run_md5(&files, chunk_size),
    Command::Size { bytes } => {
      println!("{}", human_readable_size(bytes));
      Ok(())
    }
    Command::Ls { dir } => {
      run_ls(&dir);
      Ok(())
    }
    Command::SafeName { name, max_length } => {
      let options = SafeNameOptions::default().with_max_length(max_length);
      println!("{}", safe_name_with(&name, &options));
      Ok(())
    }
    Command::Copy {
      src,
      dest,
      overwrite,
      copy_on_conflict,
    } => {
      let options = WriteOptions::new().overwrite(overwrite).copy_on_conflict(copy_on_conflict);
      run_copy(&src, &dest, options);
      Ok(())
    }
    Command::Rm { files } => {
      run_rm(&files);
      Ok(())
    }
    Command::Version { dir } => {
      let version = version_from_git(&dir)?;
      println!("{version}");
      Ok(())
    }
    Command::ShowConfig => run_show_config(cli.global.config.as_deref()),
  }
}

fn setup_output(global: &GlobalArgs) {
  init_tracing(global.quiet, global.verbose);

  if global.verbose > 0 {
    set_verbose();
  } else if global.quiet {
    set_quiet();
  }
  global.colors.apply();
}

fn run_md5(files: &[PathBuf], chunk_size: usize) -> Result<()> {
  for path in files {
    verbose_log!("Hashing {} in {} byte chunks", path.display(), chunk_size);
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let digest =
      md5sum_with_chunk_size(file, chunk_size).with_context(|| format!("Failed to read file: {}", path.display()))?;
    println!("{digest}  {}", path.display());
  }
  Ok(())
}

fn run_ls(dir: &Path) {
  let mut files = list_files(dir);
  files.sort();
  debug!("Listing {} files", files.len());
  for file in files {
    println!("{}", file.display());
  }
}

fn run_copy(src: &Path, dest: &Path, options: WriteOptions) {
  let content = read_binary(src);
  verbose_log!("Read {} bytes from {}", content.len(), src.display());

  match write_binary(&content, dest, options) {
    WriteOutcome::Written(path) => info_log!("Wrote {}", path.display()),
    WriteOutcome::Copied(path) => info_log!("{} exists, wrote {}", dest.display(), path.display()),
    WriteOutcome::Skipped => info_log!("{} exists, skipped", dest.display()),
    WriteOutcome::Failed => info_log!("Could not write {}", dest.display()),
  }
}

fn run_rm(files: &[PathBuf]) {
  for path in files {
    if delete_file(path) {
      info_log!("Removed {}", path.display());
    }
  }
}

fn run_show_config(config_path: Option<&Path>) -> Result<()> {
  let config_path = config_path.context("show-config needs --config <FILE>")?;
  let mut config = Config::load(config_path)?;
  update_config_from_env(&mut config);

  print!("{}", config.to_toml_string().context("Failed to serialize config")?);
  Ok(())
}
