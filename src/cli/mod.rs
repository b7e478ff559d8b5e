//! # CLI Module
//!
//! Command-line interface over the library helpers, parsed with clap.

mod commands;

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use commands::run;
use safefile::DEFAULT_CHUNK_SIZE;
use safefile::logging::ColorMode;
use safefile::path_util::DEFAULT_MAX_NAME_LENGTH;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), " ", env!("GIT_DATE"), ")");

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # MD5 digests of several files
  safefile md5 a.bin b.bin

  # Copy a file, writing to dest-1 if dest already exists
  safefile copy report.pdf out/report.pdf --copy

  # Turn an arbitrary title into a file name
  safefile safe-name \"Quarterly report: Q3/Q4?\"

  # Show config with DATABASE__HOST=... style overrides applied
  safefile --config app.toml show-config
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub global: GlobalArgs,

  #[command(subcommand)]
  pub command: Command,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    global = true,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// TOML config file with one table per section
  #[arg(long, global = true, value_name = "FILE")]
  pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print the MD5 digest of each file
  Md5 {
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Bytes read per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
  },

  /// Format a byte count with binary prefixes
  Size { bytes: u64 },

  /// List every file below a directory
  Ls { dir: PathBuf },

  /// Strip a name down to file-name-safe characters
  SafeName {
    name: String,

    /// Maximum length of the result
    #[arg(long, default_value_t = DEFAULT_MAX_NAME_LENGTH)]
    max_length: usize,
  },

  /// Copy a file using fail-safe read and write
  Copy {
    src: PathBuf,
    dest: PathBuf,

    /// Replace DEST if it exists
    #[arg(long)]
    overwrite: bool,

    /// Write to a numbered sibling of DEST if it exists
    #[arg(long = "copy")]
    copy_on_conflict: bool,
  },

  /// Delete files, ignoring the ones that are missing
  Rm {
    #[arg(required = true)]
    files: Vec<PathBuf>,
  },

  /// Print `git describe --always` for a directory
  Version {
    #[arg(default_value = ".")]
    dir: PathBuf,
  },

  /// Print the config given with --config after environment overrides
  ShowConfig,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Parse from an explicit argument list.
  #[cfg(test)]
  pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
  where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
  {
    Self::try_parse_from(args)
  }
}
