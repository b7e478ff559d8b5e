//! # Logging Module
//!
//! Logging for the library and the `safefile` binary:
//! - Structured diagnostics through `tracing`, installed explicitly with
//!   [`init_tracing`]. The library never installs a subscriber on its own;
//!   fail-safe operations report their swallowed errors at error level.
//! - User-facing lines via [`info_log!`](crate::info_log) (stdout, coloured)
//!   and [`verbose_log!`](crate::verbose_log) (stderr, verbose mode only).
//!
//! ## Example
//!
//! ```rust
//! use safefile::logging::{ColorMode, init_tracing, set_verbose};
//! use safefile::{info_log, verbose_log};
//!
//! init_tracing(false, 1);
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Hashing file: {}", "example.bin");
//! info_log!("Wrote: {}", "example.bin");
//! ```

mod modes;

pub use modes::{ColorMode, default_level, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints one info line, yellow when colours are enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
