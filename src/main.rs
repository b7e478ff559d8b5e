//! # safefile
//!
//! Command-line front end for the safefile helpers.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  run(Cli::parse_args())
}
