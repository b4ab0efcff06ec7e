//! # OpenStack Repository CLI
//!
//! This is the binary entry point for the `openstack-repos` command-line
//! tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into
//!   user-friendly output.
//!
//! The resolution engine itself lives in the library crate; the binary is a
//! thin wrapper that reads a parameter file, runs one resolution pass, and
//! renders the declarations. It never touches host package-manager state.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
