//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// OpenStack Repositories - Resolve package repository configuration
#[derive(Parser, Debug)]
#[command(name = "openstack-repos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve repository declarations from a parameter file
    Resolve(commands::resolve::ResolveArgs),
    /// Validate a parameter file without emitting declarations
    Validate(commands::validate::ValidateArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Resolve(args) => commands::resolve::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route engine warnings (unrecognized attribute keys, mostly) to stderr at
/// the requested level.
fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Warn);
    let _ = env_logger::Builder::new().filter_level(filter).try_init();
}
