//! Completions command implementation
//!
//! Generates shell completion scripts for the CLI on stdout.

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut command = crate::cli::Cli::command();
    generate(args.shell, &mut command, "openstack-repos", &mut std::io::stdout());
    Ok(())
}
