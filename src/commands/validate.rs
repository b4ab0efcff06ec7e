//! Validate command implementation
//!
//! Parses a parameter file, runs a resolution pass without emitting
//! anything, and reports attribute keys that fall outside the per-kind
//! whitelists. Structural problems (non-mapping hashes, non-scalar values,
//! unknown family) fail outright; unrecognized keys are warnings unless
//! `--strict` promotes them.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use openstack_repos::suggestions;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to parameter file
    #[arg(short, long, value_name = "PATH", env = "OPENSTACK_REPOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Treat unrecognized attribute keys as errors
    #[arg(long)]
    pub strict: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// One unrecognized attribute key on one resolved declaration.
struct Finding {
    kind: openstack_repos::declaration::DeclareKind,
    entry: String,
    key: String,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs) -> Result<()> {
    use openstack_repos::config::{self, RuntimeCapability};
    use openstack_repos::declaration::DeclareKind;
    use openstack_repos::error::Error;
    use openstack_repos::phases::orchestrator;

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(".openstack-repos.yaml"));

    if !config_path.exists() {
        return Err(suggestions::config_not_found(&config_path));
    }

    let params = match config::from_file(&config_path) {
        Ok(params) => params,
        Err(Error::UnknownFamily { family }) => return Err(suggestions::unknown_family(&family)),
        Err(error) => return Err(error.into()),
    };

    let resolved = orchestrator::resolve(&params, RuntimeCapability::default());

    let mut findings = Vec::new();
    for repo in &resolved.repos {
        let kind = DeclareKind::from(repo.kind);
        for key in repo.attributes.unrecognized_keys(kind.recognized_keys()) {
            findings.push(Finding {
                kind,
                entry: repo.name.clone(),
                key,
            });
        }
    }
    for gpg_key in &resolved.keys {
        for key in gpg_key
            .attributes
            .unrecognized_keys(DeclareKind::File.recognized_keys())
        {
            findings.push(Finding {
                kind: DeclareKind::File,
                entry: gpg_key.path.clone(),
                key,
            });
        }
    }

    if findings.is_empty() {
        if !args.quiet {
            println!(
                "parameter file {} is valid ({} declarations)",
                config_path.display(),
                resolved.len()
            );
        }
        return Ok(());
    }

    if args.strict {
        let finding = &findings[0];
        return Err(suggestions::unrecognized_attribute(
            &finding.key,
            &finding.entry,
            finding.kind.recognized_keys(),
        ));
    }

    for finding in &findings {
        eprintln!(
            "warning: unrecognized {} attribute '{}' on '{}'",
            finding.kind, finding.key, finding.entry
        );
    }
    if !args.quiet {
        println!(
            "parameter file {} is valid with {} warning(s)",
            config_path.display(),
            findings.len()
        );
    }

    Ok(())
}
