//! Resolve command implementation
//!
//! The resolve command executes the full 5-phase pipeline:
//! 1. Locator mapping from the release name
//! 2. Default merging of built-in baselines and user overrides
//! 3. Override application over the built-in entries
//! 4. Conditional gating through the manage flags
//! 5. Declaration emission, rendered as text or JSON
//!
//! The command performs no host mutation: the rendered declarations are the
//! contract a reconciliation runtime consumes.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use openstack_repos::suggestions;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to parameter file
    #[arg(short, long, value_name = "PATH", env = "OPENSTACK_REPOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    pub format: String,

    /// Assume the reconciliation runtime does not support yum metalink
    /// attributes (EPEL falls back to a plain baseurl)
    #[arg(long)]
    pub no_metalink: bool,

    /// Suppress the summary footer
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, color_flag: &str) -> Result<()> {
    use openstack_repos::config::{self, RuntimeCapability};
    use openstack_repos::error::Error;
    use openstack_repos::output::{self, OutputConfig};
    use openstack_repos::phases::{emit, orchestrator};

    // Determine parameter file path
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

    let capability = if args.no_metalink {
        RuntimeCapability::BaseurlOnly
    } else {
        RuntimeCapability::Metalink
    };

    let resolved = orchestrator::resolve(&params, capability);
    let declarations = emit::declarations(&resolved);

    match args.format.as_str() {
        "json" => println!("{}", output::render_json(&declarations, resolved.purge_unmanaged)?),
        "text" => {
            let output_config = OutputConfig::from_env_and_flag(color_flag);
            print!(
                "{}",
                output::render_text(&declarations, resolved.purge_unmanaged, &output_config)
            );
            if !args.quiet {
                println!(
                    "{} declarations resolved for {} release '{}'",
                    declarations.len(),
                    params.family().as_str(),
                    params.release()
                );
            }
        }
        other => anyhow::bail!("unknown output format: {other} (expected 'text' or 'json')"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(config: PathBuf, format: &str) -> ResolveArgs {
        ResolveArgs {
            config: Some(config),
            format: format.to_string(),
            no_metalink: false,
            quiet: true,
        }
    }

    #[test]
    fn test_execute_missing_config() {
        let result = execute(
            args(PathBuf::from("/nonexistent/params.yaml"), "text"),
            "never",
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Parameter file not found"));
    }

    #[test]
    fn test_execute_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".openstack-repos.yaml");
        fs::write(&config_path, "family: redhat\nrelease: train\n").unwrap();

        let result = execute(args(config_path, "text"), "never");
        assert!(result.is_ok());
    }

    #[test]
    fn test_execute_json_format() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".openstack-repos.yaml");
        fs::write(&config_path, "family: debian\n").unwrap();

        let result = execute(args(config_path, "json"), "never");
        assert!(result.is_ok());
    }

    #[test]
    fn test_execute_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".openstack-repos.yaml");
        fs::write(&config_path, "family: debian\n").unwrap();

        let result = execute(args(config_path, "xml"), "never");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown output format"));
    }

    #[test]
    fn test_execute_unknown_family_gets_hint() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".openstack-repos.yaml");
        fs::write(&config_path, "family: debain\n").unwrap();

        let result = execute(args(config_path, "text"), "never");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unknown OS family"));
        assert!(message.contains("Did you mean 'debian'?"));
    }
}
