//! # Output Rendering
//!
//! This module renders an emitted declaration sequence for consumption
//! outside the engine: a human-readable text listing for the terminal and
//! a JSON document for machine consumers.
//!
//! Color handling respects the usual conventions:
//! - `--color=never|always|auto` CLI flag
//! - `NO_COLOR` - disables colors when set (per <https://no-color.org/>)
//! - `TERM=dumb` - disables colors for dumb terminals
//! - non-TTY stdout disables colors in auto mode

use crate::declaration::Declare;
use crate::error::Result;
use serde::Serialize;
use std::env;

/// Output configuration for controlling colored rendering.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether styling should be applied to rendered text.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of the `--color` flag: `always`, `never`,
    /// or `auto`. In auto mode colors are disabled when `NO_COLOR` is set,
    /// `TERM=dumb`, or stdout is not a terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always disabled.
    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Render the declaration sequence as human-readable text.
///
/// One block per declaration: a `kind 'name'` header followed by indented
/// `key = value` lines in attribute order. When `purge_unmanaged` is set a
/// trailing note flags it for the reader.
pub fn render_text(declarations: &[Declare], purge_unmanaged: bool, config: &OutputConfig) -> String {
    let mut out = String::new();

    for declaration in declarations {
        let header = if config.use_color {
            format!(
                "{} '{}'",
                console::style(declaration.kind.as_str()).cyan(),
                console::style(&declaration.name).bold()
            )
        } else {
            format!("{} '{}'", declaration.kind.as_str(), declaration.name)
        };
        out.push_str(&header);
        out.push('\n');

        let width = declaration
            .attributes
            .keys()
            .map(str::len)
            .max()
            .unwrap_or(0);
        for (key, value) in declaration.attributes.iter() {
            out.push_str(&format!("    {:width$} = {}\n", key, value, width = width));
        }
        out.push('\n');
    }

    if purge_unmanaged {
        out.push_str("unmanaged repositories will be purged\n");
    }

    out
}

/// JSON document shape for rendered output.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    declarations: &'a [Declare],
    purge_unmanaged: bool,
}

/// Render the declaration sequence as a pretty-printed JSON document.
pub fn render_json(declarations: &[Declare], purge_unmanaged: bool) -> Result<String> {
    let document = JsonOutput {
        declarations,
        purge_unmanaged,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
