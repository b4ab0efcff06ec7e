//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `openstack-repos` library. It uses the `thiserror` library to create a
//! single `Error` enum covering all anticipated failure modes, providing
//! clear and descriptive error messages.
//!
//! The resolution engine itself is designed to be nearly total: absent keys
//! fall back to defaults and unknown release names flow through as literal
//! text. The failure modes that remain are structural:
//!
//! - Parameter file parsing errors (malformed YAML, missing family).
//! - Attribute type errors: a non-mapping value where an attribute set is
//!   expected, or a non-scalar value where a scalar attribute is expected.
//!   These abort the whole resolution pass with no partial output.
//! - Reconciliation errors raised by a [`Reconciler`](crate::declaration::Reconciler)
//!   implementation while consuming emitted declarations.
//! - Wrapped I/O, YAML, and JSON errors from the ambient plumbing.
//!
//! The `Result<T>` alias is used throughout the library to simplify function
//! signatures.

use thiserror::Error;

/// Main error type for openstack-repos operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the parameter file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Parameter parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the parameter issue
        hint: Option<String>,
    },

    /// A value of the wrong shape was passed where an attribute set or a
    /// scalar attribute value was expected.
    ///
    /// This is the only hard failure mode of the resolution engine proper;
    /// it aborts the entire pass without producing partial output.
    #[error("Attribute type error in {entry}: {message}")]
    AttributeType { entry: String, message: String },

    /// The parameter file named an OS family the engine does not know.
    #[error("Unknown OS family: {family} (expected 'debian' or 'redhat')")]
    UnknownFamily { family: String },

    /// An error reported by the external reconciliation interface while
    /// consuming a declaration.
    #[error("Reconciliation error for {kind}[{name}]: {message}")]
    Reconciliation {
        kind: String,
        name: String,
        message: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            message: "Invalid YAML".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Parameter parsing error"));
        assert!(display.contains("Invalid YAML"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "Missing family field".to_string(),
            hint: Some("Add 'family: debian' or 'family: redhat'".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Parameter parsing error"));
        assert!(display.contains("Missing family field"));
        assert!(display.contains("hint:"));
        assert!(display.contains("family: debian"));
    }

    #[test]
    fn test_error_display_attribute_type() {
        let error = Error::AttributeType {
            entry: "repo_hash['CentOS-Base']".to_string(),
            message: "expected a mapping of attribute keys to scalar values".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Attribute type error"));
        assert!(display.contains("repo_hash['CentOS-Base']"));
        assert!(display.contains("expected a mapping"));
    }

    #[test]
    fn test_error_display_unknown_family() {
        let error = Error::UnknownFamily {
            family: "suse".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown OS family: suse"));
        assert!(display.contains("debian"));
        assert!(display.contains("redhat"));
    }

    #[test]
    fn test_error_display_reconciliation() {
        let error = Error::Reconciliation {
            kind: "yumrepo".to_string(),
            name: "rdo-release".to_string(),
            message: "runtime rejected declaration".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Reconciliation error"));
        assert!(display.contains("yumrepo[rdo-release]"));
        assert!(display.contains("runtime rejected declaration"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }
}
