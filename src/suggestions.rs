//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints. Errors at the CLI boundary should tell users what
//! went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Parameter file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

/// Generate an error for when the parameter file is not found.
///
/// Includes hints about:
/// - Creating a new parameter file
/// - Using the -c/--config flag
/// - Using the OPENSTACK_REPOS_CONFIG environment variable
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Parameter file not found: {path}\n\n\
         hint: Create a .openstack-repos.yaml file in the working directory\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set OPENSTACK_REPOS_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for an unknown OS family.
///
/// Includes the list of valid families and a did-you-mean suggestion for
/// close misspellings.
pub fn unknown_family(family: &str) -> anyhow::Error {
    let valid_families = ["debian", "redhat"];

    // Check for common typos
    let suggestion = find_similar(family, &valid_families);
    let did_you_mean = suggestion
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown OS family: {family}{did_you_mean}\n\n\
         Valid families are: {families}\n\
         hint: OS detection is outside the engine; name the family explicitly",
        families = valid_families.join(", ")
    )
}

/// Generate an error for an attribute whose key is close to a recognized
/// one.
pub fn unrecognized_attribute(key: &str, entry: &str, recognized: &[&str]) -> anyhow::Error {
    let suggestion = find_similar(key, recognized);
    let did_you_mean = suggestion
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unrecognized attribute '{key}' on '{entry}'{did_you_mean}\n\n\
         hint: Run 'openstack-repos validate' to list recognized keys per kind"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
