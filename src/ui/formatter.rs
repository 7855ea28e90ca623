//! Pure formatting functions for UI output.
//!
//! Everything here writes to stderr: stdout is reserved for machine-readable
//! results such as the resolved version.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::resolver::{Resolution, VersionSource};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green().for_stderr(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow().for_stderr(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// One-line, uncoloured description of how a version was resolved
pub fn format_resolution_summary(resolution: &Resolution) -> String {
    match (&resolution.latest_tag, resolution.source) {
        (None, _) => format!("Initial release version {}", resolution.version),
        (Some(tag), VersionSource::Manifest) => format!(
            "Next release version {} (manifest version is ahead of tag {})",
            resolution.version, tag
        ),
        (Some(tag), source) => format!(
            "Next release version {} (from {} {})",
            resolution.version, source, tag
        ),
    }
}

/// Display the warnings and summary of a resolution.
pub fn display_resolution(resolution: &Resolution) {
    for warning in &resolution.warnings {
        display_boundary_warning(warning);
    }
    display_success(&format_resolution_summary(resolution));
}
