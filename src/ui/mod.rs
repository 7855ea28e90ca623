//! User interface module - formatting of status output.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_resolution, display_status,
    display_success, format_resolution_summary,
};
