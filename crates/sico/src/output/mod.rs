//! Output formatting utilities for the sico CLI.
//!
//! - [`anlagen`] - Anlage list output (product-specific columns, filter summary)
//! - [`licenses`] - Created and deleted license output
//! - [`helpers`] - Common formatting utilities (truncation, empty cells)

mod anlagen;
pub mod helpers;
mod licenses;

pub use anlagen::{format_anlagen_json, format_anlagen_table};
pub use licenses::{format_created_license, format_created_license_table, format_deleted_license};
