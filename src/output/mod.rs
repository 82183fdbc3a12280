//! Output formatting for allocation results.
//!
//! This module handles formatting and outputting allocations:
//! - [`document`] - YAML/JSON document on stdout and on disk
//! - [`terminal`] - Per-subnet table and run summary with colors

mod document;
mod terminal;

pub use document::{
    print_document, read_document, render, write_document, OutputFormat, BANNER,
};
pub use terminal::{format_field, print_summary, subnet_rows};
