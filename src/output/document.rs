//! Allocation document rendering and persistence.

use crate::error::{AppError, Result};
use crate::models::Allocation;
use clap::ValueEnum;
use std::path::Path;

/// Heading printed above the document on stdout.
pub const BANNER: &str = "VPC CIDR Configuration Blocks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Render the allocation as a document string.
///
/// YAML output starts with an explicit `---` document marker.
pub fn render(allocation: &Allocation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(format!("---\n{}", serde_yaml::to_string(allocation)?)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(allocation)? + "\n"),
    }
}

/// Print the banner and the document to stdout.
pub fn print_document(allocation: &Allocation, format: OutputFormat) -> Result<()> {
    println!("{BANNER}\n");
    print!("{}", render(allocation, format)?);
    println!("\n");
    Ok(())
}

/// Write the YAML document to `path`, creating parent directories.
pub fn write_document(path: &Path, allocation: &Allocation) -> Result<()> {
    let io_err = |source| AppError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let yaml = render(allocation, OutputFormat::Yaml)?;
    std::fs::write(path, yaml).map_err(io_err)?;
    log::info!("Wrote {} account(s) to {}", allocation.len(), path.display());
    Ok(())
}

/// Read a document written by [`write_document`].
pub fn read_document(path: &Path) -> Result<Allocation> {
    let yaml = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_yaml::from_str(&yaml)?)
}
