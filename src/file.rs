// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv;
use crate::record::PostRecord;

/// Build the export payload for the current options (Export writes it,
/// Copy puts it on the clipboard).
pub fn to_export_string(
    export: &ExportOptions,
    records: &[PostRecord],
) -> Result<String, Box<dyn Error>> {
    match export.format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Csv => Ok(csv::to_export_string(records, export.include_headers)),
    }
}

/// Write a single export file based on ExportOptions (path, format,
/// headers policy). Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    records: &[PostRecord],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    fs::write(&path, to_export_string(export, records)?)?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
