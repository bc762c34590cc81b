// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };

use crate::core::sanitize::sanitize_filename;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub collect: CollectOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            collect: CollectOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/// Where the page snapshots come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    /// Directory of saved-page HTML files, read in filename order.
    pub snapshot_dir: PathBuf,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self { snapshot_dir: PathBuf::from("snapshots") }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Json => "json", ExportFormat::Csv => "csv" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = self.format.ext();
        path.push(join!(stem, ".", ext));
        path
    }

    /// Parse GUI text into dir + stem. The stem is sanitized for the
    /// filesystem; the pasted extension is ignored, format controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem =
                OsString::from(sanitize_filename(&stem.to_string_lossy()));
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
