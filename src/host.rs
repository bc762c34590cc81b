// src/host.rs
//
// Boundary to the page being scraped.
//
// The feed sits behind a login wall, so input arrives as page snapshots
// the user saved while scrolling. `PageHost` models the page the way the
// collector sees it: a DOM snapshot, a "load more" affordance, and a
// settle pause after triggering it. `SnapshotDir` is the shipping
// implementation; tests drive the orchestrator with scripted hosts.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::config::consts::SETTLE_MS;

/// Outcome of poking the "load more" affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMore {
    /// More content was requested; settle before recounting.
    Triggered,
    /// No affordance left (hidden, disabled, or absent).
    Exhausted,
}

pub trait PageHost {
    /// Current DOM as HTML text.
    fn snapshot(&mut self) -> Result<String, Box<dyn Error>>;

    /// Scroll to bottom / click "load more".
    fn trigger_load_more(&mut self) -> Result<LoadMore, Box<dyn Error>>;

    /// Wait for the page to settle after a trigger. Live hosts get the
    /// fixed delay; hosts backed by static files override to a no-op.
    fn settle(&mut self) {
        thread::sleep(Duration::from_millis(SETTLE_MS));
    }
}

/// Directory of progressively saved page files, visited in filename
/// order. Each file is one snapshot of the growing feed; advancing to
/// the next file is this host's "load more".
pub struct SnapshotDir {
    files: Vec<PathBuf>,
    cursor: usize,
}

impl SnapshotDir {
    pub fn open(dir: &Path) -> Result<Self, Box<dyn Error>> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| format!("cannot read snapshot dir {}: {e}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && matches!(
                        p.extension().and_then(|s| s.to_str()),
                        Some("html") | Some("htm")
                    )
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(format!("no .html snapshots in {}", dir.display()).into());
        }
        Ok(Self { files, cursor: 0 })
    }

    pub fn file_count(&self) -> usize { self.files.len() }
}

impl PageHost for SnapshotDir {
    fn snapshot(&mut self) -> Result<String, Box<dyn Error>> {
        let path = &self.files[self.cursor];
        fs::read_to_string(path)
            .map_err(|e| format!("cannot read snapshot {}: {e}", path.display()).into())
    }

    fn trigger_load_more(&mut self) -> Result<LoadMore, Box<dyn Error>> {
        if self.cursor + 1 < self.files.len() {
            self.cursor += 1;
            Ok(LoadMore::Triggered)
        } else {
            Ok(LoadMore::Exhausted)
        }
    }

    fn settle(&mut self) {
        // Files on disk are already settled.
    }
}
