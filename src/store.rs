// src/store.rs
//
// The vault: deduplicated records, persisted as one JSON blob.
//
// Merge policy is first-write-wins on the URN. Rounds re-see posts that
// are already saved (the feed only grows downward), so a colliding
// incoming record is discarded rather than used to overwrite — the copy
// we already have was extracted from the same card anyway.

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::consts::{COLLECTION_FILE, STORE_DIR};
use crate::record::{Collection, PostRecord};

/// Merge `incoming` into `existing` in discovery order. Records without
/// an identifier are dropped. Returns how many survived as new.
pub fn merge(existing: &mut Vec<PostRecord>, incoming: Vec<PostRecord>) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|r| r.urn.clone()).collect();
    let mut added = 0;
    for rec in incoming {
        if !rec.has_identifier() {
            continue;
        }
        if seen.insert(rec.urn.clone()) {
            existing.push(rec);
            added += 1;
        }
    }
    added
}

pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Persistence boundary: a key-value blob store holding one collection.
pub trait Store {
    /// Load the persisted collection; absent storage reads as empty.
    fn load(&self) -> Result<Collection, Box<dyn Error>>;
    /// Replace the persisted collection in a single atomic write.
    fn save(&self, collection: &Collection) -> Result<(), Box<dyn Error>>;
    /// Empty the storage.
    fn clear(&self) -> Result<(), Box<dyn Error>>;
}

/// On-disk store: `.vault/collection.json`, written via temp file +
/// rename so a crash mid-write never truncates the vault.
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(COLLECTION_FILE)
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(join!(COLLECTION_FILE, ".tmp"))
    }
}

impl Default for DiskStore {
    fn default() -> Self {
        Self::new(STORE_DIR)
    }
}

impl Store for DiskStore {
    fn load(&self) -> Result<Collection, Box<dyn Error>> {
        let path = self.path();
        if !path.exists() {
            return Ok(Collection::default());
        }
        let text = fs::read_to_string(&path)?;
        let collection = serde_json::from_str(&text)
            .map_err(|e| format!("vault {} is corrupt: {e}", path.display()))?;
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> Result<(), Box<dyn Error>> {
        ensure_dir(&self.dir)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_vec_pretty(collection)?)?;
        fs::rename(&tmp, self.path())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), Box<dyn Error>> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(urn: &str) -> PostRecord {
        PostRecord::with_urn(urn)
    }

    #[test]
    fn merge_is_first_write_wins() {
        let mut existing = vec![rec("A"), rec("B")];
        let mut incoming_b = rec("B");
        incoming_b.author_name = Some(s!("Changed"));

        let added = merge(&mut existing, vec![incoming_b, rec("C"), rec("C")]);
        assert_eq!(added, 1);
        let urns: Vec<&str> = existing.iter().map(|r| r.urn.as_str()).collect();
        assert_eq!(urns, ["A", "B", "C"]);
        // The colliding record did not overwrite the stored one.
        assert!(existing[1].author_name.is_none());
    }

    #[test]
    fn merge_is_idempotent() {
        let batch = vec![rec("X"), rec("Y")];
        let mut existing = Vec::new();
        assert_eq!(merge(&mut existing, batch.clone()), 2);
        assert_eq!(merge(&mut existing, batch), 0);
        assert_eq!(existing.len(), 2);
    }

    #[test]
    fn merge_drops_records_without_identifier() {
        let mut existing = Vec::new();
        let added = merge(&mut existing, vec![PostRecord::default(), rec("Z")]);
        assert_eq!(added, 1);
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].urn, "Z");
    }

    #[test]
    fn merge_keeps_urns_unique() {
        let mut existing = Vec::new();
        merge(&mut existing, vec![rec("A"), rec("A"), rec("B"), rec("A")]);
        let mut urns: Vec<&str> = existing.iter().map(|r| r.urn.as_str()).collect();
        let before = urns.len();
        urns.dedup();
        assert_eq!(urns.len(), before);
    }

    mod disk {
        use super::*;

        fn tmp_store(name: &str) -> DiskStore {
            let mut p = std::env::temp_dir();
            p.push(format!("pv_store_{}", name));
            let _ = fs::remove_dir_all(&p);
            DiskStore::new(p)
        }

        #[test]
        fn missing_vault_reads_as_empty() {
            let store = tmp_store("missing");
            assert!(store.load().unwrap().is_empty());
        }

        #[test]
        fn save_then_load_round_trips() {
            let store = tmp_store("roundtrip");
            let mut c = Collection::default();
            c.posts.push(rec("urn:li:activity:1"));
            c.saved_at_unix = now_unix();
            store.save(&c).unwrap();

            let back = store.load().unwrap();
            assert_eq!(back.len(), 1);
            assert_eq!(back.posts[0].urn, "urn:li:activity:1");
            assert_eq!(back.saved_at_unix, c.saved_at_unix);
            // Atomic write leaves no temp file behind.
            assert!(!store.tmp_path().exists());
        }

        #[test]
        fn clear_empties_the_vault() {
            let store = tmp_store("clear");
            let mut c = Collection::default();
            c.posts.push(rec("one"));
            store.save(&c).unwrap();
            store.clear().unwrap();
            assert!(store.load().unwrap().is_empty());
            // Clearing an already-empty vault is fine too.
            store.clear().unwrap();
        }
    }
}
