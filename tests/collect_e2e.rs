// tests/collect_e2e.rs
//
// End-to-end: a directory of progressively saved feed snapshots goes in,
// a deduplicated vault comes out. Uses the real SnapshotDir host and the
// real DiskStore, pointed at temp directories.

use std::fs;
use std::path::{Path, PathBuf};

use post_vault::collect::{CollectionState, RunStatus, collect_all};
use post_vault::host::SnapshotDir;
use post_vault::store::{DiskStore, Store};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("pv_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn card(urn: &str, text: &str) -> String {
    format!(
        r#"<div data-chameleon-result-urn="{urn}">
  <div class="entity-result__content">
    <a href="https://example.com/in/somebody/">Somebody</a>
    <img class="presence-entity__image" alt="Somebody" src="https://cdn.example.com/s.jpg">
    <div class="entity-result__metadata"><span>2 weeks ago</span></div>
    <p class="entity-result__summary">{text}</p>
  </div>
</div>"#
    )
}

/// One file per scroll step; each page holds the cumulative feed.
fn write_snapshots(dir: &Path, pages: &[&[(&str, &str)]]) {
    for (i, posts) in pages.iter().enumerate() {
        let mut html = String::from("<html><body>");
        for (urn, text) in posts.iter() {
            html.push_str(&card(urn, text));
        }
        html.push_str("</body></html>");
        fs::write(dir.join(format!("{:02}.html", i + 1)), html).unwrap();
    }
}

#[test]
fn full_run_fills_the_vault() {
    let snaps = tmp_dir("run_snaps");
    write_snapshots(
        &snaps,
        &[
            &[("urn:li:activity:1", "first")],
            &[("urn:li:activity:1", "first"), ("urn:li:activity:2", "second")],
            &[
                ("urn:li:activity:1", "first"),
                ("urn:li:activity:2", "second"),
                ("urn:li:activity:3", "third")
            ],
        ],
    );

    let store = DiskStore::new(tmp_dir("run_vault"));
    let mut host = SnapshotDir::open(&snaps).unwrap();
    let mut state = CollectionState::new();

    let outcome = collect_all(&mut host, &store, &mut state, None);
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.rounds, 3);
    assert_eq!(outcome.total_persisted, 3);

    let vault = store.load().unwrap();
    let urns: Vec<&str> = vault.posts.iter().map(|r| r.urn.as_str()).collect();
    assert_eq!(urns, ["urn:li:activity:1", "urn:li:activity:2", "urn:li:activity:3"]);
    assert_eq!(vault.posts[1].post_text.as_deref(), Some("second"));
    assert!(vault.saved_at_unix > 0);
}

#[test]
fn second_run_merges_nothing_new() {
    let snaps = tmp_dir("rerun_snaps");
    write_snapshots(
        &snaps,
        &[&[("urn:li:activity:10", "a"), ("urn:li:activity:11", "b")]],
    );
    let store = DiskStore::new(tmp_dir("rerun_vault"));

    let mut host = SnapshotDir::open(&snaps).unwrap();
    let mut state = CollectionState::new();
    collect_all(&mut host, &store, &mut state, None);

    let mut host = SnapshotDir::open(&snaps).unwrap();
    let mut state = CollectionState::new();
    let outcome = collect_all(&mut host, &store, &mut state, None);
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.total_persisted, 2);
    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn replayed_post_keeps_its_first_stored_copy() {
    let vault_dir = tmp_dir("fw_vault");
    let store = DiskStore::new(&vault_dir);

    let snaps_a = tmp_dir("fw_snaps_a");
    write_snapshots(&snaps_a, &[&[("urn:li:activity:7", "original text")]]);
    let mut host = SnapshotDir::open(&snaps_a).unwrap();
    collect_all(&mut host, &store, &mut CollectionState::new(), None);

    // Same post re-seen later with edited body: the stored copy wins.
    let snaps_b = tmp_dir("fw_snaps_b");
    write_snapshots(&snaps_b, &[&[("urn:li:activity:7", "edited text")]]);
    let mut host = SnapshotDir::open(&snaps_b).unwrap();
    collect_all(&mut host, &store, &mut CollectionState::new(), None);

    let vault = store.load().unwrap();
    assert_eq!(vault.len(), 1);
    assert_eq!(vault.posts[0].post_text.as_deref(), Some("original text"));
}

#[test]
fn cancel_before_load_more_keeps_the_first_round() {
    let snaps = tmp_dir("cancel_snaps");
    write_snapshots(
        &snaps,
        &[
            &[("urn:li:activity:20", "kept")],
            &[("urn:li:activity:20", "kept"), ("urn:li:activity:21", "never seen")],
        ],
    );

    let store = DiskStore::new(tmp_dir("cancel_vault"));
    let mut host = SnapshotDir::open(&snaps).unwrap();
    let mut state = CollectionState::new();
    state.cancel.request();

    let outcome = collect_all(&mut host, &store, &mut state, None);
    assert_eq!(outcome.status, RunStatus::Cancelled);
    assert_eq!(outcome.rounds, 1);
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn unrecognized_pages_complete_with_empty_vault() {
    let snaps = tmp_dir("mismatch_snaps");
    fs::write(snaps.join("01.html"), "<html><body><p>wrong page</p></body></html>").unwrap();

    let store = DiskStore::new(tmp_dir("mismatch_vault"));
    let mut host = SnapshotDir::open(&snaps).unwrap();
    let outcome = collect_all(&mut host, &store, &mut CollectionState::new(), None);

    // No selector generation matched: empty rounds, normal completion.
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.total_persisted, 0);
    assert!(store.load().unwrap().is_empty());
}
