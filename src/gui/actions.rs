// src/gui/actions.rs
//
// Button "executive" actions. Keeps layout code in app.rs and the
// operational logic here.

use std::sync::mpsc;
use std::thread;

use eframe::egui;

use crate::collect::{CollectionState, RunOutcome, RunStatus, collect_all};
use crate::file;
use crate::gui::app::App;
use crate::gui::progress::GuiProgress;
use crate::host::SnapshotDir;
use crate::store::{DiskStore, Store};

/// Start a collection run on a worker thread. Starting while a run is
/// active is a no-op.
pub fn start(app: &mut App) {
    if app.running {
        logd!("Start: Clicked while a run is active, ignoring");
        return;
    }

    let dir = app.state.options.collect.snapshot_dir.clone();
    logf!("Start: snapshot dir = {}", dir.display());

    let cancel = crate::collect::CancelFlag::new();
    app.cancel = cancel.clone();

    let (tx, rx) = mpsc::channel::<RunOutcome>();
    app.outcome_rx = Some(rx);
    app.running = true;
    app.status("Opening snapshots…");

    let status = app.status.clone();
    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        let store = DiskStore::default();
        let mut state = CollectionState::new();
        state.cancel = cancel;

        let outcome = match SnapshotDir::open(&dir) {
            Ok(mut host) => collect_all(&mut host, &store, &mut state, Some(&mut prog)),
            Err(e) => {
                loge!("Start: {}", e);
                let outcome = RunOutcome {
                    status: RunStatus::Failed,
                    rounds: 0,
                    total_persisted: 0,
                    error: Some(e.to_string()),
                };
                use crate::progress::Progress;
                prog.finish(&outcome);
                outcome
            }
        };
        let _ = tx.send(outcome);
    });
}

/// Ask the running collection to stop at the next round boundary.
pub fn stop(app: &mut App) {
    if !app.running {
        return;
    }
    logf!("Stop: cancellation requested");
    app.cancel.request();
    app.status("Stopping after this round…");
}

pub fn export(app: &mut App) {
    if app.records.is_empty() {
        app.status("Nothing to export");
        logd!("Export: Clicked, but the vault is empty");
        return;
    }

    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!(
            "Export: Out path set → {}",
            app.state.options.export.out_path().display()
        );
        app.out_path_dirty = false;
    }

    match file::write_export(&app.state.options.export, &app.records) {
        Ok(path) => {
            logf!("Export: OK rows={} path={}", app.records.len(), path.display());
            app.out_path_text = path.to_string_lossy().into_owned();
            app.status(format!("Exported {} posts → {}", app.records.len(), path.display()));
        }
        Err(e) => {
            loge!("Export: {}", e);
            app.status(format!("Export failed: {e}"));
        }
    }
}

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    if app.records.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but the vault is empty");
        return;
    }

    match file::to_export_string(&app.state.options.export, &app.records) {
        Ok(txt) => {
            ui_ctx.copy_text(txt);
            app.status("Copied to clipboard");
        }
        Err(e) => {
            loge!("Copy: {}", e);
            app.status(format!("Copy failed: {e}"));
        }
    }
}

pub fn clear(app: &mut App) {
    match DiskStore::default().clear() {
        Ok(()) => {
            logf!("Clear: vault emptied");
            app.records.clear();
            app.status("Vault cleared");
        }
        Err(e) => {
            loge!("Clear: {}", e);
            app.status(format!("Clear failed: {e}"));
        }
    }
}
