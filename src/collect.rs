// src/collect.rs
//
// Collection orchestrator: rounds of extract → merge+persist → load more,
// until the host runs dry, the visible count stops growing, the user
// cancels, or something breaks.
//
// Extracting before loading everything keeps memory bounded and persists
// partial progress, so a cancelled or failed run still keeps what it saw.
// Cancellation is only observed at the round boundary: an in-flight
// merge always completes, never leaving a half-written batch.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::consts::MAX_COLLECT_ROUNDS;
use crate::extract::collect_visible;
use crate::host::{LoadMore, PageHost};
use crate::loader::{Poll, Stability};
use crate::progress::Progress;
use crate::store::{Store, merge, now_unix};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Idle => "Idle",
            RunStatus::Running => "Running",
            RunStatus::Completed => "Completed",
            RunStatus::Cancelled => "Cancelled",
            RunStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// Shared stop flag. The UI thread sets it; the run polls it between
/// rounds.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-run mutable state. Created when a run starts, discarded when it
/// ends; passed explicitly so runs (and tests) never share ambient
/// globals.
pub struct CollectionState {
    pub round: u32,
    pub total_persisted: usize,
    pub cancel: CancelFlag,
}

impl CollectionState {
    pub fn new() -> Self {
        Self { round: 0, total_persisted: 0, cancel: CancelFlag::new() }
    }
}

impl Default for CollectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal report of a run. `error` is set only for `Failed`.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub rounds: u32,
    pub total_persisted: usize,
    pub error: Option<String>,
}

/// Run one collection to completion.
///
/// One run at a time: callers gate re-entry (the GUI with its `running`
/// flag, the CLI by being sequential). Failures never retry — a broken
/// store or snapshot stays broken; everything merged in earlier rounds
/// is already on disk.
pub fn collect_all(
    host: &mut dyn PageHost,
    store: &dyn Store,
    state: &mut CollectionState,
    mut progress: Option<&mut dyn Progress>,
) -> RunOutcome {
    state.round = 0;

    if let Some(p) = progress.as_deref_mut() {
        p.begin();
    }

    let mut collection = match store.load() {
        Ok(c) => c,
        Err(e) => return fail(state, progress, join!("vault load: ", &e.to_string())),
    };
    state.total_persisted = collection.len();
    logf!("Collect: Begin (vault has {} posts)", state.total_persisted);

    let mut stability = Stability::default();
    let status = loop {
        state.round += 1;

        let snapshot = match host.snapshot() {
            Ok(s) => s,
            Err(e) => return fail(state, progress, join!("snapshot: ", &e.to_string())),
        };

        let batch = collect_visible(&snapshot);
        let found = batch.len();

        if found > 0 {
            let added = merge(&mut collection.posts, batch);
            collection.saved_at_unix = now_unix();
            if let Err(e) = store.save(&collection) {
                return fail(state, progress, join!("vault save: ", &e.to_string()));
            }
            state.total_persisted = collection.len();
            logd!(
                "Collect: round {} found={} new={} total={}",
                state.round, found, added, state.total_persisted
            );
        }

        if let Some(p) = progress.as_deref_mut() {
            p.round_done(state.round, found, state.total_persisted);
        }

        if state.cancel.is_set() {
            break RunStatus::Cancelled;
        }

        // A host that keeps claiming more content while the visible count
        // stays flat has stopped producing; the cap bounds one that never
        // stabilizes at all.
        match stability.observe(found) {
            Poll::Stable => {
                logd!("Collect: count stable at {} after {} rounds", found, state.round);
                break RunStatus::Completed;
            }
            Poll::Capped => {
                // Page kept producing content past the cap. Stop here;
                // what we saved is saved.
                logf!("Collect: round cap reached after {} rounds", MAX_COLLECT_ROUNDS);
                break RunStatus::Completed;
            }
            Poll::Continue => {}
        }

        match host.trigger_load_more() {
            Ok(LoadMore::Exhausted) => break RunStatus::Completed,
            Ok(LoadMore::Triggered) => host.settle(),
            Err(e) => return fail(state, progress, join!("load more: ", &e.to_string())),
        }
    };

    let outcome = RunOutcome {
        status,
        rounds: state.round,
        total_persisted: state.total_persisted,
        error: None,
    };
    logf!(
        "Collect: {} after {} rounds, {} posts in vault",
        outcome.status, outcome.rounds, outcome.total_persisted
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&outcome);
    }
    outcome
}

fn fail(
    state: &CollectionState,
    mut progress: Option<&mut dyn Progress>,
    msg: String,
) -> RunOutcome {
    loge!("Collect: {}", msg);
    let outcome = RunOutcome {
        status: RunStatus::Failed,
        rounds: state.round,
        total_persisted: state.total_persisted,
        error: Some(msg),
    };
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&outcome);
    }
    outcome
}
