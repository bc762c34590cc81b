// src/progress.rs
/// Lightweight progress reporting for a collection run.
/// Frontends (GUI/CLI) implement this to surface status to users.
use crate::collect::RunOutcome;

pub trait Progress {
    /// Called once when the run starts.
    fn begin(&mut self) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called after every round: posts seen this round, vault total.
    fn round_done(&mut self, _round: u32, _found: usize, _total: usize) {}

    /// Called once at the end, whatever the outcome.
    fn finish(&mut self, _outcome: &RunOutcome) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
