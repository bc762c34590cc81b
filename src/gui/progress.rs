// src/gui/progress.rs
use std::sync::{ Arc, Mutex };

use crate::collect::{RunOutcome, RunStatus};
use crate::progress::Progress;

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status }
    }
    fn set_status(&self, msg: impl Into<String>) {
        let text = msg.into();
        *self.status.lock().unwrap() = text;
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self) {
        self.set_status(s!("Collecting…"));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn round_done(&mut self, round: u32, found: usize, total: usize) {
        self.set_status(format!(
            "Round {}: {} posts visible, {} in vault",
            round, found, total
        ));
    }
    fn finish(&mut self, outcome: &RunOutcome) {
        let msg = match outcome.status {
            RunStatus::Completed => {
                format!("Done — {} posts in vault", outcome.total_persisted)
            }
            RunStatus::Cancelled => {
                format!("Stopped — {} posts kept", outcome.total_persisted)
            }
            RunStatus::Failed => match &outcome.error {
                Some(e) => format!("Error: {e}"),
                None => s!("Error"),
            },
            _ => outcome.status.to_string(),
        };
        self.set_status(msg);
    }
}
