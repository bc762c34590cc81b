// src/loader.rs
//
// Feed-growth stability tracking for incremental loading.
//
// The page gives no "done loading" signal, so the run loop polls: trigger
// more content, settle, recount. A count seen STABILITY_THRESHOLD times
// in a row means the feed stopped growing. MAX_COLLECT_ROUNDS bounds a
// page that never stabilizes; hitting it is normal completion, not an
// error.

use crate::config::consts::{MAX_COLLECT_ROUNDS, STABILITY_THRESHOLD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Poll {
    /// Keep loading.
    Continue,
    /// Count unchanged for the threshold number of polls.
    Stable,
    /// Round cap hit; stop here with whatever is visible.
    Capped,
}

/// Pure stability tracker, one `observe` per poll.
///
/// Convention: the first sighting of a count starts the streak at 1, so
/// threshold 3 on counts [5, 8, 8, 8] stops at the fourth poll.
pub struct Stability {
    threshold: u32,
    max_rounds: u32,
    rounds: u32,
    streak: u32,
    last: Option<usize>,
}

impl Stability {
    pub fn new(threshold: u32, max_rounds: u32) -> Self {
        Self { threshold, max_rounds, rounds: 0, streak: 0, last: None }
    }

    pub fn rounds(&self) -> u32 { self.rounds }

    pub fn observe(&mut self, count: usize) -> Poll {
        self.rounds += 1;
        if self.last == Some(count) {
            self.streak += 1;
        } else {
            self.last = Some(count);
            self.streak = 1;
        }

        if self.streak >= self.threshold {
            Poll::Stable
        } else if self.rounds >= self.max_rounds {
            Poll::Capped
        } else {
            Poll::Continue
        }
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self::new(STABILITY_THRESHOLD, MAX_COLLECT_ROUNDS)
    }
}
