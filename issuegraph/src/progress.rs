//! Progress reporting through `tracing`.

use issuegraph_core::{Phase, ProgressObserver};

/// Logs a line at every 10% of a phase, plus its start and end.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: usize,
    next_decile: usize,
}

impl LogProgress {
    /// Create a logger with no phase in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for LogProgress {
    fn on_start(&mut self, phase: &Phase, total: usize) {
        self.total = total;
        self.next_decile = 1;
        tracing::info!(total, "{phase}...");
    }

    fn on_advance(&mut self, phase: &Phase, done: usize) {
        if self.total == 0 {
            return;
        }
        // done / total >= next_decile / 10
        while self.next_decile <= 10 && done * 10 >= self.next_decile * self.total {
            if self.next_decile < 10 {
                tracing::info!(done, total = self.total, "{phase}: {}%", self.next_decile * 10);
            }
            self.next_decile += 1;
        }
    }

    fn on_finish(&mut self, phase: &Phase) {
        tracing::info!(total = self.total, "{phase}: done");
    }
}
