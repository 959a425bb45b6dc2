//! End-of-run tally.

use std::collections::BTreeMap;

use tracing::info;

use fxwallet_core::settlement::{Outcome, RejectionReason};

/// Counts of settled and rejected requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    settled: usize,
    rejected: BTreeMap<RejectionReason, usize>,
}

impl RunSummary {
    /// Counts one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.rejection() {
            Some(reason) => *self.rejected.entry(reason).or_default() += 1,
            None => self.settled += 1,
        }
    }

    /// Requests settled.
    pub const fn settled(&self) -> usize {
        self.settled
    }

    /// Requests rejected, all reasons.
    pub fn rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    /// Requests rejected for `reason`.
    pub fn rejected_for(&self, reason: RejectionReason) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }

    /// Requests processed.
    pub fn total(&self) -> usize {
        self.settled + self.rejected()
    }

    /// Emits the summary at info level, one line per rejection reason seen.
    pub fn log(&self) {
        info!(
            total = self.total(),
            settled = self.settled,
            rejected = self.rejected(),
            "Run complete"
        );
        for (reason, count) in &self.rejected {
            info!(reason = reason.code(), count, "Rejections");
        }
    }
}
