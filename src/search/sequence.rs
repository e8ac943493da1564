use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues tickets for submitted searches so that only the latest submission
/// may apply its results.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct SearchSequencer {
    latest: Arc<AtomicU64>,
}

/// Sequence number taken when a search is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a new search, superseding every earlier one.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersede all outstanding tickets without starting a search.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether a response for `ticket` may still be applied.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
