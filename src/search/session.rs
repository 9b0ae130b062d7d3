use std::sync::atomic::{AtomicU64, Ordering};

/// Generation token handed to one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Tracks which search is the latest so a slow, superseded lookup cannot
/// overwrite the result of a newer one.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search, superseding every ticket issued before.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hands `value` back only if `ticket` is still the latest search.
    pub fn accept<T>(&self, ticket: SearchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "🔎 Discarding superseded search result");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_tickets_supersede_older_ones() {
        let session = SearchSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(first < second);
        assert_eq!(session.accept(first, "stale"), None);
        assert_eq!(session.accept(second, "fresh"), Some("fresh"));
    }
}
