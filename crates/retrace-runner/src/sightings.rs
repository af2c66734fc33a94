//! Sighting ingestion from the host environment.
//!
//! The host delivers `(name, world)` pairs from three sources: players
//! mentioned or speaking in chat-like events, the periodic snapshot of
//! currently visible players, and the local player's own identity once per
//! login. All ingestion paths return promptly -- they only enqueue, never
//! block on network I/O.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::queue::ObservationQueue;

/// Adapter between host callbacks and the observation queue.
#[derive(Debug)]
pub struct SightingSink {
    queue: ObservationQueue,
    /// Set once the local player has been queued for this login session.
    local_checked: AtomicBool,
}

impl SightingSink {
    /// Create a sink feeding `queue`.
    pub const fn new(queue: ObservationQueue) -> Self {
        Self {
            queue,
            local_checked: AtomicBool::new(false),
        }
    }

    /// Record a player seen in a chat-like event. Returns `true` if the
    /// sighting was queued (not deduplicated away).
    pub fn observe_chat(&self, name: &str, world: &str) -> bool {
        let queued = self.queue.enqueue(name, world);
        if queued {
            trace!(name, world, "chat sighting queued");
        }
        queued
    }

    /// Record a snapshot of every player currently visible. Returns how
    /// many sightings survived dedup and were queued.
    pub fn observe_roster<'a, I>(&self, players: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut queued = 0_usize;
        for (name, world) in players {
            if self.queue.enqueue(name, world) {
                trace!(name, world, "roster sighting queued");
                queued = queued.saturating_add(1);
            }
        }
        queued
    }

    /// Check in the local player's own identity. Only the first call per
    /// login session enqueues; later calls are no-ops until
    /// [`SightingSink::local_player_gone`] re-arms the check-in.
    pub fn observe_local_player(&self, name: &str, world: &str) {
        if self.local_checked.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.queue.enqueue(name, world);
        debug!(name, world, "local player checked in");
    }

    /// The local player is no longer available (possibly switching
    /// characters); re-arm the check-in for the next login.
    pub fn local_player_gone(&self) {
        self.local_checked.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn local_player_checks_in_once() {
        let queue = ObservationQueue::new();
        let sink = SightingSink::new(queue.clone());

        sink.observe_local_player("My Toon", "Gilgamesh");
        let _ = queue.dequeue();

        // Second update in the same session: not re-queued.
        sink.observe_local_player("My Toon", "Gilgamesh");
        assert!(queue.is_empty());
    }

    #[test]
    fn local_player_gone_rearms_check_in() {
        let queue = ObservationQueue::new();
        let sink = SightingSink::new(queue.clone());

        sink.observe_local_player("My Toon", "Gilgamesh");
        let _ = queue.dequeue();

        sink.local_player_gone();
        sink.observe_local_player("Alt Toon", "Excalibur");
        assert_eq!(queue.dequeue().unwrap().name, "Alt Toon");
    }

    #[test]
    fn roster_snapshot_queues_with_dedup() {
        let queue = ObservationQueue::new();
        let sink = SightingSink::new(queue.clone());

        let queued = sink.observe_roster(vec![
            ("A One", "Adamantoise"),
            ("B Two", "Behemoth"),
            // Shares a world with a pending entry: deduplicated away.
            ("C Three", "Adamantoise"),
        ]);
        assert_eq!(queued, 2);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn chat_sighting_reports_dedup() {
        let queue = ObservationQueue::new();
        let sink = SightingSink::new(queue);

        assert!(sink.observe_chat("Foo Bar", "Gilgamesh"));
        assert!(!sink.observe_chat("Foo Bar", "Gilgamesh"));
    }
}
