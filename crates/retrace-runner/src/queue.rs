//! Deduplicating queue of pending observations.
//!
//! Multiple producers (chat events, roster snapshots, the local player
//! check-in) enqueue concurrently; the resolution loop is the single
//! consumer. Entries drain in FIFO order, one per loop cycle.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use retrace_types::PendingObservation;

/// Concurrency-safe pending-lookup queue. Cloning yields another handle to
/// the same queue.
#[derive(Debug, Clone, Default)]
pub struct ObservationQueue {
    inner: Arc<Mutex<VecDeque<PendingObservation>>>,
}

impl ObservationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sighting unless a pending entry already matches it. Returns
    /// `true` if the sighting was queued.
    ///
    /// Dedup rule: a new pair is rejected while *any* pending entry shares
    /// its name or its world -- not only an exact-pair match. The queue
    /// drains within seconds, so the suppression window is short.
    pub fn enqueue(&self, name: &str, world: &str) -> bool {
        let mut pending = self.inner.lock();
        if pending.iter().any(|p| p.name == name || p.world == world) {
            return false;
        }
        pending.push_back(PendingObservation::new(name, world));
        true
    }

    /// Remove and return the oldest pending observation, if any.
    pub fn dequeue(&self) -> Option<PendingObservation> {
        self.inner.lock().pop_front()
    }

    /// Number of pending observations.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
