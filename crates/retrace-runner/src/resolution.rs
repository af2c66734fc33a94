//! The resolution loop: the core pipeline from sighting to cached alias.
//!
//! A single cooperative worker drains the observation queue at a fixed
//! cadence. Each cycle: dequeue at most one sighting, resolve it against the
//! search service, merge the result into the cache, persist. The fixed sleep
//! between cycles is the rate limit protecting the search service from
//! sighting bursts.
//!
//! The loop is the only writer to the cache; query paths hold read guards
//! only. Cancellation is cooperative -- the token is observed at loop-top,
//! during the in-flight search call, and during the inter-cycle sleep.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use retrace_cache::{AliasCache, CacheStore};
use retrace_resolver::SearchClient;
use retrace_types::StableId;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::queue::ObservationQueue;

/// What a single loop cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Queue was empty; no resolve, merge, or persist happened.
    Idle,
    /// One sighting was dequeued and a resolve attempt completed.
    Completed {
        /// The resolved identity (possibly the unresolved sentinel).
        stable_id: StableId,
        /// Whether the merge changed the cache.
        changed: bool,
    },
    /// Cancellation was observed while a resolve was in flight.
    Cancelled,
}

/// The single background worker that turns sightings into cached aliases.
pub struct ResolutionLoop {
    queue: ObservationQueue,
    cache: Arc<RwLock<AliasCache>>,
    store: CacheStore,
    client: SearchClient,
    interval: Duration,
}

impl ResolutionLoop {
    /// Create a loop over the shared queue and cache.
    pub const fn new(
        queue: ObservationQueue,
        cache: Arc<RwLock<AliasCache>>,
        store: CacheStore,
        client: SearchClient,
        interval: Duration,
    ) -> Self {
        Self {
            queue,
            cache,
            store,
            client,
            interval,
        }
    }

    /// Run until the token is cancelled.
    ///
    /// Runs one cycle, then sleeps the fixed interval, racing both the
    /// in-flight resolve and the sleep against the cancellation token.
    /// On cancellation the cache is persisted once more and the task exits
    /// cleanly; cancellation is a shutdown path, not an error.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            interval_ms = self.interval.as_millis(),
            "resolution loop started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if self.run_cycle(&cancel).await == CycleOutcome::Cancelled {
                break;
            }

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        // Shutdown persist so a merge from the final cycle is never lost.
        self.persist();
        info!("resolution loop stopped");
    }

    /// Execute one cycle: dequeue, resolve, merge, persist.
    ///
    /// An empty queue skips the whole cycle. An unresolved result is
    /// silently dropped -- the sighting is *not* requeued and will only be
    /// reconsidered if observed again. Persistence runs after every resolve
    /// attempt, whether or not the merge changed anything.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> CycleOutcome {
        let Some(observation) = self.queue.dequeue() else {
            return CycleOutcome::Idle;
        };

        debug!(
            name = %observation.name,
            world = %observation.world,
            pending = self.queue.len(),
            "resolving sighting"
        );

        let stable_id = tokio::select! {
            () = cancel.cancelled() => return CycleOutcome::Cancelled,
            id = self.client.resolve(&observation.name, &observation.world) => id,
        };

        let changed = self
            .cache
            .write()
            .merge(stable_id, &observation.name, &observation.world);

        if stable_id.is_unresolved() {
            debug!(
                name = %observation.name,
                world = %observation.world,
                "sighting dropped (unresolved)"
            );
        } else {
            debug!(stable_id = %stable_id, changed, "sighting merged");
        }

        self.persist();

        CycleOutcome::Completed { stable_id, changed }
    }

    /// Write the current cache state to the store, logging failures.
    ///
    /// A failed persist is not retried here; the full state is rewritten on
    /// the next cycle anyway.
    fn persist(&self) {
        let cache = self.cache.read();
        if let Err(e) = self.store.persist(&cache) {
            warn!(error = %e, "cache persist failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Loop wired to a unique temp store and a connection-refused client.
    fn test_loop(tag: &str, queue: ObservationQueue) -> ResolutionLoop {
        let unique = format!(
            "retrace_loop_{tag}_{}_{:?}.json",
            std::process::id(),
            std::thread::current().id(),
        );
        let store = CacheStore::new(std::env::temp_dir().join(unique));

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let client = SearchClient::new(
            &format!("http://127.0.0.1:{port}"),
            Duration::from_millis(500),
        );

        ResolutionLoop::new(
            queue,
            Arc::new(RwLock::new(AliasCache::new())),
            store,
            client,
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn empty_queue_cycle_does_nothing() {
        let worker = test_loop("idle", ObservationQueue::new());
        let cancel = CancellationToken::new();

        assert_eq!(worker.run_cycle(&cancel).await, CycleOutcome::Idle);
        assert!(worker.cache.read().is_empty());
        // No resolve attempt, so nothing was persisted either.
        assert!(!worker.store.path().exists());
    }

    #[tokio::test]
    async fn failed_resolution_drops_the_sighting() {
        let queue = ObservationQueue::new();
        assert!(queue.enqueue("Foo Bar", "Gilgamesh"));
        let worker = test_loop("dropped", queue.clone());
        let cancel = CancellationToken::new();

        let outcome = worker.run_cycle(&cancel).await;
        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                stable_id: StableId::UNRESOLVED,
                changed: false,
            }
        );

        // Dropped, not requeued; the cache is unchanged.
        assert!(queue.is_empty());
        assert!(worker.cache.read().is_empty());
        // Persistence ran after the resolve attempt regardless.
        assert!(worker.store.path().exists());

        std::fs::remove_file(worker.store.path()).unwrap();
    }

    #[tokio::test]
    async fn run_exits_promptly_when_cancelled() {
        let worker = test_loop("cancel", ObservationQueue::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let finished =
            tokio::time::timeout(Duration::from_secs(1), worker.run(cancel)).await;
        assert!(finished.is_ok(), "cancelled loop should exit promptly");

        // The shutdown persist wrote the (empty) state.
        assert!(worker.store.path().exists());
        std::fs::remove_file(worker.store.path()).unwrap();
    }

    #[tokio::test]
    async fn merge_outcome_reflects_cache_change() {
        // Merge path exercised directly: the cache behind the loop is the
        // same handle the loop writes through.
        let worker = test_loop("merge", ObservationQueue::new());
        let changed = worker.cache.write().merge(StableId(42), "Foo Bar", "Gilgamesh");
        assert!(changed);
        assert_eq!(worker.cache.read().len(), 1);
    }
}
