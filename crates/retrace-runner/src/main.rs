//! Runner entry point for the Retrace alias tracker.
//!
//! Wires the observation queue, the search client, and the alias cache
//! together, then drives the single resolution loop until shutdown.
//!
//! # Architecture
//!
//! ```text
//! sightings --> ObservationQueue --> ResolutionLoop --> SearchClient
//!                                          |
//!                                     AliasCache --> CacheStore (gzip blob)
//! ```
//!
//! Queries read the cache directly and never touch the queue or the
//! resolver. The console reads stdin as a stand-in for the host
//! environment's event sources and command interface.

mod commands;
mod config;
mod error;
mod queue;
mod resolution;
mod sightings;

use std::sync::Arc;

use parking_lot::RwLock;
use retrace_cache::{AliasCache, CacheStore};
use retrace_resolver::SearchClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::CommandAction;
use crate::config::RunnerConfig;
use crate::queue::ObservationQueue;
use crate::resolution::ResolutionLoop;
use crate::sightings::SightingSink;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// loads the persisted cache, spawns the resolution loop, and serves the
/// console until EOF, `quit`, or ctrl-c.
///
/// # Errors
///
/// Returns an error if initialization fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("retrace-runner starting");

    // Load configuration from environment
    let config = RunnerConfig::from_env()?;
    info!(
        search_api_url = config.search_api_url,
        cache_path = %config.cache_path.display(),
        poll_interval_ms = config.poll_interval.as_millis(),
        request_timeout_ms = config.request_timeout.as_millis(),
        "configuration loaded"
    );

    // Load the persisted cache (absent or corrupt state starts empty)
    let store = CacheStore::new(config.cache_path.clone());
    let cache = Arc::new(RwLock::new(store.load()));
    info!(records = cache.read().len(), "alias cache ready");

    let queue = ObservationQueue::new();
    let sink = SightingSink::new(queue.clone());
    let client = SearchClient::new(&config.search_api_url, config.request_timeout);

    let worker = ResolutionLoop::new(
        queue,
        Arc::clone(&cache),
        store,
        client,
        config.poll_interval,
    );

    let cancel = CancellationToken::new();
    let loop_task = {
        let cancel = cancel.clone();
        tokio::spawn(async move { worker.run(cancel).await })
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("ctrl-c received"),
        () = run_console(&sink, &cache) => info!("console closed"),
    }

    // Cooperative shutdown: the loop persists once more and exits.
    cancel.cancel();
    loop_task.await?;

    Ok(())
}

/// Read stdin lines and dispatch them as commands until EOF or `quit`.
async fn run_console(sink: &SightingSink, cache: &Arc<RwLock<AliasCache>>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match commands::dispatch(&line, sink, cache) {
            CommandAction::Reply(reply) => println!("{reply}"),
            CommandAction::Quit => break,
        }
    }
}
