//! Expiring LRU demo host
//!
//! Simulates pod churn against an in-memory pod API while a shared cache of
//! pod log summaries stays bounded.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expiring_lru::pods::{pod_key, InMemoryPodApi, LogAggregator, PodLogSummary};
use expiring_lru::{
    share, spawn_invalidation_task, spawn_sweep_task, Config, ExpiringCache, SharedCache,
};

const NAMESPACE: &str = "production";

/// Main entry point for the demo host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the shared cache
/// 4. Start the expiry sweep and invalidation tasks
/// 5. Run the churn simulation until done or Ctrl+C/SIGTERM
/// 6. Stop the tasks and print final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expiring_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Expiring LRU demo host");

    let config = Config::from_env();
    config.validate().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: max_size={}, ttl={}s, sweep_interval={}s, iterations={}, pods_per_iteration={}",
        config.max_size,
        config.ttl_seconds,
        config.sweep_interval_secs,
        config.sim_iterations,
        config.pods_per_iteration
    );

    let cache = share(ExpiringCache::<PodLogSummary>::from_config(&config)?);

    let sweep_interval = Duration::from_secs(config.sweep_interval_secs.max(1));
    let sweeper = spawn_sweep_task(cache.clone(), sweep_interval);

    let (tx, rx) = mpsc::channel(256);
    let invalidator = spawn_invalidation_task(cache.clone(), rx);

    let mut aggregator = LogAggregator::new();

    tokio::select! {
        result = simulate(&config, &cache, &mut aggregator, tx) => result?,
        _ = shutdown_signal() => warn!("Simulation interrupted"),
    }

    sweeper.abort();
    warn!("Expiry sweep task aborted");

    // The sender went away with the simulation, so the task drains and ends
    let invalidated = invalidator.await.context("invalidation task panicked")?;
    aggregator.record_deletions(invalidated);

    let metrics = aggregator.metrics(&*cache.lock().await);
    info!(invalidated, "Demo host shutdown complete");
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    Ok(())
}

/// Creates pods every round, caches a summary of each pod's log, and deletes
/// half of the previous round's pods, announcing each deletion on `tx`.
async fn simulate(
    config: &Config,
    cache: &SharedCache<PodLogSummary>,
    aggregator: &mut LogAggregator,
    tx: mpsc::Sender<String>,
) -> anyhow::Result<()> {
    let mut api = InMemoryPodApi::new();

    for i in 0..config.sim_iterations {
        for j in 0..config.pods_per_iteration {
            api.create_pod(NAMESPACE, &format!("pod-{}-{}", i, j));
        }

        aggregator.aggregate(&mut *cache.lock().await, &api, NAMESPACE);

        if i > 0 {
            for j in 0..config.pods_per_iteration / 2 {
                let name = format!("pod-{}-{}", i - 1, j);
                if api.delete_pod(NAMESPACE, &name) {
                    tx.send(pod_key(NAMESPACE, &name))
                        .await
                        .context("invalidation channel closed")?;
                }
            }
        }

        if i % 10 == 0 {
            let metrics = aggregator.metrics(&*cache.lock().await);
            info!(
                iteration = i,
                running_pods = api.len(),
                stats = %serde_json::to_string(&metrics.cache)?,
                "Cache stats"
            );
        }

        tokio::task::yield_now().await;
    }

    let metrics = aggregator.metrics(&*cache.lock().await);
    info!(total_processed = metrics.total_processed, "Simulation finished");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
