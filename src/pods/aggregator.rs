//! Log Aggregator
//!
//! Collects pod log summaries into an expiring cache owned by the caller, so
//! the same cache can be shared with the sweep and invalidation tasks.

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheStats, Clock, ExpiringCache};
use crate::pods::{pod_key, PodApi, PodLogSummary};

/// Aggregator counters plus a snapshot of its cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatorMetrics {
    pub cache: CacheStats,
    /// Summaries produced across all `aggregate` calls
    pub total_processed: u64,
    /// Deletion notices that removed a cached summary
    pub deletions_handled: u64,
}

// == Log Aggregator ==
/// Keeps the latest log summary of each pod, bounded by the capacity and age
/// limits of the cache it writes to.
#[derive(Debug, Default)]
pub struct LogAggregator {
    total_processed: u64,
    deletions_handled: u64,
}

impl LogAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    // == Aggregate ==
    /// Summarizes the log of every pod in `namespace` and caches the results.
    ///
    /// Only counts are kept; the log text and pod handles are dropped before
    /// this returns.
    pub fn aggregate<A: PodApi, C: Clock>(
        &mut self,
        cache: &mut ExpiringCache<PodLogSummary, C>,
        api: &A,
        namespace: &str,
    ) -> Vec<PodLogSummary> {
        let pods = api.list_pods(namespace);
        let mut results = Vec::with_capacity(pods.len());

        for pod in pods {
            let log = api.read_log(&pod.namespace, &pod.name);
            let summary = PodLogSummary::from_log(&pod.namespace, &pod.name, &log);
            debug!(
                pod = %summary.key(),
                lines = summary.log_lines,
                errors = summary.error_count,
                "Summarized pod log"
            );
            cache.put(summary.key(), summary.clone());
            results.push(summary);
        }

        self.total_processed += results.len() as u64;
        info!(
            namespace = %namespace,
            pods = results.len(),
            cached = cache.len(),
            "Aggregated pod logs"
        );
        results
    }

    // == Handle Pod Deletion ==
    /// Forgets a pod that no longer exists.
    pub fn handle_pod_deletion<C: Clock>(
        &mut self,
        cache: &mut ExpiringCache<PodLogSummary, C>,
        namespace: &str,
        pod_name: &str,
    ) -> bool {
        let removed = cache.delete(&pod_key(namespace, pod_name));
        if removed {
            self.deletions_handled += 1;
        }
        removed
    }

    /// Credits deletions that another task already applied to the cache.
    pub fn record_deletions(&mut self, count: usize) {
        self.deletions_handled += count as u64;
    }

    /// Returns the cached summary of one pod, if still fresh.
    pub fn summary<C: Clock>(
        cache: &mut ExpiringCache<PodLogSummary, C>,
        namespace: &str,
        pod_name: &str,
    ) -> Option<PodLogSummary> {
        cache.get(&pod_key(namespace, pod_name))
    }

    pub fn metrics<C: Clock>(&self, cache: &ExpiringCache<PodLogSummary, C>) -> AggregatorMetrics {
        AggregatorMetrics {
            cache: cache.get_stats(),
            total_processed: self.total_processed,
            deletions_handled: self.deletions_handled,
        }
    }
}
