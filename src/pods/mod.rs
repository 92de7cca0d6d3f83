//! Pod Logs Module
//!
//! Aggregates per-pod log summaries into a bounded, expiring cache so that a
//! long-running collector keeps flat memory under pod churn.

mod aggregator;
mod api;
mod summary;

pub use aggregator::{AggregatorMetrics, LogAggregator};
pub use api::{InMemoryPodApi, Pod, PodApi};
pub use summary::{pod_key, PodLogSummary};
