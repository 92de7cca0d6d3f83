//! Pod Log Summary
//!
//! The plain-data record the aggregator keeps instead of full logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache key for a pod: `"{namespace}/{name}"`.
pub fn pod_key(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

/// Lightweight log metadata for one pod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodLogSummary {
    pub pod_name: String,
    pub namespace: String,
    /// Number of newline-terminated lines in the log
    pub log_lines: usize,
    /// Case-insensitive occurrences of "error"
    pub error_count: usize,
    pub observed_at: DateTime<Utc>,
}

impl PodLogSummary {
    /// Extracts counts from `log` and discards the text.
    pub fn from_log(namespace: &str, pod_name: &str, log: &str) -> Self {
        Self {
            pod_name: pod_name.to_string(),
            namespace: namespace.to_string(),
            log_lines: log.matches('\n').count(),
            error_count: log.to_lowercase().matches("error").count(),
            observed_at: Utc::now(),
        }
    }

    /// Cache key this summary is stored under.
    pub fn key(&self) -> String {
        pod_key(&self.namespace, &self.pod_name)
    }
}
