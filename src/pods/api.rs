//! Pod API
//!
//! The slice of a cluster API the aggregator needs, plus an in-memory
//! implementation used by the demo binary and tests.

use std::fmt::Write;

/// Identity of a running pod.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
}

/// Pod listing and log access.
pub trait PodApi {
    /// Lists pods currently running in `namespace`.
    fn list_pods(&self, namespace: &str) -> Vec<Pod>;

    /// Reads the full log of one pod.
    fn read_log(&self, namespace: &str, name: &str) -> String;
}

/// Lines in every synthesized log.
const LOG_LINES: usize = 100;
/// Every n-th synthesized line is an error.
const ERROR_EVERY: usize = 10;

// == In-Memory Pod API ==
/// Pods kept in creation order, with logs generated on demand.
#[derive(Debug, Default)]
pub struct InMemoryPodApi {
    pods: Vec<Pod>,
}

impl InMemoryPodApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a pod. Creating an existing pod again is a no-op.
    pub fn create_pod(&mut self, namespace: &str, name: &str) -> Pod {
        let pod = Pod {
            name: name.to_string(),
            namespace: namespace.to_string(),
        };
        if !self.pods.contains(&pod) {
            self.pods.push(pod.clone());
        }
        pod
    }

    /// Stops a pod, returning whether it was running.
    pub fn delete_pod(&mut self, namespace: &str, name: &str) -> bool {
        let before = self.pods.len();
        self.pods
            .retain(|p| !(p.namespace == namespace && p.name == name));
        self.pods.len() != before
    }

    /// Total pods across all namespaces.
    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

impl PodApi for InMemoryPodApi {
    fn list_pods(&self, namespace: &str) -> Vec<Pod> {
        self.pods
            .iter()
            .filter(|p| p.namespace == namespace)
            .cloned()
            .collect()
    }

    fn read_log(&self, namespace: &str, name: &str) -> String {
        let mut log = String::new();
        for line in 1..=LOG_LINES {
            let level = if line % ERROR_EVERY == 0 { "ERROR" } else { "INFO" };
            // Writing to a String cannot fail
            let _ = writeln!(log, "{} line {} from {}/{}", level, line, namespace, name);
        }
        log
    }
}
