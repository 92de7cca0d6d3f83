//! Invalidation Task
//!
//! Applies external deletion notices to a shared cache.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Clock;
use crate::tasks::SharedCache;

/// Spawns a task that deletes every key received on `rx`.
///
/// Keys that are not cached are ignored. The task ends once every sender has
/// been dropped and resolves to the number of entries it actually removed.
pub fn spawn_invalidation_task<V, C>(
    cache: SharedCache<V, C>,
    mut rx: mpsc::Receiver<String>,
) -> JoinHandle<usize>
where
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        let mut removed = 0;

        while let Some(key) = rx.recv().await {
            let deleted = cache.lock().await.delete(&key);
            if deleted {
                removed += 1;
                debug!(key = %key, "Invalidated cache entry");
            }
        }

        info!("Invalidation channel closed after removing {} entries", removed);
        removed
    })
}
