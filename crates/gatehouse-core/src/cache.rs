// ── Entrypoint cache ──
//
// Holds at most one discovered entrypoint. The compound
// check-then-fetch is exposed as a single operation that keeps the lock
// across the discovery future, so concurrent callers racing on an empty
// cache serialize and the second observes the first's result instead of
// issuing its own discovery.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use gatehouse_api::Entrypoint;

use crate::error::CoreError;

/// Shared cache for the discovered doors entrypoint.
///
/// Pure state: no operation here performs network I/O except the
/// caller-supplied discovery future inside [`get_or_fetch`](Self::get_or_fetch).
#[derive(Debug, Default)]
pub struct EntrypointCache {
    inner: Mutex<Option<Arc<Entrypoint>>>,
}

impl EntrypointCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached entrypoint, if any.
    pub async fn get(&self) -> Option<Arc<Entrypoint>> {
        self.inner.lock().await.clone()
    }

    /// Replace the cached entrypoint.
    pub async fn set(&self, entrypoint: Arc<Entrypoint>) {
        *self.inner.lock().await = Some(entrypoint);
    }

    /// Drop the cached entrypoint. Invoked on configuration change.
    ///
    /// Has no effect on in-flight requests: a discovery started before
    /// the clear may still write a now-stale entrypoint back afterwards.
    /// That race is tolerated -- the next operation against the stale
    /// entrypoint fails and triggers fresh discovery.
    pub async fn clear(&self) {
        *self.inner.lock().await = None;
    }

    /// Return the cached entrypoint, running `discover` to populate the
    /// cache first if it is empty.
    ///
    /// The lock is held across the discovery future: at most one
    /// discovery is in flight per cache, and a failed discovery leaves
    /// the cache empty (never partially populated).
    pub async fn get_or_fetch<F, Fut>(&self, discover: F) -> Result<Arc<Entrypoint>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<Entrypoint>, CoreError>>,
    {
        let mut guard = self.inner.lock().await;

        if guard.is_none() {
            debug!("entrypoint missing, discovering");
            let entrypoint = discover().await?;
            *guard = Some(entrypoint);
        }

        guard
            .clone()
            .ok_or(CoreError::InvalidState("entrypoint empty after discovery"))
    }
}
