// ── Door controller orchestration ──
//
// Every operation follows the same shape: ensure a discovered
// entrypoint (fetching and caching it on a miss), resolve the
// operation's link relation, issue the transport call, and complete
// exactly once with `Ok` or `Err`. The returned future is the
// single-fire completion -- it resolves on whatever task awaits it,
// never synchronously on this layer's worker.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use gatehouse_api::transport::{TlsMode, TransportConfig};
use gatehouse_api::{
    DoorAction, DoorApiClient, DoorState, DoorStatistics, Entrypoint, Linked, Logs, rel,
};
use secrecy::SecretString;

use crate::cache::EntrypointCache;
use crate::config::{AuthCredentials, ControllerConfig, TlsVerification};
use crate::error::CoreError;

/// Default logs page requested when the caller does not specify paging.
const DEFAULT_LOGS_PAGE_SIZE: u32 = 50;
const DEFAULT_LOGS_START_INDEX: u32 = 0;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Owns the entrypoint
/// cache and the last-known settled door state; all clones share both.
#[derive(Clone)]
pub struct DoorController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    api: DoorApiClient,
    cache: EntrypointCache,
    /// Last state the controller definitively reported as opened or
    /// closed. Transitional reports never overwrite it.
    last_state: watch::Sender<Option<DoorState>>,
}

impl DoorController {
    /// Create a controller from configuration. Performs no I/O --
    /// discovery happens lazily on the first operation.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let api = DoorApiClient::new(config.url.clone(), &transport)
            .map_err(|e| CoreError::Config {
                message: format!("cannot build HTTP client: {e}"),
            })?;

        Ok(Self::from_parts(config, api))
    }

    /// Create a controller around an existing API client.
    ///
    /// Used by tests that build the client against a mock server.
    pub fn from_parts(config: ControllerConfig, api: DoorApiClient) -> Self {
        let (last_state, _) = watch::channel(None);

        Self {
            inner: Arc::new(ControllerInner {
                config,
                api,
                cache: EntrypointCache::new(),
                last_state,
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ── Entrypoint discovery ─────────────────────────────────────

    /// Return the cached entrypoint, discovering it first if absent.
    ///
    /// Discovery is the two-step fetch: root resource, then the
    /// resource behind its `doors` link. A transport failure anywhere
    /// aborts the whole operation and leaves the cache empty --
    /// discovery is never partially cached. At most one discovery is
    /// in flight at a time; concurrent callers racing on an empty
    /// cache serialize and share the winner's result.
    async fn entrypoint(&self) -> Result<Arc<Entrypoint>, CoreError> {
        let api = &self.inner.api;
        self.inner
            .cache
            .get_or_fetch(|| async {
                let root = api.fetch_root().await?;
                let doors = root
                    .link(rel::DOORS)
                    .ok_or_else(|| CoreError::missing_link(rel::DOORS))?;
                let entrypoint = api.fetch_entrypoint(&doors.href).await?;
                debug!("entrypoint discovered and cached");
                Ok(Arc::new(entrypoint))
            })
            .await
    }

    /// Drop the cached entrypoint. Call after a host or credential
    /// change; the next operation performs fresh discovery.
    pub async fn clear_cache(&self) {
        self.inner.cache.clear().await;
        debug!("entrypoint cache cleared");
    }

    /// The cached entrypoint, if discovery has already happened.
    pub async fn cached_entrypoint(&self) -> Option<Arc<Entrypoint>> {
        self.inner.cache.get().await
    }

    // ── Operations ───────────────────────────────────────────────

    /// Fetch the API root directly, bypassing the entrypoint cache.
    pub async fn root(&self) -> Result<gatehouse_api::ApiRoot, CoreError> {
        Ok(self.inner.api.fetch_root().await?)
    }

    /// Fetch the current door state.
    ///
    /// A settled report ("opened"/"closed") atomically updates the
    /// retained last-known state; transitional reports leave it
    /// untouched.
    pub async fn state(&self) -> Result<DoorState, CoreError> {
        let url = self.link_href(rel::STATE).await?;
        let state = self.inner.api.fetch_state(&url).await?;

        if state.is_settled() {
            self.inner.last_state.send_replace(Some(state.clone()));
        }

        Ok(state)
    }

    /// Fetch the statistics snapshot.
    pub async fn statistics(&self) -> Result<DoorStatistics, CoreError> {
        let url = self.link_href(rel::STATS).await?;
        Ok(self.inner.api.fetch_statistics(&url).await?)
    }

    /// Fetch a page of operation logs. Absent paging parameters default
    /// to a 50-entry page from the start.
    pub async fn logs(
        &self,
        page_size: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Logs, CoreError> {
        let page_size = page_size.unwrap_or(DEFAULT_LOGS_PAGE_SIZE);
        let start_index = start_index.unwrap_or(DEFAULT_LOGS_START_INDEX);

        let url = self.link_href(rel::LOGS).await?;
        Ok(self
            .inner
            .api
            .fetch_logs(&url, Some(page_size), Some(start_index))
            .await?)
    }

    /// Trigger the toggle operation.
    pub async fn operate(&self) -> Result<(), CoreError> {
        let url = self.link_href(rel::OPERATE).await?;
        Ok(self.inner.api.operate(&url).await?)
    }

    /// Trigger an open.
    pub async fn open(&self) -> Result<DoorAction, CoreError> {
        debug!("performing open operation");
        let url = self.link_href(rel::OPEN).await?;
        Ok(self.inner.api.open(&url).await?)
    }

    /// Trigger a close.
    pub async fn close(&self) -> Result<DoorAction, CoreError> {
        debug!("performing close operation");
        let url = self.link_href(rel::CLOSE).await?;
        Ok(self.inner.api.close(&url).await?)
    }

    /// Reset the statistics counters.
    pub async fn reset_statistics(&self) -> Result<(), CoreError> {
        let url = self.link_href(rel::STATS).await?;
        Ok(self.inner.api.reset_statistics(&url).await?)
    }

    // ── Last-known state ─────────────────────────────────────────

    /// The last settled door state observed, if any.
    pub fn last_state(&self) -> Option<DoorState> {
        self.inner.last_state.borrow().clone()
    }

    /// Subscribe to last-known-state changes. Receivers observe each
    /// settled state exactly as the poller (or a direct `state()` call)
    /// records it, on their own task.
    pub fn subscribe_state(&self) -> watch::Receiver<Option<DoorState>> {
        self.inner.last_state.subscribe()
    }

    // ── Plumbing ─────────────────────────────────────────────────

    /// Resolve a relation's URL from the (possibly freshly discovered)
    /// entrypoint.
    async fn link_href(&self, rel: &str) -> Result<String, CoreError> {
        let entrypoint = self.entrypoint().await?;
        entrypoint
            .link(rel)
            .map(|l| l.href.clone())
            .ok_or_else(|| CoreError::missing_link(rel))
    }
}

/// Build a [`TransportConfig`] from the controller configuration.
fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
        bearer_token: match &config.auth {
            AuthCredentials::Token(token) => Some(SecretString::clone(token)),
            AuthCredentials::Anonymous => None,
        },
    }
}
