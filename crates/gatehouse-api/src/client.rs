// Door controller HTTP client
//
// Wraps `reqwest::Client` with the fixed capability set the controller
// exposes. Except for the root resource, every call targets an absolute
// URL taken from a hypermedia link -- this client never constructs
// resource paths itself.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::resources::{ApiRoot, DoorAction, DoorState, DoorStatistics, Entrypoint, Logs};
use crate::transport::TransportConfig;

/// Raw HTTP client for the door controller's hypermedia API.
///
/// A transport failure and a server-reported error body are distinct
/// outcomes: the former surfaces as [`Error::Transport`], the latter as
/// [`Error::Remote`] carrying the body text.
pub struct DoorApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DoorApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root (e.g. `http://doors.local:8080`);
    /// the root resource is fetched from it verbatim.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this in tests or when the caller already configured transport
    /// concerns on a shared client.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Capability set ───────────────────────────────────────────────

    /// Fetch the API root resource from the configured base URL.
    pub async fn fetch_root(&self) -> Result<ApiRoot, Error> {
        self.get(self.base_url.clone()).await
    }

    /// Fetch the doors entrypoint at a link-derived URL.
    pub async fn fetch_entrypoint(&self, url: &str) -> Result<Entrypoint, Error> {
        self.get(Url::parse(url)?).await
    }

    /// Fetch the current door state.
    pub async fn fetch_state(&self, url: &str) -> Result<DoorState, Error> {
        self.get(Url::parse(url)?).await
    }

    /// Fetch the statistics snapshot.
    pub async fn fetch_statistics(&self, url: &str) -> Result<DoorStatistics, Error> {
        self.get(Url::parse(url)?).await
    }

    /// Fetch a page of operation logs.
    ///
    /// `page_size` and `start_index` are passed through unmodified as
    /// query parameters when present.
    pub async fn fetch_logs(
        &self,
        url: &str,
        page_size: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Logs, Error> {
        let mut url = Url::parse(url)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(size) = page_size {
                query.append_pair("pageSize", &size.to_string());
            }
            if let Some(index) = start_index {
                query.append_pair("startIndex", &index.to_string());
            }
        }
        self.get(url).await
    }

    /// Trigger the toggle operation (open if closed, close if opened).
    pub async fn operate(&self, url: &str) -> Result<(), Error> {
        self.put_unit(Url::parse(url)?).await
    }

    /// Trigger an open, returning the action the controller started.
    pub async fn open(&self, url: &str) -> Result<DoorAction, Error> {
        self.put(Url::parse(url)?).await
    }

    /// Trigger a close, returning the action the controller started.
    pub async fn close(&self, url: &str) -> Result<DoorAction, Error> {
        self.put(Url::parse(url)?).await
    }

    /// Reset the statistics counters.
    pub async fn reset_statistics(&self, url: &str) -> Result<(), Error> {
        self.delete_unit(Url::parse(url)?).await
    }

    /// Reset the open-cycle counter only.
    pub async fn reset_open_counter(&self, url: &str) -> Result<(), Error> {
        self.put_unit(Url::parse(url)?).await
    }

    /// Reset the close-cycle counter only.
    pub async fn reset_close_counter(&self, url: &str) -> Result<(), Error> {
        self.put_unit(Url::parse(url)?).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a PUT request and decode the JSON body.
    async fn put<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("PUT {}", url);

        let resp = self.http.put(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a PUT request, expecting no meaningful body.
    async fn put_unit(&self, url: Url) -> Result<(), Error> {
        debug!("PUT {}", url);

        let resp = self.http.put(url).send().await.map_err(Error::Transport)?;
        Self::check_status(resp).await.map(drop)
    }

    /// Send a DELETE request, expecting no meaningful body.
    async fn delete_unit(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::check_status(resp).await.map(drop)
    }

    /// Reject non-2xx responses, converting the error body to
    /// [`Error::Remote`]. Returns the response untouched on success.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::Remote {
            status: status.as_u16(),
            body,
        })
    }

    /// Check status, then decode the JSON body.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
