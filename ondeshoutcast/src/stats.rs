//! HTTP client for the DNAS v2 statistics endpoints.
//!
//! Two endpoints are consumed: the public `statistics` JSON document for
//! listener counts, and the admin listener table (`admin.cgi` page 3) for
//! per-client rows. The admin endpoint requires the station's admin
//! password over basic auth.
//!
//! ## Example
//!
//! ```no_run
//! use ondecore::StatsClient;
//! use ondeshoutcast::ShoutcastStatsClient;
//! use url::Url;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ShoutcastStatsClient::new()?;
//! let base = Url::parse("http://127.0.0.1:8000")?;
//! let snapshot = client.now_playing(&base, "admin_pw", 1, true).await?;
//! println!("{} listeners", snapshot.listeners.total);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use ondecore::{NowPlaying, StatsClient, StatsError};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::models::{StatisticsResponse, StreamListener};

/// Default timeout for statistics requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent header presented to the DNAS.
pub const DEFAULT_USER_AGENT: &str = "ondeshoutcast/0.1";

/// Admin username the DNAS expects for `admin.cgi`.
const ADMIN_USERNAME: &str = "admin";

// ============================================================================
// Client
// ============================================================================

/// Client for one or more DNAS servers.
///
/// The client itself is station-agnostic; the target server and
/// credentials are passed per call, so one instance serves every local
/// frontend process.
#[derive(Debug, Clone)]
pub struct ShoutcastStatsClient {
    client: reqwest::Client,
}

impl ShoutcastStatsClient {
    /// Creates a client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a builder for custom settings.
    pub fn builder() -> ShoutcastStatsClientBuilder {
        ShoutcastStatsClientBuilder::default()
    }

    /// Wraps an already-configured `reqwest` client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetches the statistics document, scoped to one stream id.
    async fn fetch_statistics(&self, base_url: &Url, sid: u32) -> Result<StatisticsResponse> {
        let mut url = base_url.join("statistics")?;
        url.query_pairs_mut()
            .append_pair("json", "1")
            .append_pair("sid", &sid.to_string());

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Fetches the listener table of one stream from the admin interface.
    async fn fetch_listeners(
        &self,
        base_url: &Url,
        admin_password: &str,
        sid: u32,
    ) -> Result<Vec<StreamListener>> {
        let mut url = base_url.join("admin.cgi")?;
        url.query_pairs_mut()
            .append_pair("sid", &sid.to_string())
            .append_pair("mode", "viewjson")
            .append_pair("page", "3");

        let response = self
            .client
            .get(url)
            .basic_auth(ADMIN_USERNAME, Some(admin_password))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl StatsClient for ShoutcastStatsClient {
    async fn now_playing(
        &self,
        base_url: &Url,
        admin_password: &str,
        stream_index: u32,
        include_clients: bool,
    ) -> std::result::Result<NowPlaying, StatsError> {
        let statistics = self.fetch_statistics(base_url, stream_index).await?;

        let Some(stream) = statistics.stream(stream_index) else {
            // Server reachable but no block for this stream id.
            debug!(stream_index, "stream id not present in statistics payload");
            return Ok(NowPlaying::blank());
        };
        let listeners = stream.listeners();

        let clients = if include_clients {
            self.fetch_listeners(base_url, admin_password, stream_index)
                .await?
                .into_iter()
                .map(StreamListener::into_stream_client)
                .collect()
        } else {
            Vec::new()
        };

        Ok(NowPlaying { listeners, clients })
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ShoutcastStatsClient`].
#[derive(Debug, Clone)]
pub struct ShoutcastStatsClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for ShoutcastStatsClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ShoutcastStatsClientBuilder {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<ShoutcastStatsClient> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;
        Ok(ShoutcastStatsClient { client })
    }
}

// ============================================================================
// Tests
// ============================================================================
