//! Wire models for the DNAS v2 JSON endpoints.
//!
//! Field names mirror the JSON keys the server sends, which are flat
//! lower-case words. Everything is `#[serde(default)]` tolerant because
//! DNAS omits fields freely between versions.

use ondecore::{Listeners, StreamClient};
use serde::Deserialize;

/// Top-level payload of `GET /statistics?json=1`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub totalstreams: u32,
    #[serde(default)]
    pub activestreams: u32,
    /// Per-stream blocks, one per configured stream id.
    #[serde(default)]
    pub streams: Vec<StreamStats>,
}

impl StatisticsResponse {
    /// The block for one stream id, if the server reported it.
    pub fn stream(&self, sid: u32) -> Option<&StreamStats> {
        self.streams.iter().find(|stream| stream.id == sid)
    }
}

/// Statistics for a single stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamStats {
    pub id: u32,
    #[serde(default)]
    pub currentlisteners: u32,
    #[serde(default)]
    pub peaklisteners: u32,
    #[serde(default)]
    pub uniquelisteners: u32,
    /// Non-zero while a source is connected.
    #[serde(default)]
    pub streamstatus: u8,
    #[serde(default)]
    pub songtitle: Option<String>,
    #[serde(default)]
    pub streampath: Option<String>,
}

impl StreamStats {
    /// Listener counts in the shape the rest of the suite speaks.
    pub fn listeners(&self) -> Listeners {
        Listeners {
            total: self.currentlisteners,
            unique: self.uniquelisteners,
        }
    }

    pub fn is_live(&self) -> bool {
        self.streamstatus != 0
    }
}

/// One row of the listener table (`admin.cgi?mode=viewjson&page=3`).
#[derive(Debug, Clone, Deserialize)]
pub struct StreamListener {
    #[serde(default)]
    pub uid: u64,
    #[serde(default)]
    pub hostname: String,
    /// `X-Forwarded-For` value when the listener came through a proxy.
    #[serde(default)]
    pub xff: String,
    #[serde(default)]
    pub useragent: String,
    #[serde(default)]
    pub connecttime: u64,
}

impl StreamListener {
    /// The listener's address, preferring the forwarded one.
    pub fn client_ip(&self) -> &str {
        if self.xff.is_empty() {
            &self.hostname
        } else {
            &self.xff
        }
    }

    /// Converts the row into the suite-wide client record. The mount tag
    /// is left empty; the aggregation pass fills it in.
    pub fn into_stream_client(self) -> StreamClient {
        StreamClient {
            uid: self.uid.to_string(),
            ip: self.client_ip().to_string(),
            user_agent: self.useragent,
            connected_secs: self.connecttime,
            mount: String::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
