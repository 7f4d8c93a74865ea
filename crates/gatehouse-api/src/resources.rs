// Typed resources returned by the door controller
//
// Every resource embeds a `links` array (see [`crate::links`]) and keeps
// a catch-all map for undocumented fields, because controller firmware
// revisions are inconsistent about field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::links::{Linked, Links};

/// Door state strings the controller is known to report. Anything else
/// is treated as transitional.
const STATE_OPENED: &str = "opened";
const STATE_CLOSED: &str = "closed";

macro_rules! impl_linked {
    ($($ty:ty),+ $(,)?) => {
        $(impl Linked for $ty {
            fn links(&self) -> &Links {
                &self.links
            }
        })+
    };
}

// ── Root & entrypoint ────────────────────────────────────────────────

/// The API root resource. Its only job is to declare the `doors`
/// relation pointing at the [`Entrypoint`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRoot {
    #[serde(default)]
    pub links: Links,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The doors entrypoint, discovered by following the root's `doors`
/// link. Declares `state`, `operate`, `open`, `close`, `stats`, `logs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entrypoint {
    #[serde(default)]
    pub links: Links,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Door state ───────────────────────────────────────────────────────

/// A point-in-time door state report.
///
/// `state` is `"opened"`, `"closed"`, or a transitional value
/// (`"opening"`, `"closing"`, `"unknown"`, ...). Only settled states
/// are retained as the last known state by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorState {
    pub state: String,
    #[serde(default)]
    pub links: Links,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DoorState {
    pub fn is_opened(&self) -> bool {
        self.state.eq_ignore_ascii_case(STATE_OPENED)
    }

    pub fn is_closed(&self) -> bool {
        self.state.eq_ignore_ascii_case(STATE_CLOSED)
    }

    /// A settled state is definitively opened or closed; everything
    /// else is in motion or unknown.
    pub fn is_settled(&self) -> bool {
        self.is_opened() || self.is_closed()
    }
}

// ── Actions ──────────────────────────────────────────────────────────

/// Payload returned by the open/close triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorAction {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub links: Links,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Statistics ───────────────────────────────────────────────────────

/// Aggregated timing for one direction of travel (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Immutable statistics snapshot for the door.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorStatistics {
    /// When the current measurement window started.
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    pub opening: StatsEntry,
    pub closing: StatsEntry,
    #[serde(default)]
    pub links: Links,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Logs ─────────────────────────────────────────────────────────────

/// One operation log record, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub action: String,
    pub timestamp: String,
}

/// A page of operation logs, newest-first in server order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logs {
    #[serde(rename = "logs", default)]
    pub entries: Vec<LogEntry>,
    #[serde(default)]
    pub links: Links,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl_linked!(ApiRoot, Entrypoint, DoorState, DoorAction, DoorStatistics, Logs);
