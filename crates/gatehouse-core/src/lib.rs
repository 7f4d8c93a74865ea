// gatehouse-core: Orchestration layer between gatehouse-api and consumers.
//
// Owns the three things with real invariants: the entrypoint cache
// (one discovery at a time, coherent across tasks), the request
// orchestrator (every operation resolves its link from the cached
// entrypoint and completes exactly once), and the state poller
// (stopped/running lifecycle with end-of-cycle rescheduling).

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod poller;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::EntrypointCache;
pub use config::{AuthCredentials, ControllerConfig, TlsVerification};
pub use controller::DoorController;
pub use error::CoreError;
pub use poller::StatePoller;

// Re-export the resource types consumers handle.
pub use gatehouse_api::{
    DoorAction, DoorState, DoorStatistics, Entrypoint, Link, Linked, LogEntry, Logs, StatsEntry,
};
