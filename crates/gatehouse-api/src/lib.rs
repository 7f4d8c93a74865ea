// gatehouse-api: Async Rust client for the hypermedia door-controller API

pub mod client;
pub mod error;
pub mod links;
pub mod resources;
pub mod transport;

pub use client::DoorApiClient;
pub use error::Error;
pub use links::{Link, Linked, Links, rel};
pub use resources::{
    ApiRoot, DoorAction, DoorState, DoorStatistics, Entrypoint, LogEntry, Logs, StatsEntry,
};
