//! # cv-store
//!
//! Snapshot persistence for the Canvass outreach planner.
//!
//! Every collection the planner owns (voter segments, outreach campaigns,
//! touch goals) is persisted as one complete snapshot under a string key.
//! There are no partial updates and no transactions: the collection is read
//! once when a store opens and rewritten whole after each mutation,
//! last writer wins.
//!
//! ## Key components
//!
//! - [`KeyValueStore`] — the persistence trait the engine depends on
//! - [`JsonFileStore`] — one JSON file per key under a data directory
//! - [`MemoryStore`] — in-process backend for tests and embedders
//! - [`PlannerConfig`] — standard `.canvass/` data directory layout

pub mod config;
pub mod error;
pub mod kv;

pub use config::PlannerConfig;
pub use error::StoreError;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

/// Persisted snapshot key for the voter segment collection.
pub const SEGMENTS_KEY: &str = "voterSegments";

/// Persisted snapshot key for the outreach campaign collection.
pub const CAMPAIGNS_KEY: &str = "campaigns";

/// Persisted snapshot key for the per-segment touch goal map.
pub const TOUCH_GOALS_KEY: &str = "touchGoals";
