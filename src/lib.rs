//! NVMe RAID collector.
//!
//! Queries `ndsudo nvme_raid-show` once per tick, decodes the per-array JSON
//! document, and turns each array's reported states into 14 boolean series
//! (`raid_<name>_state_<state>`), registering one state chart per new array.

pub mod app;
pub mod charts;
pub mod collector;
pub mod config;
pub mod error;
pub mod raid;
pub mod system;

pub use collector::{Metrics, RaidCollector};
pub use error::CollectError;
