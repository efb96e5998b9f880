//! RAID array data model and state normalization.

pub mod state;
pub mod types;

pub use state::{normalize, RaidState, StateFlags};
pub use types::{Device, RaidArray};
