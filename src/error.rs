//! Collection error taxonomy.
//! Every variant is terminal for the current tick; nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("error retrieving RAID info: {0}")]
    Execution(String),

    #[error("empty response")]
    EmptyResponse,

    #[error("error decoding RAID info: {0}")]
    Decode(String),

    #[error("no RAID configurations found")]
    NoArraysFound,

    #[error("unrecognized state '{state}' reported for RAID '{raid}'")]
    UnrecognizedState { raid: String, state: String },

    #[error("no metrics collected")]
    NoMetrics,
}

/// A state label outside the canonical set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized state '{0}'")]
pub struct UnrecognizedState(pub String);

/// Chart collection errors. Registration failures are logged, never propagated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("duplicate chart id '{0}'")]
    Duplicate(String),
}
