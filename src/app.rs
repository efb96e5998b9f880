//! Binary plumbing: CLI arguments and logging.

pub mod cli;
pub mod logging;
