//! CLI library components for tbridge.

pub mod logging;
pub mod output;
