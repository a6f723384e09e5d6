//! CLI command implementations

pub mod clean;
pub mod freeze;
pub mod list;
