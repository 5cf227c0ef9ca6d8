//! # Topomap Common
//!
//! Types shared by every crate in the workspace.
//!
//! * **[`topology`]**: layers, adjacency records, node identifiers and tables.
//! * **[`ports`]**: the traits implemented by fact sources, diagram sinks and report sinks.
//! * **[`config`]**: run configuration assembled by the CLI.

pub mod config;
pub mod log;
pub mod ports;
pub mod topology;
