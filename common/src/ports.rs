//! # Ports
//!
//! Traits isolating the topology builder from the outside world.
//!
//! * **[`facts`]**: where adjacency records come from.
//! * **[`diagram`]**: where finished graphs are drawn.
//! * **[`report`]**: where tabular results are persisted.
//!
//! Concrete implementations live in `topomap-core`'s `adapters` module.
//! All calls are blocking and expected to run to completion or fail.

pub mod diagram;
pub mod facts;
pub mod report;
