//! # Topology Model
//!
//! The raw vocabulary of the mapper:
//!
//! * [`layer::Layer`]: one of the three analysed protocol layers.
//! * [`record::AdjacencyRecord`]: one row of fact data, as handed over by a fact source.
//! * [`node::NodeId`]: the key of a topology endpoint inside a layer graph.
//! * [`table::Table`]: a named result set, used for the analysis report.

pub mod layer;
pub mod node;
pub mod record;
pub mod table;
