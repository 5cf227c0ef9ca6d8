//! # Topomap Core
//!
//! Turns per-layer adjacency facts into deduplicated topology graphs and
//! hands them to a diagram sink.
//!
//! ## Pipeline
//! fact source → [`schema`] (normalize) → [`builder`] (dedup + insert into a
//! [`graph::LayerGraph`]) → [`export`] → diagram sink.
//!
//! ## Modules
//! * **[`graph`]**: the per-layer node/link model and its dedup invariants.
//! * **[`schema`]**: one normalization strategy per layer.
//! * **[`builder`]**: drives a layer's records through normalization and insertion.
//! * **[`export`]**: replays finished graphs into a diagram sink.
//! * **[`mapping`]** / **[`report`]**: the use cases run by the CLI.
//! * **[`adapters`]**: JSON snapshot facts, draw.io diagrams, xlsx and JSON workbooks.

pub mod adapters;
pub mod builder;
pub mod export;
pub mod graph;
pub mod mapping;
pub mod report;
pub mod schema;
