//! # Topology Builder
//!
//! Turns one layer's adjacency records into a finished [`LayerGraph`].
//!
//! Records are consumed in source order and that order becomes the node and
//! link insertion order; nothing is re-sorted. The first record that fails
//! normalization or insertion stops the layer. Nodes and links inserted
//! before the failure are not rolled back, the caller discards the graph.

use thiserror::Error;
use tracing::{debug, info};
use topomap_common::notice;
use topomap_common::ports::facts::{FactError, FactSource};
use topomap_common::topology::layer::Layer;
use topomap_common::topology::record::AdjacencyRecord;

use crate::graph::{GraphError, LayerGraph};
use crate::schema::{self, Adjacency, LayerSchema, NormalizeError};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Malformed(#[from] NormalizeError),
    #[error("{layer} record '{key}': {source}")]
    Graph {
        layer: Layer,
        key: String,
        #[source]
        source: GraphError,
    },
    #[error("{layer} layer already failed and accepts no more records")]
    AlreadyFailed { layer: Layer },
    #[error("could not fetch {layer} adjacencies: {source}")]
    Fetch {
        layer: Layer,
        #[source]
        source: FactError,
    },
}

/// Lifecycle of one layer's build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    Empty,
    Building,
    Complete,
    Failed,
}

/// Counters gathered while building a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub nodes: usize,
    pub links: usize,
    pub duplicate_links: usize,
}

pub struct TopologyBuilder {
    schema: &'static dyn LayerSchema,
    state: LayerState,
    graph: LayerGraph,
    stats: BuildStats,
}

impl TopologyBuilder {
    pub fn new(layer: Layer) -> Self {
        Self {
            schema: schema::schema_for(layer),
            state: LayerState::Empty,
            graph: LayerGraph::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.schema.layer()
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Normalizes `record` and inserts its endpoints and link.
    ///
    /// A failure leaves the builder `Failed` for good: later records are
    /// refused and the partial graph can no longer be sealed.
    pub fn ingest(&mut self, record: &AdjacencyRecord) -> Result<(), BuildError> {
        if self.state == LayerState::Failed {
            return Err(self.already_failed());
        }
        self.state = LayerState::Building;
        self.stats.records += 1;

        match self.insert(record) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state = LayerState::Failed;
                Err(e)
            }
        }
    }

    fn insert(&mut self, record: &AdjacencyRecord) -> Result<(), BuildError> {
        let Adjacency {
            local,
            remote,
            label,
        } = self.schema.normalize(record)?;

        let graph_error = |source: GraphError| BuildError::Graph {
            layer: self.schema.layer(),
            key: record.key().to_owned(),
            source,
        };

        for id in [&local, &remote] {
            if self.graph.add_node(id).map_err(graph_error)? {
                self.stats.nodes += 1;
            }
        }

        if self
            .graph
            .add_link(&local, &remote, label)
            .map_err(graph_error)?
        {
            self.stats.links += 1;
        } else {
            self.stats.duplicate_links += 1;
            debug!(layer = %self.layer(), record = record.key(), "link already mapped");
        }
        Ok(())
    }

    /// Seals the layer and hands over its `Complete` graph.
    pub fn finish(self) -> Result<(LayerGraph, BuildStats), BuildError> {
        match self.state {
            LayerState::Failed => Err(self.already_failed()),
            _ => Ok((self.graph, self.stats)),
        }
    }

    fn already_failed(&self) -> BuildError {
        BuildError::AlreadyFailed {
            layer: self.layer(),
        }
    }
}

/// Builds one layer's graph from its complete record sequence.
///
/// An empty sequence is valid and yields an empty graph.
pub fn build_layer(
    layer: Layer,
    records: &[AdjacencyRecord],
) -> Result<(LayerGraph, BuildStats), BuildError> {
    let mut builder = TopologyBuilder::new(layer);

    if records.is_empty() {
        notice!(layer = %layer, "No {layer} adjacencies found");
        return builder.finish();
    }

    for record in records {
        builder.ingest(record)?;
    }

    let (graph, stats) = builder.finish()?;
    info!(
        layer = %layer,
        records = stats.records,
        nodes = stats.nodes,
        links = stats.links,
        duplicate_links = stats.duplicate_links,
        "Built {layer} graph"
    );
    Ok((graph, stats))
}

/// Pulls `layer` from `facts` and builds it.
pub fn fetch_and_build(
    facts: &dyn FactSource,
    layer: Layer,
) -> Result<(LayerGraph, BuildStats), BuildError> {
    let records: Vec<AdjacencyRecord> = facts
        .fetch(layer)
        .map_err(|source| BuildError::Fetch { layer, source })?;
    build_layer(layer, &records)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
