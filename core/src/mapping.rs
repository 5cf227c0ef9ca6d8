//! # Mapping Service
//!
//! The "map the network" use case.
//!
//! Orchestrates the pipeline by:
//! 1. pulling each layer from the [`FactSource`] and building its graph;
//! 2. isolating failures, so a broken layer never blocks the others;
//! 3. replaying every completed graph into the [`DiagramSink`] and writing it.

use std::path::{Path, PathBuf};

use tracing::error;
use topomap_common::ports::diagram::{DiagramError, DiagramSink, LayoutAlgorithm};
use topomap_common::ports::facts::FactSource;
use topomap_common::success;
use topomap_common::topology::layer::Layer;

use crate::builder::{self, BuildStats, LayerState};
use crate::export;
use crate::graph::LayerGraph;

/// Result of building one layer.
#[derive(Debug, Clone)]
pub struct LayerOutcome {
    pub layer: Layer,
    pub state: LayerState,
    /// Present only when the layer completed.
    pub graph: Option<LayerGraph>,
    pub stats: BuildStats,
    pub error: Option<String>,
}

impl LayerOutcome {
    pub fn is_failed(&self) -> bool {
        self.state == LayerState::Failed
    }
}

#[derive(Debug, Clone)]
pub struct MappingSummary {
    pub layers: Vec<LayerOutcome>,
    pub pages: Vec<String>,
    /// Where the diagram was written, if any layer produced a page.
    pub diagram: Option<PathBuf>,
}

impl MappingSummary {
    pub fn failed_layers(&self) -> Vec<Layer> {
        self.layers
            .iter()
            .filter(|outcome| outcome.is_failed())
            .map(|outcome| outcome.layer)
            .collect()
    }
}

pub struct MappingService<'a> {
    facts: &'a dyn FactSource,
}

impl<'a> MappingService<'a> {
    pub fn new(facts: &'a dyn FactSource) -> Self {
        Self { facts }
    }

    /// Builds every layer, strictly in order.
    ///
    /// A failing layer is logged with its context and reported as `Failed`;
    /// its partial graph is dropped.
    pub fn build_layers(&self) -> Vec<LayerOutcome> {
        Layer::ALL
            .iter()
            .map(|&layer| self.build_layer(layer))
            .collect()
    }

    fn build_layer(&self, layer: Layer) -> LayerOutcome {
        match builder::fetch_and_build(self.facts, layer) {
            Ok((graph, stats)) => LayerOutcome {
                layer,
                state: LayerState::Complete,
                graph: Some(graph),
                stats,
                error: None,
            },
            Err(e) => {
                error!(layer = %layer, "Skipping {layer} graph: {e}");
                LayerOutcome {
                    layer,
                    state: LayerState::Failed,
                    graph: None,
                    stats: BuildStats::default(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Builds all layers and writes the completed ones to `sink` at `path`.
    pub fn run(
        &self,
        sink: &mut dyn DiagramSink,
        layout: LayoutAlgorithm,
        path: &Path,
    ) -> Result<MappingSummary, DiagramError> {
        let layers: Vec<LayerOutcome> = self.build_layers();

        let completed = layers
            .iter()
            .filter_map(|outcome| outcome.graph.as_ref().map(|graph| (outcome.layer, graph)));
        let exported = export::export_all(completed, sink, layout, path)?;

        let diagram: Option<PathBuf> = exported.written.then(|| path.to_path_buf());
        if let Some(path) = &diagram {
            success!("Network map written to {}", path.display());
        }

        Ok(MappingSummary {
            layers,
            pages: exported.pages,
            diagram,
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
