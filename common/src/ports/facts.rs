use std::path::PathBuf;

use thiserror::Error;

use crate::topology::layer::Layer;
use crate::topology::record::AdjacencyRecord;
use crate::topology::table::Table;

#[derive(Debug, Error)]
pub enum FactError {
    #[error("could not read fact snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fact snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("table '{table}' is malformed: {reason}")]
    Shape { table: String, reason: String },
}

/// Supplies adjacency records for each layer, pulled on demand.
pub trait FactSource {
    /// Returns every adjacency record of `layer`, in source order.
    ///
    /// A layer without adjacencies yields an empty vector, not an error.
    fn fetch(&self, layer: Layer) -> Result<Vec<AdjacencyRecord>, FactError>;

    /// Returns every named table the source holds, for the analysis report.
    fn tables(&self) -> Result<Vec<Table>, FactError>;

    fn fetch_ospf_adjacencies(&self) -> Result<Vec<AdjacencyRecord>, FactError> {
        self.fetch(Layer::Ospf)
    }

    fn fetch_bgp_adjacencies(&self) -> Result<Vec<AdjacencyRecord>, FactError> {
        self.fetch(Layer::Bgp)
    }

    fn fetch_l3_adjacencies(&self) -> Result<Vec<AdjacencyRecord>, FactError> {
        self.fetch(Layer::L3)
    }
}
