use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::topology::node::NodeId;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("no diagram page is open")]
    NoPage,
    #[error("page '{page}' has no node '{id}'")]
    UnknownNode { page: String, id: String },
    #[error("could not write diagram: {0}")]
    Io(#[from] std::io::Error),
}

/// Vertex placement requested from a diagram sink once all pages are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAlgorithm {
    #[default]
    Circle,
    Grid,
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutAlgorithm::Circle => f.write_str("circle"),
            LayoutAlgorithm::Grid => f.write_str("grid"),
        }
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(LayoutAlgorithm::Circle),
            "grid" => Ok(LayoutAlgorithm::Grid),
            _ => Err(format!("unknown layout: {s} (expected 'circle' or 'grid')")),
        }
    }
}

/// An editable diagram document, filled page by page.
///
/// Nodes and links are added to the most recently opened page.
pub trait DiagramSink {
    fn new_page(&mut self, name: &str) -> Result<(), DiagramError>;
    fn add_node(&mut self, id: &NodeId) -> Result<(), DiagramError>;
    fn add_link(&mut self, from: &NodeId, to: &NodeId, label: &str) -> Result<(), DiagramError>;
    fn layout(&mut self, algorithm: LayoutAlgorithm) -> Result<(), DiagramError>;
    fn write(&mut self, path: &Path) -> Result<(), DiagramError>;
}
