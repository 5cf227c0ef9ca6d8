//! # Layer Graph
//!
//! In-memory topology of one layer: endpoints and the undirected links
//! between them.
//!
//! Both collections are append-only and keep insertion order, which is the
//! order the export step replays them in. Membership checks go through hash
//! sets; links are keyed by [`LinkKey`], whose canonical form ignores
//! direction, so `(a, b)` and `(b, a)` are the same link.

use std::collections::HashSet;

use thiserror::Error;
use topomap_common::topology::node::NodeId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node id is empty")]
    InvalidNode,
    #[error("link endpoint '{id}' has not been added as a node")]
    UnknownEndpoint { id: String },
}

/// Order-independent key of an undirected link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    low: NodeId,
    high: NodeId,
}

impl LinkKey {
    pub fn new(a: &NodeId, b: &NodeId) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.clone(),
            high: high.clone(),
        }
    }

    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        (&self.low, &self.high)
    }
}

/// A materialized link, kept in the direction it was first observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
}

impl Link {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(&self.from, &self.to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    nodes: Vec<NodeId>,
    node_set: HashSet<NodeId>,
    links: Vec<Link>,
    link_set: HashSet<LinkKey>,
}

impl LayerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.node_set.contains(id)
    }

    /// Inserts `id` if absent. Returns `true` when the node is new.
    pub fn add_node(&mut self, id: &NodeId) -> Result<bool, GraphError> {
        if id.is_blank() {
            return Err(GraphError::InvalidNode);
        }
        if !self.node_set.insert(id.clone()) {
            return Ok(false);
        }
        self.nodes.push(id.clone());
        Ok(true)
    }

    pub fn has_link(&self, a: &NodeId, b: &NodeId) -> bool {
        self.link_set.contains(&LinkKey::new(a, b))
    }

    /// Inserts the link between `a` and `b` unless it, or its reverse, is already present.
    ///
    /// Both endpoints must have been added first. Returns `true` when the link
    /// is new; an existing link keeps its original label.
    pub fn add_link(&mut self, a: &NodeId, b: &NodeId, label: impl Into<String>) -> Result<bool, GraphError> {
        for endpoint in [a, b] {
            if !self.has_node(endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    id: endpoint.to_string(),
                });
            }
        }

        if !self.link_set.insert(LinkKey::new(a, b)) {
            return Ok(false);
        }
        self.links.push(Link {
            from: a.clone(),
            to: b.clone(),
            label: label.into(),
        });
        Ok(true)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
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
