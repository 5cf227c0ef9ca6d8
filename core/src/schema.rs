//! # Layer Schemas
//!
//! Normalizes raw adjacency records into `(local, remote, label)` triples.
//!
//! Every layer names its columns differently but the graph-building
//! algorithm is the same, so each layer is a small [`LayerSchema`]
//! strategy and the builder only talks to the trait.
//!
//! | Layer | Local id | Remote id | Status token |
//! |---|---|---|---|
//! | OSPF | `Interface` owner | `Remote_Interface` owner | `Session_Status` |
//! | BGP | `Node` + `Local_AS` | `Remote_Node` + `Remote_AS` | `Established_Status` |
//! | L3 | `Interface` owner | `Remote_Interface` owner | record key |
//!
//! Normalization is strict: a missing or `null` required column is a
//! [`NormalizeError::MalformedRecord`], never a silent default.

use serde_json::Value;
use thiserror::Error;
use topomap_common::topology::layer::Layer;
use topomap_common::topology::node::NodeId;
use topomap_common::topology::record::{AdjacencyRecord, render_value};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{layer} record '{key}' is missing field '{field}'")]
    MalformedRecord {
        layer: Layer,
        key: String,
        field: &'static str,
    },
}

/// The normalized view of one adjacency record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    pub local: NodeId,
    pub remote: NodeId,
    pub label: String,
}

pub trait LayerSchema {
    fn layer(&self) -> Layer;
    fn local_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError>;
    fn remote_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError>;
    fn label(
        &self,
        record: &AdjacencyRecord,
        local: &NodeId,
        remote: &NodeId,
    ) -> Result<String, NormalizeError>;

    fn normalize(&self, record: &AdjacencyRecord) -> Result<Adjacency, NormalizeError> {
        let local: NodeId = self.local_id(record)?;
        let remote: NodeId = self.remote_id(record)?;
        let label: String = self.label(record, &local, &remote)?;
        Ok(Adjacency {
            local,
            remote,
            label,
        })
    }
}

pub struct OspfSchema;
pub struct BgpSchema;
pub struct L3Schema;

pub fn schema_for(layer: Layer) -> &'static dyn LayerSchema {
    match layer {
        Layer::Ospf => &OspfSchema,
        Layer::Bgp => &BgpSchema,
        Layer::L3 => &L3Schema,
    }
}

impl LayerSchema for OspfSchema {
    fn layer(&self) -> Layer {
        Layer::Ospf
    }

    fn local_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError> {
        interface_owner(Layer::Ospf, record, "Interface")
    }

    fn remote_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError> {
        interface_owner(Layer::Ospf, record, "Remote_Interface")
    }

    fn label(
        &self,
        record: &AdjacencyRecord,
        local: &NodeId,
        remote: &NodeId,
    ) -> Result<String, NormalizeError> {
        let field = |name| require(Layer::Ospf, record, name);
        Ok(format!(
            "{local}({})(AreaID={}) == {} == {remote}({})(AreaID={})",
            field("IP")?,
            field("Area")?,
            field("Session_Status")?,
            field("Remote_IP")?,
            field("Remote_Area")?,
        ))
    }
}

impl LayerSchema for BgpSchema {
    fn layer(&self) -> Layer {
        Layer::Bgp
    }

    fn local_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError> {
        speaker_id(record, "Node", "Local_AS")
    }

    fn remote_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError> {
        speaker_id(record, "Remote_Node", "Remote_AS")
    }

    fn label(
        &self,
        record: &AdjacencyRecord,
        local: &NodeId,
        remote: &NodeId,
    ) -> Result<String, NormalizeError> {
        let field = |name| require(Layer::Bgp, record, name);
        Ok(format!(
            "{local}({}) == {} == {remote}({})",
            field("Local_IP")?,
            field("Established_Status")?,
            field("Remote_IP")?,
        ))
    }
}

impl LayerSchema for L3Schema {
    fn layer(&self) -> Layer {
        Layer::L3
    }

    fn local_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError> {
        interface_owner(Layer::L3, record, "Interface")
    }

    fn remote_id(&self, record: &AdjacencyRecord) -> Result<NodeId, NormalizeError> {
        interface_owner(Layer::L3, record, "Remote_Interface")
    }

    fn label(
        &self,
        record: &AdjacencyRecord,
        local: &NodeId,
        remote: &NodeId,
    ) -> Result<String, NormalizeError> {
        let field = |name| require(Layer::L3, record, name);
        Ok(format!(
            "{local}({}) == VLAN {} == {remote}({})",
            field("IPs")?,
            record.key(),
            field("Remote_IPs")?,
        ))
    }
}

fn require(
    layer: Layer,
    record: &AdjacencyRecord,
    field: &'static str,
) -> Result<String, NormalizeError> {
    record
        .render(field)
        .ok_or_else(|| malformed(layer, record, field))
}

fn malformed(layer: Layer, record: &AdjacencyRecord, field: &'static str) -> NormalizeError {
    NormalizeError::MalformedRecord {
        layer,
        key: record.key().to_owned(),
        field,
    }
}

/// Hostname owning the interface in column `field`.
///
/// Interfaces arrive either as `{hostname, interface}` objects or in their
/// compact `host[interface]` text form.
fn interface_owner(
    layer: Layer,
    record: &AdjacencyRecord,
    field: &'static str,
) -> Result<NodeId, NormalizeError> {
    let hostname: Option<String> = match record.field(field) {
        Some(Value::Object(interface)) => match interface.get("hostname") {
            Some(Value::Null) | None => None,
            Some(value) => Some(render_value(value)),
        },
        Some(Value::String(compact)) => compact
            .split_once('[')
            .map(|(host, _)| host.to_owned())
            .or_else(|| Some(compact.clone())),
        _ => None,
    };

    hostname
        .map(NodeId::from)
        .ok_or_else(|| malformed(layer, record, field))
}

fn speaker_id(
    record: &AdjacencyRecord,
    node_field: &'static str,
    as_field: &'static str,
) -> Result<NodeId, NormalizeError> {
    let node: String = require(Layer::Bgp, record, node_field)?;
    let asn: String = require(Layer::Bgp, record, as_field)?;
    Ok(NodeId::from(format!("{node}\n({asn})")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
