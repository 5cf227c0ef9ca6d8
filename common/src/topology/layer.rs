use std::fmt;
use std::str::FromStr;

/// A protocol-adjacency domain analysed by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Ospf,
    Bgp,
    L3,
}

impl Layer {
    /// Every layer, in the order they are built and exported.
    pub const ALL: [Layer; 3] = [Layer::Ospf, Layer::Bgp, Layer::L3];

    /// Name of the diagram page holding this layer.
    pub fn page_name(&self) -> &'static str {
        match self {
            Layer::Ospf => "OSPF",
            Layer::Bgp => "BGP",
            Layer::L3 => "L3",
        }
    }

    /// Name of the fact table carrying this layer's adjacencies.
    pub fn table_name(&self) -> &'static str {
        match self {
            Layer::Ospf => "ospf_session",
            Layer::Bgp => "bgp_session",
            Layer::L3 => "l3_edges",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.page_name())
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ospf" => Ok(Layer::Ospf),
            "bgp" => Ok(Layer::Bgp),
            "l3" => Ok(Layer::L3),
            _ => Err(format!("unknown layer: {s}")),
        }
    }
}
