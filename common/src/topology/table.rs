use crate::topology::record::AdjacencyRecord;

/// A named result set handed from a fact source to a report sink.
///
/// Rows share the shape of adjacency records: an identifying key plus
/// named fields, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub rows: Vec<AdjacencyRecord>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<AdjacencyRecord>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
