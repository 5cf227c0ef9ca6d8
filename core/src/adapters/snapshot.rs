//! # JSON Snapshot Fact Source
//!
//! Reads a JSON document whose members are named query results:
//!
//! ```json
//! {
//!   "ospf_session": [ { "Interface": { "hostname": "r1" }, "...": "..." } ],
//!   "l3_edges": { "0": { "Interface": "r1[Gi0/0]", "...": "..." } }
//! }
//! ```
//!
//! A table is either an array of row objects, keyed by position, or an
//! object of row objects keyed by row index. Member order is kept as written.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};
use topomap_common::ports::facts::{FactError, FactSource};
use topomap_common::topology::layer::Layer;
use topomap_common::topology::record::AdjacencyRecord;
use topomap_common::topology::table::Table;

#[derive(Debug)]
pub struct JsonSnapshotSource {
    tables: Map<String, Value>,
}

impl JsonSnapshotSource {
    pub fn open(path: &Path) -> Result<Self, FactError> {
        let text: String = fs::read_to_string(path).map_err(|source| FactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_value(serde_json::from_str(&text)?)?;
        debug!(path = %path.display(), tables = snapshot.tables.len(), "Loaded fact snapshot");
        Ok(snapshot)
    }

    pub fn from_value(value: Value) -> Result<Self, FactError> {
        match value {
            Value::Object(tables) => Ok(Self { tables }),
            _ => Err(FactError::Shape {
                table: "<snapshot>".to_owned(),
                reason: "expected an object of named tables".to_owned(),
            }),
        }
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl FactSource for JsonSnapshotSource {
    fn fetch(&self, layer: Layer) -> Result<Vec<AdjacencyRecord>, FactError> {
        let name: &str = layer.table_name();
        match self.tables.get(name) {
            Some(table) => parse_rows(name, table),
            None => Ok(Vec::new()),
        }
    }

    fn tables(&self) -> Result<Vec<Table>, FactError> {
        let mut tables: Vec<Table> = Vec::with_capacity(self.tables.len());
        for (name, value) in &self.tables {
            match parse_rows(name, value) {
                Ok(rows) => tables.push(Table::new(name.clone(), rows)),
                Err(e) => warn!("Leaving '{name}' out of the report: {e}"),
            }
        }
        Ok(tables)
    }
}

fn parse_rows(name: &str, table: &Value) -> Result<Vec<AdjacencyRecord>, FactError> {
    match table {
        Value::Array(rows) => rows
            .iter()
            .enumerate()
            .map(|(idx, row)| to_record(name, idx.to_string(), row))
            .collect(),
        Value::Object(rows) => rows
            .iter()
            .map(|(key, row)| to_record(name, key.clone(), row))
            .collect(),
        _ => Err(shape(name, "expected an array or an object of rows")),
    }
}

fn to_record(name: &str, key: String, row: &Value) -> Result<AdjacencyRecord, FactError> {
    match row {
        Value::Object(fields) => Ok(AdjacencyRecord::new(key, fields.clone())),
        _ => Err(shape(name, &format!("row '{key}' is not an object"))),
    }
}

fn shape(table: &str, reason: &str) -> FactError {
    FactError::Shape {
        table: table.to_owned(),
        reason: reason.to_owned(),
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
