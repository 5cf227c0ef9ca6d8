//! # JSON Workbook Report Sink
//!
//! Persists result sets as a single JSON workbook:
//!
//! ```json
//! { "sheets": [ { "name": "ospf_session", "rows": [ { "index": "0", "...": "..." } ] } ] }
//! ```
//!
//! Sheet names follow spreadsheet rules and are cut to 31 characters. Every
//! row starts with its key under the reserved `index` column; a table that
//! carries its own `index` column is refused rather than overwritten.
//!
//! [`to_sheets`] is shared with the xlsx sink so both formats agree.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use topomap_common::ports::report::{INDEX_COLUMN, ReportError, ReportSink};
use topomap_common::topology::table::Table;

pub const MAX_SHEET_NAME: usize = 31;

#[derive(Serialize)]
struct Workbook {
    sheets: Vec<Sheet>,
}

#[derive(Serialize)]
pub(crate) struct Sheet {
    pub(crate) name: String,
    pub(crate) rows: Vec<Map<String, Value>>,
}

pub struct JsonWorkbookSink {
    path: PathBuf,
}

impl JsonWorkbookSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonWorkbookSink {
    fn write_report(&mut self, tables: &[Table]) -> Result<(), ReportError> {
        let workbook = Workbook {
            sheets: to_sheets(tables)?,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&workbook)?)?;
        Ok(())
    }
}

pub(crate) fn to_sheets(tables: &[Table]) -> Result<Vec<Sheet>, ReportError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut sheets: Vec<Sheet> = Vec::with_capacity(tables.len());

    for table in tables {
        let name: String = sheet_name(&table.name);
        if !seen.insert(name.clone()) {
            return Err(ReportError::DuplicateSheet(name));
        }

        if table.rows.iter().any(|row| row.fields().contains_key(INDEX_COLUMN)) {
            return Err(ReportError::ReservedColumn {
                sheet: name,
                column: INDEX_COLUMN.to_owned(),
            });
        }

        let rows: Vec<Map<String, Value>> = table
            .rows
            .iter()
            .map(|row| {
                let mut cells: Map<String, Value> = Map::with_capacity(row.fields().len() + 1);
                cells.insert(INDEX_COLUMN.to_owned(), Value::String(row.key().to_owned()));
                cells.extend(row.fields().iter().map(|(k, v)| (k.clone(), v.clone())));
                cells
            })
            .collect();

        sheets.push(Sheet { name, rows });
    }
    Ok(sheets)
}

fn sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use topomap_common::topology::record::AdjacencyRecord;

    fn row(key: &str, value: Value) -> AdjacencyRecord {
        match value {
            Value::Object(fields) => AdjacencyRecord::new(key, fields),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn writes_sheets_with_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let tables = vec![
            Table::new("node_properties", vec![row("0", json!({ "Node": "r1" }))]),
            Table::new("l3_edges", Vec::new()),
        ];

        JsonWorkbookSink::new(&path).write_report(&tables).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "sheets": [
                    { "name": "node_properties", "rows": [{ "index": "0", "Node": "r1" }] },
                    { "name": "l3_edges", "rows": [] }
                ]
            })
        );
    }

    #[test]
    fn long_names_are_truncated_and_checked_for_clashes() {
        let long = "undefined_structure_references_by_node";
        assert_eq!(sheet_name(long).chars().count(), MAX_SHEET_NAME);

        let tables = vec![
            Table::new(format!("{long}_a"), Vec::new()),
            Table::new(format!("{long}_b"), Vec::new()),
        ];
        assert!(matches!(to_sheets(&tables), Err(ReportError::DuplicateSheet(_))));
    }

    #[test]
    fn row_with_its_own_index_column_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let tables = vec![Table::new(
            "node_properties",
            vec![row("7", json!({ "index": 99, "Node": "r1" }))],
        )];

        let err = JsonWorkbookSink::new(&path).write_report(&tables).unwrap_err();

        assert!(matches!(
            err,
            ReportError::ReservedColumn { ref sheet, ref column }
                if sheet == "node_properties" && column == "index"
        ));
        assert!(!path.exists());
    }
}
