//! # Report Service
//!
//! Copies every table offered by the fact source into a report sink, one
//! sheet per table, in source order.

use anyhow::Context;
use tracing::info;
use topomap_common::ports::facts::FactSource;
use topomap_common::ports::report::ReportSink;
use topomap_common::topology::table::Table;

pub struct ReportService<'a> {
    facts: &'a dyn FactSource,
}

impl<'a> ReportService<'a> {
    pub fn new(facts: &'a dyn FactSource) -> Self {
        Self { facts }
    }

    /// Writes the report and returns the number of sheets written.
    pub fn run(&self, sink: &mut dyn ReportSink) -> anyhow::Result<usize> {
        let tables: Vec<Table> = self
            .facts
            .tables()
            .context("Failed to collect tables for the analysis report")?;

        for table in &tables {
            info!(sheet = %table.name, rows = table.rows.len(), "Adding sheet {}", table.name);
        }

        sink.write_report(&tables)
            .context("Failed to write the analysis report")?;
        Ok(tables.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use topomap_common::ports::report::ReportError;

    use crate::adapters::snapshot::JsonSnapshotSource;

    #[derive(Default)]
    struct CapturingSink {
        sheets: Vec<(String, usize)>,
    }

    impl ReportSink for CapturingSink {
        fn write_report(&mut self, tables: &[Table]) -> Result<(), ReportError> {
            self.sheets = tables
                .iter()
                .map(|table| (table.name.clone(), table.rows.len()))
                .collect();
            Ok(())
        }
    }

    #[test]
    fn every_table_becomes_a_sheet_in_order() {
        let facts = JsonSnapshotSource::from_value(json!({
            "node_properties": [{ "Node": "r1" }, { "Node": "r2" }],
            "l3_edges": [],
            "ospf_session": { "0": { "IP": "10.0.0.1" } }
        }))
        .unwrap();
        let mut sink = CapturingSink::default();

        let written = ReportService::new(&facts).run(&mut sink).unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            sink.sheets,
            vec![
                ("node_properties".to_owned(), 2),
                ("l3_edges".to_owned(), 0),
                ("ospf_session".to_owned(), 1),
            ]
        );
    }
}
