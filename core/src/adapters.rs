//! # Adapters
//!
//! Concrete implementations of the ports defined in `topomap_common::ports`.
//!
//! * [`snapshot::JsonSnapshotSource`]: fact source backed by a JSON export of the query results.
//! * [`drawio::DrawioDiagram`]: diagram sink producing an editable draw.io document.
//! * [`workbook::JsonWorkbookSink`]: report sink writing one JSON workbook.
//! * [`xlsx::XlsxWorkbookSink`]: report sink writing an Excel workbook, the default report.

pub mod drawio;
pub mod snapshot;
pub mod workbook;
pub mod xlsx;
