use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::topology::table::Table;

/// Column holding each row's key in every sheet.
pub const INDEX_COLUMN: &str = "index";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("sheet name '{0}' is used more than once")]
    DuplicateSheet(String),
    #[error("sheet '{sheet}' has its own '{column}' column, which is reserved for row keys")]
    ReservedColumn { sheet: String, column: String },
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not encode workbook: {0}")]
    Encode(String),
}

/// File format of the analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ReportFormat::Xlsx),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("unknown report format: {s} (expected 'xlsx' or 'json')")),
        }
    }
}

/// Persists named result sets as one workbook, one sheet per table.
pub trait ReportSink {
    fn write_report(&mut self, tables: &[Table]) -> Result<(), ReportError>;
}
