//! # Excel Report Sink
//!
//! Writes the analysis report as a real `.xlsx` workbook, one worksheet per
//! table. The header row holds the `index` column followed by every field
//! name in order of first appearance. Lists and mappings are written as their
//! rendered text, `null` cells stay blank.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde_json::{Map, Value};
use topomap_common::ports::report::{INDEX_COLUMN, ReportError, ReportSink};
use topomap_common::topology::record::render_value;
use topomap_common::topology::table::Table;

use crate::adapters::workbook::{self, Sheet};

pub struct XlsxWorkbookSink {
    path: PathBuf,
}

impl XlsxWorkbookSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for XlsxWorkbookSink {
    fn write_report(&mut self, tables: &[Table]) -> Result<(), ReportError> {
        let sheets: Vec<Sheet> = workbook::to_sheets(tables)?;

        let mut book = Workbook::new();
        let header = Format::new().set_bold();
        for sheet in &sheets {
            let worksheet: &mut Worksheet = book.add_worksheet();
            write_sheet(worksheet, sheet, &header).map_err(encode)?;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        book.save(&self.path).map_err(encode)?;
        Ok(())
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, header: &Format) -> Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;

    let columns: Vec<&str> = columns(&sheet.rows);
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(col)?, *name, header)?;
    }

    for (idx, row) in sheet.rows.iter().enumerate() {
        let line: u32 = u32::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, name) in columns.iter().enumerate() {
            let col: u16 = column_number(col)?;
            match row.get(*name) {
                None | Some(Value::Null) => {}
                Some(Value::Bool(b)) => {
                    worksheet.write_boolean(line, col, *b)?;
                }
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(number) => {
                        worksheet.write_number(line, col, number)?;
                    }
                    None => {
                        worksheet.write_string(line, col, n.to_string())?;
                    }
                },
                Some(value) => {
                    worksheet.write_string(line, col, render_value(value))?;
                }
            }
        }
    }
    Ok(())
}

/// Field names across all rows, in order of first appearance.
fn columns(rows: &[Map<String, Value>]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for name in rows.iter().flat_map(|row| row.keys()) {
        if !columns.contains(&name.as_str()) {
            columns.push(name);
        }
    }
    if columns.is_empty() {
        columns.push(INDEX_COLUMN);
    }
    columns
}

fn column_number(col: usize) -> Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

fn encode(e: XlsxError) -> ReportError {
    ReportError::Encode(e.to_string())
}
