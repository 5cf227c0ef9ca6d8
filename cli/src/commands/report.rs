use std::path::Path;

use anyhow::Context;
use topomap_common::config::Config;
use topomap_common::ports::facts::FactSource;
use topomap_common::ports::report::{ReportFormat, ReportSink};
use topomap_common::success;
use topomap_core::adapters::snapshot::JsonSnapshotSource;
use topomap_core::adapters::workbook::JsonWorkbookSink;
use topomap_core::adapters::xlsx::XlsxWorkbookSink;
use topomap_core::report::ReportService;

use crate::terminal::{print, spinner};

pub fn report(snapshot: &Path, cfg: &Config) -> anyhow::Result<()> {
    let facts: JsonSnapshotSource = open_snapshot(snapshot)?;
    write_report(&facts, cfg)?;
    print::end_of_program();
    Ok(())
}

pub fn open_snapshot(snapshot: &Path) -> anyhow::Result<JsonSnapshotSource> {
    spinner::get_spinner().set_message(format!("Reading {}...", snapshot.display()));
    JsonSnapshotSource::open(snapshot)
        .with_context(|| format!("Failed to open snapshot {}", snapshot.display()))
}

pub fn write_report(facts: &dyn FactSource, cfg: &Config) -> anyhow::Result<()> {
    print::header("analysis report", cfg.quiet);
    spinner::get_spinner().set_message("Writing analysis report...");

    let path = cfg.report_path();
    let mut sink: Box<dyn ReportSink> = match cfg.report_format {
        ReportFormat::Xlsx => Box::new(XlsxWorkbookSink::new(&path)),
        ReportFormat::Json => Box::new(JsonWorkbookSink::new(&path)),
    };
    let sheets: usize = ReportService::new(facts).run(sink.as_mut())?;

    success!("Analysis report written to {} ({sheets} sheets)", path.display());
    Ok(())
}
