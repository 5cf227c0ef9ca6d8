use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use topomap_common::config::Config;
use topomap_common::success;
use topomap_core::adapters::drawio::DrawioDiagram;
use topomap_core::mapping::{MappingService, MappingSummary};
use tracing::info;

use crate::commands::{check_strict, inspect, report};
use crate::mprint;
use crate::terminal::{colors, print, spinner};

pub fn map(snapshot: &Path, cfg: &Config) -> anyhow::Result<()> {
    let facts = report::open_snapshot(snapshot)?;
    print_settings(snapshot, cfg);

    if cfg.no_report {
        info!("Skipping the analysis report");
    } else {
        report::write_report(&facts, cfg)?;
    }

    print::header("network map", cfg.quiet);
    spinner::get_spinner().set_message("Building layer graphs...");

    let start_time: Instant = Instant::now();
    let diagram_path = cfg.diagram_path();
    let mut diagram: DrawioDiagram = DrawioDiagram::new();
    let summary: MappingSummary = MappingService::new(&facts)
        .run(&mut diagram, cfg.layout, &diagram_path)
        .with_context(|| format!("Failed to write network map {}", diagram_path.display()))?;

    mapping_ends(&summary, start_time.elapsed(), cfg);
    check_strict(&summary.layers, cfg)
}

fn print_settings(snapshot: &Path, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    print::header("settings", cfg.quiet);
    print::GLOBAL_KEY_WIDTH.set(8);
    print::aligned_line("Network", cfg.network_name.as_str());
    print::aligned_line("Snapshot", snapshot.display().to_string());
    print::aligned_line("Output", cfg.output_dir.display().to_string());
    print::aligned_line("Layout", cfg.layout.to_string().color(colors::ACCENT));
}

fn mapping_ends(summary: &MappingSummary, total_time: Duration, cfg: &Config) {
    if summary.pages.is_empty() {
        print::header("zero links mapped", cfg.quiet);
        print::no_results();
        return;
    }

    if cfg.quiet == 0 {
        mprint!();
        inspect::print_outcomes(&summary.layers, None, cfg);
    }
    print_summary(summary, total_time, cfg);
}

fn print_summary(summary: &MappingSummary, total_time: Duration, cfg: &Config) {
    let pages: ColoredString = format!("{} pages", summary.pages.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Mapping Complete: {pages} drawn in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            print::end_of_program();
        }
        _ => success!("{}", output),
    }
}
