use std::path::Path;

use colored::*;
use topomap_common::config::Config;
use topomap_common::topology::layer::Layer;
use topomap_core::graph::LayerGraph;
use topomap_core::mapping::{LayerOutcome, MappingService};

use crate::commands::{check_strict, report};
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub fn inspect(snapshot: &Path, layer: Option<Layer>, cfg: &Config) -> anyhow::Result<()> {
    let facts = report::open_snapshot(snapshot)?;

    spinner::get_spinner().set_message("Building layer graphs...");
    let outcomes: Vec<LayerOutcome> = MappingService::new(&facts).build_layers();

    print::header("layer graphs", cfg.quiet);
    print_outcomes(&outcomes, layer, cfg);
    if cfg.quiet == 0 {
        print::end_of_program();
    }
    check_strict(&outcomes, cfg)
}

/// Prints one tree per layer, optionally narrowed to a single layer.
pub fn print_outcomes(outcomes: &[LayerOutcome], only: Option<Layer>, cfg: &Config) {
    let shown: Vec<&LayerOutcome> = outcomes
        .iter()
        .filter(|outcome| only.is_none_or(|layer| layer == outcome.layer))
        .collect();

    for (idx, outcome) in shown.iter().enumerate() {
        print::tree_head(idx, outcome.layer.page_name());
        print::as_tree_one_level(format::outcome_details(outcome));

        if cfg.quiet == 0 {
            if let Some(graph) = &outcome.graph {
                print_links(graph);
            }
        }
        if idx + 1 != shown.len() {
            mprint!();
        }
    }
}

fn print_links(graph: &LayerGraph) {
    for link in graph.links() {
        let line: String = format!(
            "    {} {}",
            "·".color(colors::SEPARATOR),
            format::one_line(&link.label).color(colors::LINK)
        );
        print::print(&line);
    }
}
