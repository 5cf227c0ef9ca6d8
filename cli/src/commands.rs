pub mod inspect;
pub mod map;
pub mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use topomap_common::config::{self, Config};
use topomap_common::ports::diagram::LayoutAlgorithm;
use topomap_common::ports::report::ReportFormat;
use topomap_common::topology::layer::Layer;
use topomap_core::mapping::LayerOutcome;

#[derive(Parser)]
#[command(name = "topomap")]
#[command(about = "Draws OSPF, BGP and L3 topology maps from network snapshots.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Name of the network, used to prefix output files
    #[arg(short, long, global = true, default_value = "Home_network")]
    pub network: String,

    /// Directory for reports and diagrams [default: <NETWORK>_Reports]
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Vertex placement used in the diagram
    #[arg(short, long, global = true, default_value_t = LayoutAlgorithm::Circle)]
    pub layout: LayoutAlgorithm,

    /// File format of the analysis report (xlsx or json)
    #[arg(long, global = true, default_value_t = ReportFormat::Xlsx)]
    pub report_format: ReportFormat,

    /// Skip writing the analysis report
    #[arg(long, global = true)]
    pub no_report: bool,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Reduce output, repeat for less (-qq)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Exit with an error when any layer fails to build
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the analysis report and the network map
    #[command(alias = "m")]
    Map { snapshot: PathBuf },
    /// Write the analysis report only
    #[command(alias = "r")]
    Report { snapshot: PathBuf },
    /// Build the layer graphs and print them without writing files
    #[command(alias = "i")]
    Inspect {
        snapshot: PathBuf,
        /// Only show this layer (ospf, bgp or l3)
        #[arg(long)]
        layer: Option<Layer>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let args: &GlobalArgs = &self.global;
        Config {
            network_name: args.network.clone(),
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config::default_output_dir(&args.network)),
            layout: args.layout,
            report_format: args.report_format,
            no_report: args.no_report,
            no_banner: args.no_banner,
            quiet: args.quiet,
            strict: args.strict,
        }
    }
}

/// Fails the run under `--strict` when any layer could not be built.
pub fn check_strict(outcomes: &[LayerOutcome], cfg: &Config) -> anyhow::Result<()> {
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|outcome| outcome.is_failed())
        .map(|outcome| outcome.layer.to_string())
        .collect();

    if cfg.strict && !failed.is_empty() {
        anyhow::bail!("{} layer(s) failed to build: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn aliases_and_global_flags_parse() {
        let cli = CommandLine::try_parse_from([
            "topomap", "m", "facts.json", "-n", "lab", "--layout", "grid", "-qq", "--strict",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Map { ref snapshot } if snapshot == Path::new("facts.json")));
        let cfg = cli.to_config();
        assert_eq!(cfg.network_name, "lab");
        assert_eq!(cfg.output_dir, Path::new("lab_Reports"));
        assert_eq!(cfg.layout, LayoutAlgorithm::Grid);
        assert_eq!(cfg.report_format, ReportFormat::Xlsx);
        assert_eq!(cfg.quiet, 2);
        assert!(cfg.strict);
    }

    #[test]
    fn inspect_accepts_a_layer_filter() {
        let cli = CommandLine::try_parse_from(["topomap", "i", "facts.json", "--layer", "BGP"]).unwrap();

        assert!(matches!(cli.command, Commands::Inspect { layer: Some(Layer::Bgp), .. }));
    }
}
