mod commands;
mod terminal;

use commands::{CommandLine, Commands, inspect, map, report};
use topomap_common::config::Config;
use terminal::{logging, print, spinner};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.to_config();

    logging::init_logging(cfg.quiet);
    print::banner(cfg.no_banner, cfg.quiet);

    let result: anyhow::Result<()> = match &commands.command {
        Commands::Map { snapshot } => map::map(snapshot, &cfg),
        Commands::Report { snapshot } => report::report(snapshot, &cfg),
        Commands::Inspect { snapshot, layer } => inspect::inspect(snapshot, *layer, &cfg),
    };

    spinner::get_spinner().finish_and_clear();
    result
}
