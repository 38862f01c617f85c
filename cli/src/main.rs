mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, Commands, modules, scan};
use netzap_common::config::Config;
use netzap_common::runner::CommandRunner;
use netzap_core::ZMap;
use netzap_core::runner::ProcessRunner;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = Config::from(&commands);

    logging::init_logging(cfg.verbosity, cfg.quiet);
    print::banner(cfg.no_banner, cfg.quiet);

    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner);
    let zmap = ZMap::new(runner.clone()).set_executable_path(cfg.zmap_path.clone());

    match commands.command {
        Commands::Scan { args, json } => {
            if !json {
                print::header("starting scan", cfg.quiet);
            }
            scan::scan(&args, json, runner, &cfg).await
        }
        Commands::Command { args } => scan::command(&args, runner, &cfg),
        Commands::ProbeModules => modules::probe_modules(&zmap, &cfg).await,
        Commands::OutputModules => modules::output_modules(&zmap, &cfg).await,
        Commands::OutputFields => modules::output_fields(&zmap, &cfg).await,
        Commands::Version => modules::version(&zmap, &cfg).await,
    }
}
