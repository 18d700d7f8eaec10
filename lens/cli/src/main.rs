mod format;
mod markets;
mod output;
mod risk;

use {
    crate::{
        format::FormatCmd,
        markets::MarketsCmd,
        risk::{LimitCmd, SimulateCmd, SnapshotCmd},
    },
    clap::Parser,
    config_parser::parse_config,
    lens_types::config::LensConfig,
    std::path::PathBuf,
    tracing::metadata::LevelFilter,
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Path to the TOML config file [default: built-in defaults]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Format a number the way the dashboard displays it
    Format(FormatCmd),

    /// List the markets of a cached registry
    Markets(MarketsCmd),

    /// Print the risk snapshot the engine would be given
    Snapshot(SnapshotCmd),

    /// Simulate an action and print the resulting positions [alias: sim]
    #[command(alias = "sim")]
    Simulate(SimulateCmd),

    /// Compute the largest amount an action accepts
    Limit(LimitCmd),
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Parse the config file, with `LENS__*` environment overrides.
    let cfg: LensConfig = parse_config(cli.config.as_deref())?;

    // Set up tracing.
    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level.parse::<LevelFilter>()?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Format(cmd) => cmd.run(&cfg),
        Command::Markets(cmd) => cmd.run(&cfg),
        Command::Snapshot(cmd) => cmd.run(&cfg),
        Command::Simulate(cmd) => cmd.run(&cfg),
        Command::Limit(cmd) => cmd.run(&cfg),
    }
}
