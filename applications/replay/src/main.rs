/// Soul Replay - replays listening scenarios and prints one result per command
use anyhow::Context;
use clap::Parser;
use soul_replay::{ReplayConfig, Scenario};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soul-replay")]
#[command(about = "Replay a timestamped listening scenario", long_about = None)]
struct Cli {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the results
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_replay=info,soul_wrapped=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config =
        ReplayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let scenario = Scenario::load(&cli.scenario)
        .with_context(|| format!("Failed to read scenario {}", cli.scenario.display()))?;

    tracing::info!(
        "Replaying {} commands from {}",
        scenario.commands.len(),
        cli.scenario.display()
    );

    let outputs = soul_replay::replay(&scenario, &config).context("Replay failed")?;
    let json = soul_replay::render(&outputs, cli.pretty || config.output.pretty)?;
    println!("{json}");

    Ok(())
}
