//! Soul Replay
//!
//! Replays timestamped listening scenarios through `soul-wrapped` and reports
//! the outcome of every command as JSON.

pub mod config;
pub mod error;
pub mod runner;
pub mod scenario;

pub use config::ReplayConfig;
pub use error::{ReplayError, Result};
pub use runner::{CommandOutput, PlayerStatus, Replay};
pub use scenario::{Action, CommandInput, Scenario};

/// Replay a whole scenario with the given configuration
pub fn replay(scenario: &Scenario, config: &ReplayConfig) -> Result<Vec<CommandOutput>> {
    let mut replay = Replay::new(scenario, config.session.clone())?;
    replay.run(&scenario.commands)
}

/// Render outputs as a JSON array
pub fn render(outputs: &[CommandOutput], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(outputs)?
    } else {
        serde_json::to_string(outputs)?
    };
    Ok(json)
}
