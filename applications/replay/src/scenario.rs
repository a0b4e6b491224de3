//! Scenario input
//!
//! A scenario is a catalog, a set of listeners and a list of timestamped
//! commands, read from JSON.

use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use soul_wrapped::{AudioSourceView, Listener, SourceKind};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Scenario {
    pub listeners: Vec<Listener>,

    /// Artists known before any play, so their wrapped query has an answer
    #[serde(default)]
    pub artists: Vec<String>,

    /// Sources selectable by 1-based position
    #[serde(default)]
    pub library: Vec<AudioSourceView>,

    #[serde(default)]
    pub commands: Vec<CommandInput>,
}

/// One command as it appears in the scenario file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandInput {
    /// Seconds since the start of the replay
    pub timestamp: u64,
    pub username: String,

    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Action {
    /// Load the library entry at this 1-based position
    Load { source: usize },
    PlayPause,
    Repeat,
    Shuffle { seed: u64 },
    Forward,
    Backward,
    Next,
    Prev,
    Status,
    SwitchConnectionStatus,
    Wrapped,
}

impl Action {
    /// Command name as written in the scenario
    pub fn name(&self) -> &'static str {
        match self {
            Action::Load { .. } => "load",
            Action::PlayPause => "playPause",
            Action::Repeat => "repeat",
            Action::Shuffle { .. } => "shuffle",
            Action::Forward => "forward",
            Action::Backward => "backward",
            Action::Next => "next",
            Action::Prev => "prev",
            Action::Status => "status",
            Action::SwitchConnectionStatus => "switchConnectionStatus",
            Action::Wrapped => "wrapped",
        }
    }
}

impl Scenario {
    /// Parse and validate a scenario from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self =
            serde_json::from_str(json).map_err(|e| ReplayError::Scenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate the scenario
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for listener in &self.listeners {
            if !seen.insert(listener.username.as_str()) {
                return Err(ReplayError::Scenario(format!(
                    "listener '{}' is declared twice",
                    listener.username
                )));
            }
        }

        for source in &self.library {
            if source.kind == SourceKind::Song && source.tracks.len() > 1 {
                return Err(ReplayError::Scenario(format!(
                    "song source '{}' holds more than one track",
                    source.name
                )));
            }

            // Zero-length tracks would be credited without any time passing
            if let Some(track) = source.tracks.iter().find(|track| track.duration_secs == 0) {
                return Err(ReplayError::Scenario(format!(
                    "track '{}' in '{}' has no duration",
                    track.name, source.name
                )));
            }
        }

        Ok(())
    }
}
