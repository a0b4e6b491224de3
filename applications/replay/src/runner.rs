//! Scenario runner
//!
//! Owns one [`ListenerSession`] per listener and a shared artist registry.
//! Before each command, every session is moved forward by the time elapsed
//! since the previous command, then the command is applied to its listener.

use crate::{
    error::{ReplayError, Result},
    scenario::{Action, CommandInput, Scenario},
};
use serde::Serialize;
use soul_wrapped::{
    artist_wrapped, ArtistRegistry, AudioSourceView, InMemoryArtistRegistry, ListenerSession,
    PlaybackError, PlaybackState, SessionConfig, SourceKind,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub command: String,
    pub user: String,
    pub timestamp: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

/// Snapshot returned by the `status` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatus {
    pub name: String,
    pub remained_time: u64,
    pub repeat: String,
    pub shuffle: bool,
    pub paused: bool,
}

impl PlayerStatus {
    pub fn of(playback: &PlaybackState) -> Self {
        let (name, remained_time) = playback
            .current_track()
            .map(|current| (current.track.name.clone(), current.remaining_secs()))
            .unwrap_or_default();

        Self {
            name,
            remained_time,
            repeat: playback.repeat_mode().to_string(),
            shuffle: playback.is_shuffled(),
            paused: !playback.is_loaded() || playback.is_paused(),
        }
    }
}

enum Outcome {
    Message(String),
    Report(serde_json::Value),
}

/// Replays commands against a fixed catalog and listener set
#[derive(Debug)]
pub struct Replay {
    library: Vec<Arc<AudioSourceView>>,
    sessions: BTreeMap<String, ListenerSession>,
    registry: InMemoryArtistRegistry,
    config: SessionConfig,
    clock: u64,
}

impl Replay {
    pub fn new(scenario: &Scenario, config: SessionConfig) -> Result<Self> {
        scenario.validate()?;

        let mut registry = InMemoryArtistRegistry::new();
        for artist in &scenario.artists {
            registry.add_artist(artist.as_str());
        }
        for source in &scenario.library {
            if let (SourceKind::Album, Some(owner)) = (source.kind, &source.owner) {
                registry.add_artist(owner.as_str());
            }
        }

        let sessions = scenario
            .listeners
            .iter()
            .map(|listener| {
                (
                    listener.username.clone(),
                    ListenerSession::new(listener.clone(), config.clone()),
                )
            })
            .collect();

        info!(
            "Replay ready: {} listeners, {} sources, {} artists",
            scenario.listeners.len(),
            scenario.library.len(),
            registry.len()
        );

        Ok(Self {
            library: scenario.library.iter().cloned().map(Arc::new).collect(),
            sessions,
            registry,
            config,
            clock: 0,
        })
    }

    /// Run every command in order
    pub fn run(&mut self, commands: &[CommandInput]) -> Result<Vec<CommandOutput>> {
        commands.iter().map(|input| self.execute(input)).collect()
    }

    /// Advance time to the command's timestamp and apply it
    ///
    /// Rejected commands still produce an output carrying the error message.
    pub fn execute(&mut self, input: &CommandInput) -> Result<CommandOutput> {
        self.advance_to(input.timestamp);
        debug!(
            "t={} {} {}",
            input.timestamp,
            input.username,
            input.action.name()
        );

        let mut output = CommandOutput {
            command: input.action.name().to_string(),
            user: input.username.clone(),
            timestamp: input.timestamp,
            message: None,
            result: None,
        };

        match self.dispatch(&input.username, &input.action) {
            Ok(Outcome::Message(message)) => output.message = Some(message),
            Ok(Outcome::Report(report)) => output.result = Some(report),
            Err(e) if e.is_command_error() => output.message = Some(e.to_string()),
            Err(e) => return Err(e),
        }

        Ok(output)
    }

    pub fn session(&self, username: &str) -> Option<&ListenerSession> {
        self.sessions.get(username)
    }

    pub fn registry(&self) -> &InMemoryArtistRegistry {
        &self.registry
    }

    /// Timestamp of the latest command seen
    pub fn clock(&self) -> u64 {
        self.clock
    }

    // ===== Internal =====

    fn advance_to(&mut self, timestamp: u64) {
        if timestamp < self.clock {
            warn!(
                "Timestamp {} is earlier than {}, time does not move",
                timestamp, self.clock
            );
            return;
        }

        let elapsed = timestamp - self.clock;
        self.clock = timestamp;
        if elapsed == 0 {
            return;
        }

        for session in self.sessions.values_mut() {
            session.advance(elapsed, &mut self.registry);
        }
    }

    fn dispatch(&mut self, username: &str, action: &Action) -> Result<Outcome> {
        let Some(session) = self.sessions.get_mut(username) else {
            return match action {
                Action::Wrapped => {
                    Self::artist_report(&self.registry, username, self.config.wrapped_limit)
                }
                _ => Err(ReplayError::UnknownUser(username.to_string())),
            };
        };

        let status = match action {
            Action::Load { source } => {
                let selected = source
                    .checked_sub(1)
                    .and_then(|index| self.library.get(index))
                    .ok_or(PlaybackError::SelectionOutOfRange(*source))?;
                session.load(Arc::clone(selected))?
            }
            Action::PlayPause => session.toggle_pause()?,
            Action::Repeat => session.cycle_repeat()?,
            Action::Shuffle { seed } => session.toggle_shuffle(*seed)?,
            Action::Forward => session.skip_next()?,
            Action::Backward => session.skip_prev()?,
            Action::Next => session.next(&mut self.registry)?,
            Action::Prev => session.prev(&mut self.registry)?,
            Action::Status => {
                let status = PlayerStatus::of(session.playback());
                return Ok(Outcome::Report(serde_json::to_value(status)?));
            }
            Action::SwitchConnectionStatus => {
                session.switch_status();
                return Ok(Outcome::Message(format!(
                    "{username} has changed status successfully."
                )));
            }
            Action::Wrapped => {
                return match session.wrapped() {
                    Some(report) => Ok(Outcome::Report(serde_json::to_value(report)?)),
                    None => Ok(Outcome::Message(format!(
                        "No data to show for user {username}."
                    ))),
                };
            }
        };

        Ok(Outcome::Message(status.to_string()))
    }

    fn artist_report(
        registry: &InMemoryArtistRegistry,
        name: &str,
        limit: usize,
    ) -> Result<Outcome> {
        if registry.artist(name).is_none() {
            return Err(ReplayError::UnknownUser(name.to_string()));
        }

        match artist_wrapped(registry, name, limit) {
            Some(report) => Ok(Outcome::Report(serde_json::to_value(report)?)),
            None => Ok(Outcome::Message(format!(
                "No data to show for artist {name}."
            ))),
        }
    }
}
