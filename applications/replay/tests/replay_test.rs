//! Replay tests
//!
//! Feed complete scenario files through the library entry points and the
//! `soul-replay` binary.

use soul_replay::{render, replay, CommandOutput, ReplayConfig, Scenario};
use std::fs;
use std::process::Command;

const SCENARIO: &str = r#"{
    "listeners": [
        { "username": "alice", "city": "Paris" },
        { "username": "bob", "city": "Lyon" }
    ],
    "library": [
        {
            "name": "Absolution",
            "kind": "album",
            "owner": "Muse",
            "tracks": [
                { "name": "Apocalypse Please", "artist": "Muse", "genre": "rock", "album": "Absolution", "durationSecs": 100 },
                { "name": "Time Is Running Out", "artist": "Muse", "genre": "rock", "album": "Absolution", "durationSecs": 100 },
                { "name": "Sing for Absolution", "artist": "Muse", "genre": "rock", "album": "Absolution", "durationSecs": 100 }
            ]
        },
        {
            "name": "Show",
            "kind": "podcast",
            "owner": "host",
            "tracks": [
                { "name": "Ep 1", "durationSecs": 60 },
                { "name": "Ep 2", "durationSecs": 60 }
            ]
        }
    ],
    "commands": [
        { "timestamp": 0, "username": "alice", "command": "load", "source": 1 },
        { "timestamp": 0, "username": "alice", "command": "repeat" },
        { "timestamp": 0, "username": "alice", "command": "repeat" },
        { "timestamp": 350, "username": "alice", "command": "status" },
        { "timestamp": 350, "username": "alice", "command": "next" },
        { "timestamp": 350, "username": "bob", "command": "load", "source": 2 },
        { "timestamp": 350, "username": "bob", "command": "forward" },
        { "timestamp": 350, "username": "bob", "command": "shuffle", "seed": 1 },
        { "timestamp": 400, "username": "alice", "command": "wrapped" },
        { "timestamp": 400, "username": "bob", "command": "wrapped" },
        { "timestamp": 400, "username": "Muse", "command": "wrapped" },
        { "timestamp": 400, "username": "carol", "command": "playPause" }
    ]
}"#;

// ===== Helpers =====

fn run_scenario() -> Vec<CommandOutput> {
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    replay(&scenario, &ReplayConfig::default()).unwrap()
}

fn message(output: &CommandOutput) -> &str {
    output.message.as_deref().unwrap_or_default()
}

// ===== Library Replay =====

#[test]
fn every_command_gets_an_output() {
    let outputs = run_scenario();
    assert_eq!(outputs.len(), 12);
    assert_eq!(outputs[0].command, "load");
    assert_eq!(outputs[11].user, "carol");
    assert_eq!(outputs[11].timestamp, 400);
}

#[test]
fn control_messages() {
    let outputs = run_scenario();
    assert_eq!(message(&outputs[0]), "Playback loaded successfully.");
    assert_eq!(message(&outputs[1]), "Repeat mode changed to repeat once.");
    assert_eq!(message(&outputs[2]), "Repeat mode changed to repeat all.");
    assert_eq!(
        message(&outputs[4]),
        "Skipped to next track successfully. The current track is Time Is Running Out."
    );
    assert_eq!(message(&outputs[6]), "Skipped forward successfully.");
    assert_eq!(
        message(&outputs[7]),
        "The loaded source is not a playlist or an album."
    );
    assert_eq!(message(&outputs[11]), "The username carol doesn't exist.");
}

#[test]
fn status_after_wrapping_the_album() {
    let outputs = run_scenario();
    let status = outputs[3].result.as_ref().unwrap();
    assert_eq!(status["name"], "Apocalypse Please");
    assert_eq!(status["remainedTime"], 50);
    assert_eq!(status["repeat"], "repeat all");
    assert_eq!(status["paused"], false);
}

#[test]
fn listener_wrapped_counts_each_full_play() {
    // 350s on repeat all: three full plays, then 50s into the first track again
    let outputs = run_scenario();
    let report = outputs[8].result.as_ref().unwrap();
    assert_eq!(report["topArtists"]["Muse"], 3);
    assert_eq!(report["topSongs"]["Apocalypse Please"], 1);
    assert_eq!(report["topSongs"]["Time Is Running Out"], 1);
    assert_eq!(report["topGenres"]["rock"], 3);
    assert_eq!(report["topAlbums"]["Absolution"], 3);

    let songs: Vec<&String> = report["topSongs"].as_object().unwrap().keys().collect();
    assert_eq!(
        songs,
        vec![
            "Apocalypse Please",
            "Sing for Absolution",
            "Time Is Running Out"
        ]
    );
}

#[test]
fn podcast_listener_has_no_wrapped() {
    let outputs = run_scenario();
    assert_eq!(message(&outputs[9]), "No data to show for user bob.");
}

#[test]
fn artist_wrapped_reaches_one_listener() {
    let outputs = run_scenario();
    let report = outputs[10].result.as_ref().unwrap();
    assert_eq!(report["topFans"], serde_json::json!(["alice"]));
    assert_eq!(report["listeners"], 1);
    assert_eq!(report["cities"], 1);
}

#[test]
fn configured_limit_truncates_rankings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replay.toml");
    fs::write(&path, "[session]\nwrapped_limit = 1\n").unwrap();

    let config = ReplayConfig::load(Some(&path)).unwrap();
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    let outputs = replay(&scenario, &config).unwrap();

    let report = outputs[8].result.as_ref().unwrap();
    // All songs tie at one play; the alphabetically first one is kept
    assert_eq!(report["topSongs"].as_object().unwrap().len(), 1);
    assert_eq!(report["topSongs"]["Apocalypse Please"], 1);
}

#[test]
fn render_is_a_json_array() {
    let outputs = run_scenario();
    let compact = render(&outputs, false).unwrap();
    let pretty = render(&outputs, true).unwrap();

    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));

    let parsed: serde_json::Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), outputs.len());
    assert!(parsed[0].get("result").is_none());
}

// ===== Binary =====

#[test]
fn binary_prints_results() {
    let dir = tempfile::tempdir().unwrap();
    let scenario_path = dir.path().join("scenario.json");
    fs::write(&scenario_path, SCENARIO).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_soul-replay"))
        .arg(&scenario_path)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 12);
    assert_eq!(results[0]["message"], "Playback loaded successfully.");
}

#[test]
fn binary_fails_on_missing_scenario() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_soul-replay"))
        .arg(dir.path().join("absent.json"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read scenario"));
}
