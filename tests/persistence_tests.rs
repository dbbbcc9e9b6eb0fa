//! Progress files and configuration loading across runs

mod common;

use common::{CommandLog, FakeEngine};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use wayfarer::events::catalogue::{FIVE_COINS, LANTERN_AND_CAN, LOCKED_DOOR};
use wayfarer::storage::{self, Progress};
use wayfarer::{AgentConfig, Checkpoint, Direction, Explorer, LifeOutcome, OpenEventSet};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wayfarer-{}-{}", std::process::id(), name))
}

fn config(seed: u64) -> AgentConfig {
    AgentConfig {
        seed: Some(seed),
        max_lives: Some(200),
        ..AgentConfig::default()
    }
}

/// Run a fresh explorer to completion, saving progress to `path`
fn finished_progress(seed: u64, path: &Path) -> Progress {
    let _ = std::fs::remove_file(path);
    let config = AgentConfig {
        checkpoint_path: Some(path.to_path_buf()),
        ..config(seed)
    };
    let mut explorer = Explorer::standard(config).unwrap();
    explorer.run(|| Ok(FakeEngine::new())).unwrap();
    storage::read_file(path).unwrap().expect("run should save progress")
}

#[test]
fn run_persists_the_latest_checkpoint_and_open_events() {
    let path = temp_path("persist.json");
    let _ = std::fs::remove_file(&path);

    let config = AgentConfig {
        checkpoint_path: Some(path.clone()),
        ..config(9)
    };
    let mut explorer = Explorer::standard(config).unwrap();
    explorer.run(|| Ok(FakeEngine::new())).unwrap();

    let stored = storage::read_file(&path).unwrap().expect("file was written");
    assert_eq!(Some(&stored.checkpoint), explorer.checkpoints().current());
    assert!(stored.open.is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn resumed_explorer_replays_stored_progress_first() {
    let path = temp_path("resume.json");
    let saved = Progress::new(
        Checkpoint::new(
            vec!["take empty lantern".to_string(), "take tablet".to_string()],
            vec![Direction::from("north")],
        ),
        OpenEventSet::new([LANTERN_AND_CAN]),
    );
    storage::write_file(&path, &saved).unwrap();
    let stored = storage::read_file(&path).unwrap().expect("file was written");
    assert_eq!(stored, saved);

    let log = CommandLog::default();
    let mut explorer = Explorer::standard(config(2)).unwrap().resume(stored).unwrap();
    let outcome = explorer.play_life(FakeEngine::with_log(log.clone())).unwrap();

    assert!(matches!(outcome, LifeOutcome::Completed { .. }));
    let sent = log.borrow();
    assert_eq!(
        &sent[..4],
        &["take empty lantern", "take tablet", "north", "take can"]
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn resuming_a_finished_run_fires_nothing() {
    let path = temp_path("finished.json");
    let progress = finished_progress(5, &path);

    let spawned = Cell::new(0);
    let mut explorer = Explorer::standard(config(5))
        .unwrap()
        .resume(progress.clone())
        .unwrap();
    assert!(explorer.is_complete());
    let summary = explorer
        .run(|| {
            spawned.set(spawned.get() + 1);
            Ok(FakeEngine::new())
        })
        .unwrap();
    assert_eq!(spawned.get(), 0);
    assert_eq!(summary.lives, 0);
    assert!(summary.resolutions.is_empty());

    // Replaying the whole log on a live engine reaches the end without
    // re-sending any event's commands.
    let log = CommandLog::default();
    let mut explorer = Explorer::standard(config(5)).unwrap().resume(progress.clone()).unwrap();
    let outcome = explorer.play_life(FakeEngine::with_log(log.clone())).unwrap();
    assert!(matches!(outcome, LifeOutcome::Completed { .. }));
    assert!(explorer.resolutions().is_empty());
    let sent = log.borrow();
    assert_eq!(&sent[..progress.checkpoint.actions.len()], &progress.checkpoint.actions[..]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn resuming_after_the_lantern_does_not_light_it_again() {
    let progress = Progress::new(
        Checkpoint::new(
            [
                "take empty lantern",
                "take tablet",
                "north",
                "take can",
                "use can",
                "use lantern",
            ]
            .map(String::from)
            .to_vec(),
            vec![Direction::from("south")],
        ),
        OpenEventSet::new([LOCKED_DOOR, FIVE_COINS]),
    );

    let mut explorer = Explorer::standard(config(11)).unwrap().resume(progress).unwrap();
    let summary = explorer.run(|| Ok(FakeEngine::new())).unwrap();

    assert!(explorer.is_complete());
    assert!(summary.resolutions.iter().all(|r| r.toast != "Lantern lit!"));
    assert!(summary.resolutions.iter().any(|r| r.toast == "Read book"));
}

#[test]
fn progress_naming_unknown_events_is_refused() {
    let progress = Progress::new(
        Checkpoint::new(vec!["take tablet".to_string()], vec![Direction::from("north")]),
        OpenEventSet::new(["polish_mirror"]),
    );
    assert!(Explorer::standard(config(1)).unwrap().resume(progress).is_err());
}

#[test]
fn config_file_drives_the_run() {
    let path = temp_path("config.json");
    std::fs::write(
        &path,
        r#"{ "seed": 17, "max_lives": 200, "protocol": { "ambiguity_marker": "twisty" } }"#,
    )
    .unwrap();

    let config = AgentConfig::load(&path).unwrap();
    assert_eq!(config.seed, Some(17));
    assert_eq!(config.protocol.ambiguity_marker, "twisty");
    assert_eq!(config.protocol.prompt, common::PROMPT);

    let mut explorer = Explorer::standard(config).unwrap();
    let summary = explorer.run(|| Ok(FakeEngine::new())).unwrap();
    assert!(summary.lives >= 1);
    assert!(explorer.is_complete());

    let _ = std::fs::remove_file(&path);
}
