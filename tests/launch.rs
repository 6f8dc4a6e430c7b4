#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use match_launcher::prelude::*;
use tempfile::TempDir;
use tracing::Level;

/// Routes launcher events through the test harness output.
fn init_test_logger() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

// Writing an executable while another test thread forks can make exec fail with ETXTBSY.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Fake simulator: records its arguments in `args.txt` and exits with `code`.
fn fake_simulator(dir: &Path, code: i32) -> PathBuf {
    let path = dir.join("fake_halite.sh");
    fs::write(
        &path,
        format!("#!/bin/sh\necho \"$@\" > args.txt\nexit {code}\n"),
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config_for(dir: &TempDir, simulator: PathBuf, build_ok: bool) -> Configuration {
    let build = if build_ok { "true" } else { "false" };
    Configuration::new()
        .with_verbose(false)
        .with_working_dir(dir.path())
        .with_simulator_path(simulator)
        .with_build_steps(vec![
            BuildStep::new("true", &[]),
            BuildStep::new(build, &[]),
        ])
}

fn recorded_args(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("args.txt"))
        .unwrap()
        .trim_end()
        .to_owned()
}

#[test]
fn full_pass_runs_the_exact_command_line() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let simulator = fake_simulator(dir.path(), 0);
    let mut launcher = MatchLauncher::new(config_for(&dir, simulator, true));

    let request = MatchRequest::from_preset(MatchPreset::Standard).with_seed(Some(12345));
    let played = launcher.run(&request).unwrap();

    assert_eq!(launcher.phase(), MatchPhase::Completed);
    assert_eq!(played.seed.value(), 12345);
    assert_eq!(
        recorded_args(&dir),
        "--replay-directory replays/ --width 48 --height 48 --no-timeout -vvv --seed 12345 \
         ./MyBot ./bots/Jan1 ./bots/Jan1 ./bots/Jan1"
    );
}

#[test]
fn random_seed_is_reported_back() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let simulator = fake_simulator(dir.path(), 0);
    let mut launcher = MatchLauncher::new(config_for(&dir, simulator, true));

    let played = launcher
        .run(&MatchRequest::from_preset(MatchPreset::OneShip))
        .unwrap();

    assert!(played.seed.value() <= MatchSeed::MAX);
    assert_eq!(
        recorded_args(&dir),
        format!(
            "--replay-directory replays/ -vvv --seed {} ./MyBot ./bots/Dec28OneShip",
            played.seed
        )
    );
}

#[test]
fn build_failure_never_starts_the_simulator() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let simulator = fake_simulator(dir.path(), 0);
    let mut launcher = MatchLauncher::new(config_for(&dir, simulator, false));

    let err = launcher
        .run(&MatchRequest::default().with_seed(Some(1)))
        .unwrap_err();

    assert!(matches!(err, LauncherError::BuildFailed { code: Some(1), .. }));
    assert_eq!(launcher.phase(), MatchPhase::BuildFailed);
    assert!(!dir.path().join("args.txt").exists());
}

#[test]
fn launch_returns_the_simulator_status() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let roster = resolve_roster("./MyBot", "./bots/IdleBot", 1).unwrap();
    let board = MatchPreset::Solo.board();
    let seed = MatchSeed::new(77).unwrap();

    for code in [0, 3] {
        let dir = tempfile::tempdir().unwrap();
        let simulator = fake_simulator(dir.path(), code);
        let launcher = MatchLauncher::new(config_for(&dir, simulator, true));

        let status = launcher.launch(&roster, &board, seed).unwrap();
        assert_eq!(status.code(), Some(code));
        assert_eq!(status.success(), code == 0);
    }
}

#[test]
fn simulator_failure_is_a_launch_failure() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let simulator = fake_simulator(dir.path(), 4);
    let mut launcher = MatchLauncher::new(config_for(&dir, simulator, true));

    let err = launcher
        .run(&MatchRequest::from_preset(MatchPreset::Mirror).with_seed(Some(5)))
        .unwrap_err();

    assert!(matches!(err, LauncherError::LaunchFailed { code: Some(4) }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(launcher.phase(), MatchPhase::LaunchFailed);
    assert_eq!(
        recorded_args(&dir),
        "--replay-directory replays/ --width 64 --height 64 --no-timeout -vvv --seed 5 \
         ./MyBot ./MyBot"
    );
}

#[test]
fn missing_simulator_is_a_launch_failure() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let simulator = dir.path().join("no_such_simulator");
    let mut launcher = MatchLauncher::new(config_for(&dir, simulator, true));

    let err = launcher
        .run(&MatchRequest::default().with_seed(Some(1)))
        .unwrap_err();

    assert!(matches!(err, LauncherError::LaunchFailed { code: None }));
    assert_eq!(launcher.phase(), MatchPhase::LaunchFailed);
}

#[test]
fn custom_replay_directory_is_forwarded() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let simulator = fake_simulator(dir.path(), 0);
    let config = config_for(&dir, simulator, true).with_replay_dir("out/replays");
    let mut launcher = MatchLauncher::new(config);

    let request = MatchRequest {
        opponent: Some("./bots/Jan1".into()),
        opponent_count: 2,
        board: BoardConfig::new().with_no_logs(true),
        seed: Some(0),
    };
    launcher.run(&request).unwrap();

    assert_eq!(
        recorded_args(&dir),
        "--replay-directory out/replays/ --no-logs -vvv --seed 0 ./MyBot ./bots/Jan1 ./bots/Jan1"
    );
}
