//! Core launch logic for running one simulated match.
//!
//! This module defines the [`MatchLauncher`] type, which orchestrates a single match.
//! Its responsibilities include:
//!
//! - Validating the roster, seed and board before any process is spawned
//! - Building the agent, and refusing to go further if the build fails
//! - Building the simulator command line, in the exact order the simulator expects
//! - Running the simulator in the foreground and reporting its exit status
//!
//! # Command Line
//!
//! ```text
//! <simulator> --replay-directory <dir>/ [--width W] [--height H]
//!             [--no-timeout] [--no-logs] -vvv
//!             --seed <seed> <participant1> <participant2> ...
//! ```
//!
//! Game rules, scoring and replay writing all belong to the simulator. The launcher never reads
//! its output.
//!
//! # Example
//!
//! ```no_run
//! use match_launcher::prelude::*;
//!
//! let mut launcher = MatchLauncher::new(Configuration::new());
//! let request = MatchRequest::from_preset(MatchPreset::OneShip).with_seed(Some(42));
//! let played = launcher.run(&request)?;
//! println!("replay seed: {}", played.seed);
//! # Ok::<(), match_launcher::error::LauncherError>(())
//! ```

use std::{
    fmt::Display,
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};

use tracing::{error, info, instrument, trace};

use crate::agent_builder::build_agent;
use crate::board::BoardConfig;
use crate::configuration::Configuration;
use crate::error::{LauncherError, LauncherResult};
use crate::preset::MatchPreset;
use crate::roster::{resolve_roster, Roster};
use crate::seed::{resolve_seed, MatchSeed};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Where a launcher is in its single pass.
///
/// `Idle → Building → (BuildFailed | Built) → Launching → (LaunchFailed | Completed)`.
/// `BuildFailed`, `LaunchFailed` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Nothing ran yet.
    #[default]
    Idle,
    /// Build steps are running.
    Building,
    /// A build step failed, no match will start.
    BuildFailed,
    /// The agent is up to date.
    Built,
    /// The simulator is running.
    Launching,
    /// The simulator could not start or exited non-zero.
    LaunchFailed,
    /// The simulator exited successfully.
    Completed,
}

impl Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The high-level choices for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    /// Opponent executable. `None` makes the agent play against itself.
    pub opponent: Option<PathBuf>,
    /// Copies of the opponent in the match, at least one.
    pub opponent_count: usize,
    /// Board size and flags.
    pub board: BoardConfig,
    /// Pinned seed, or `None` for a random one.
    pub seed: Option<i64>,
}

impl MatchRequest {
    /// Request matching a built-in preset, with a random seed.
    pub fn from_preset(preset: MatchPreset) -> MatchRequest {
        MatchRequest {
            opponent: preset.opponent(),
            opponent_count: preset.opponent_count(),
            board: preset.board(),
            seed: None,
        }
    }

    /// Pins (or unpins) the seed.
    #[must_use]
    pub fn with_seed(self, seed: Option<i64>) -> Self {
        Self { seed, ..self }
    }
}

impl Default for MatchRequest {
    fn default() -> Self {
        Self::from_preset(MatchPreset::default())
    }
}

/// What was played by a successful [`MatchLauncher::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMatch {
    /// Seed the simulator ran with. Passing it back replays the match.
    pub seed: MatchSeed,
    /// Participants, in seat order.
    pub roster: Roster,
    /// Board used.
    pub board: BoardConfig,
}

/// Arguments passed to the simulator, in order.
pub fn simulator_args(
    roster: &Roster,
    board: &BoardConfig,
    seed: MatchSeed,
    replay_dir: &str,
) -> Vec<String> {
    let mut args = vec!["--replay-directory".to_owned(), replay_dir.to_owned()];
    args.extend(board.to_args());
    args.push("-vvv".to_owned());
    args.push("--seed".to_owned());
    args.push(seed.to_string());
    args.extend(
        roster
            .entries()
            .iter()
            .map(|entry| entry.path().to_string_lossy().into_owned()),
    );
    args
}

/// Runs one build-then-match pass.
pub struct MatchLauncher {
    config: Configuration,
    phase: MatchPhase,
}

impl MatchLauncher {
    /// A launcher in the [`MatchPhase::Idle`] phase.
    pub fn new(config: Configuration) -> MatchLauncher {
        trace!(?config);
        MatchLauncher {
            config,
            phase: MatchPhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Launcher configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Validates `request`, builds the agent, then runs the simulator.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` before anything is spawned
    /// - `BuildFailed` when a build step fails; the simulator is then never started
    /// - `LaunchFailed` when the simulator cannot start or exits non-zero
    #[instrument(skip_all)]
    pub fn run(&mut self, request: &MatchRequest) -> LauncherResult<PlayedMatch> {
        let (roster, board, seed) = self.resolve(request)?;
        info!(%seed, %roster, %board, "match resolved");

        self.transition(MatchPhase::Building);
        if self.config.verbose {
            println!("Building agent...");
        }
        if let Err(e) = build_agent(&self.config) {
            self.transition(MatchPhase::BuildFailed);
            if self.config.verbose {
                println!("{RED}{e}{RESET}");
            }
            return Err(e);
        }
        self.transition(MatchPhase::Built);

        self.transition(MatchPhase::Launching);
        if self.config.verbose {
            println!("{GREEN}Running match{RESET} seed {seed} on {board}: {roster}");
        }
        let status = match self.launch(&roster, &board, seed) {
            Ok(status) => status,
            Err(e) => {
                self.transition(MatchPhase::LaunchFailed);
                return Err(e);
            }
        };

        if !status.success() {
            self.transition(MatchPhase::LaunchFailed);
            error!(%status, "simulator exited with failure");
            return Err(LauncherError::LaunchFailed {
                code: status.code(),
            });
        }
        self.transition(MatchPhase::Completed);
        if self.config.verbose {
            println!("{GREEN}Match finished{RESET} (seed {seed})");
        }

        Ok(PlayedMatch {
            seed,
            roster,
            board,
        })
    }

    /// Spawns the simulator in the foreground and waits for it.
    ///
    /// Its stdout and stderr are inherited so progress shows live. The returned status is the
    /// simulator's own, whatever its value.
    ///
    /// # Errors
    ///
    /// `LaunchFailed` when the simulator cannot be started.
    #[instrument(skip_all, fields(%seed))]
    pub fn launch(
        &self,
        roster: &Roster,
        board: &BoardConfig,
        seed: MatchSeed,
    ) -> LauncherResult<ExitStatus> {
        let args = simulator_args(roster, board, seed, &self.config.replay_dir);
        info!(simulator = %self.config.simulator_path.display(), ?args, "launching simulator");

        let status = Command::new(&self.config.simulator_path)
            .args(&args)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) => {
                info!(%status, "simulator exited");
                Ok(status)
            }
            Err(e) => {
                error!(
                    "could not launch simulator '{}': {e}",
                    self.config.simulator_path.display()
                );
                Err(LauncherError::LaunchFailed { code: None })
            }
        }
    }

    fn resolve(&self, request: &MatchRequest) -> LauncherResult<(Roster, BoardConfig, MatchSeed)> {
        let opponent = request
            .opponent
            .as_deref()
            .unwrap_or(self.config.agent_path.as_path());
        let roster = resolve_roster(&self.config.agent_path, opponent, request.opponent_count)?;
        request.board.validate()?;
        let seed = resolve_seed(request.seed)?;
        Ok((roster, request.board, seed))
    }

    fn transition(&mut self, to: MatchPhase) {
        info!(from = %self.phase, %to, "phase change");
        self.phase = to;
    }
}
