//! # Match Launcher
//!
//! Builds a game agent and runs one reproducible match of it against reference bots inside an
//! external turn-based simulator.
//!
//! It provides:
//! - Agent building through an ordered list of build commands (`cmake .` then `make` by default)
//! - Roster selection: the agent always takes seat 0, followed by the opponents
//! - Seed selection: pinned for replaying a match, random otherwise
//! - Board size and simulator flags, with built-in [`MatchPreset`](crate::preset::MatchPreset)s
//! - A single foreground simulator run whose exit status is reported unchanged
//!
//! Game rules, scoring, timeouts and replay files are the simulator's business. The launcher
//! never reads match results.
//!
//! # Documentation Overview
//!
//! - For the build/launch sequence and the simulator command line, see the [`launcher`] module.
//! - For paths, build commands and logging, see
//! [`Configuration`](crate::configuration::Configuration).
//! - For the failure taxonomy, see [`LauncherError`](crate::error::LauncherError).
//!
//! # Usage Example
//!
//! ```no_run
//! use match_launcher::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Configuration::new().with_replay_dir("replays");
//!
//!     // Three copies of one reference bot on a 48x48 board, seed pinned for replay
//!     let request = MatchRequest {
//!         opponent: Some("./bots/Jan1".into()),
//!         opponent_count: 3,
//!         board: BoardConfig::new().with_size(48, 48).with_no_timeout(true),
//!         seed: Some(12345),
//!     };
//!
//!     let mut launcher = MatchLauncher::new(config);
//!     let played = launcher.run(&request)?;
//!     println!("played seed {} with {}", played.seed, played.roster);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub use anyhow;
mod agent_builder;
pub mod board;
pub mod configuration;
pub mod error;
pub mod launcher;
mod logger;
pub mod preset;
pub mod roster;
pub mod seed;

pub use agent_builder::build_agent;
pub use logger::init_logger;

/// Commonly used types for quick access.
///
/// ```rust
/// use match_launcher::prelude::*;
/// ```
pub mod prelude {
    pub use crate::board::BoardConfig;
    pub use crate::configuration::{BuildStep, Configuration};
    pub use crate::error::{LauncherError, LauncherResult};
    pub use crate::launcher::{MatchLauncher, MatchPhase, MatchRequest, PlayedMatch};
    pub use crate::preset::MatchPreset;
    pub use crate::roster::{resolve_roster, Roster, RosterEntry};
    pub use crate::seed::{resolve_seed, MatchSeed};
}
