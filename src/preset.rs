//! Named match variants.
//!
//! Each preset bundles one opponent, how many copies of it play, and a board. Callers can
//! still override any of these on top of a preset.

use std::{fmt::Display, path::PathBuf, str::FromStr};

use crate::board::BoardConfig;
use crate::error::LauncherError;

/// Built-in opponent and board selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchPreset {
    /// Three `Jan1` bots on a 48x48 board without turn timeout.
    #[default]
    Standard,
    /// Three `Dec19NoDropoff` bots on a 64x64 board without turn timeout.
    NoDropoff,
    /// One `Dec28OneShip` bot, simulator default board.
    OneShip,
    /// One `IdleBot` on a 64x64 board.
    Solo,
    /// The agent against a copy of itself on a 64x64 board without turn timeout.
    Mirror,
}

impl MatchPreset {
    /// Every preset, in a stable order.
    pub const ALL: [MatchPreset; 5] = [
        MatchPreset::Standard,
        MatchPreset::NoDropoff,
        MatchPreset::OneShip,
        MatchPreset::Solo,
        MatchPreset::Mirror,
    ];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            MatchPreset::Standard => "standard",
            MatchPreset::NoDropoff => "no-dropoff",
            MatchPreset::OneShip => "one-ship",
            MatchPreset::Solo => "solo",
            MatchPreset::Mirror => "mirror",
        }
    }

    /// Opponent executable, or `None` when the agent plays itself.
    pub fn opponent(self) -> Option<PathBuf> {
        let path = match self {
            MatchPreset::Standard => "./bots/Jan1",
            MatchPreset::NoDropoff => "./bots/Dec19NoDropoff",
            MatchPreset::OneShip => "./bots/Dec28OneShip",
            MatchPreset::Solo => "./bots/IdleBot",
            MatchPreset::Mirror => return None,
        };
        Some(PathBuf::from(path))
    }

    /// Copies of the opponent.
    pub fn opponent_count(self) -> usize {
        match self {
            MatchPreset::Standard | MatchPreset::NoDropoff => 3,
            MatchPreset::OneShip | MatchPreset::Solo | MatchPreset::Mirror => 1,
        }
    }

    /// Board size and flags.
    pub fn board(self) -> BoardConfig {
        match self {
            MatchPreset::Standard => BoardConfig::new().with_size(48, 48).with_no_timeout(true),
            MatchPreset::NoDropoff | MatchPreset::Mirror => {
                BoardConfig::new().with_size(64, 64).with_no_timeout(true)
            }
            MatchPreset::OneShip => BoardConfig::new(),
            MatchPreset::Solo => BoardConfig::new().with_size(64, 64),
        }
    }
}

impl Display for MatchPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchPreset {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known = MatchPreset::ALL.map(MatchPreset::name).join(", ");
                LauncherError::InvalidConfiguration(format!(
                    "unknown preset '{s}' (expected one of: {known})"
                ))
            })
    }
}
