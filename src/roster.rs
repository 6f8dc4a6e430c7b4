//! Match participants.
//!
//! The simulator assigns seats by position, so order matters: the agent under test is always
//! seat 0, followed by the reference bots.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::error::{LauncherError, LauncherResult};

/// Path to one participant executable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterEntry {
    path: PathBuf,
}

impl RosterEntry {
    /// Entry for the executable at `path`.
    pub fn new(path: impl Into<PathBuf>) -> RosterEntry {
        RosterEntry { path: path.into() }
    }

    /// Executable path, as given.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for RosterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Ordered list of participants: the agent, then at least one opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// All entries in seat order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// The agent under test (seat 0).
    pub fn agent(&self) -> &RosterEntry {
        &self.entries[0]
    }

    /// Reference bots (seats 1 and up).
    pub fn opponents(&self) -> &[RosterEntry] {
        &self.entries[1..]
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, a roster holds at least two entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .entries
            .iter()
            .map(RosterEntry::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{names}")
    }
}

/// Builds `[agent] + [opponent] * opponent_count`.
///
/// # Errors
///
/// `InvalidConfiguration` if `opponent_count` is zero.
pub fn resolve_roster(
    agent_path: impl AsRef<Path>,
    opponent_path: impl AsRef<Path>,
    opponent_count: usize,
) -> LauncherResult<Roster> {
    if opponent_count < 1 {
        return Err(LauncherError::InvalidConfiguration(
            "a match needs at least one opponent".to_owned(),
        ));
    }
    let opponent = RosterEntry::new(opponent_path.as_ref());
    let mut entries = Vec::with_capacity(opponent_count + 1);
    entries.push(RosterEntry::new(agent_path.as_ref()));
    entries.extend(std::iter::repeat(opponent).take(opponent_count));
    Ok(Roster { entries })
}
