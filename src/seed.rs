//! Match seeds.
//!
//! A seed pins the simulator's internal randomness: the same seed, roster and board replay the
//! same match. When the caller does not pin one, a fresh seed is drawn uniformly from
//! `[0, MatchSeed::MAX]`.

use std::{fmt::Display, str::FromStr};

use rand::Rng;

use crate::error::{LauncherError, LauncherResult};

/// A 31-bit non-negative seed handed to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSeed(u32);

impl MatchSeed {
    /// Largest accepted seed, `2^31 - 1`.
    pub const MAX: u32 = (1 << 31) - 1;

    /// Checks that `value` lies in `[0, MatchSeed::MAX]`.
    pub fn new(value: i64) -> LauncherResult<MatchSeed> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(MatchSeed(value as u32))
        } else {
            Err(LauncherError::InvalidConfiguration(format!(
                "seed {value} is outside [0, {}]",
                Self::MAX
            )))
        }
    }

    /// Raw value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Display for MatchSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchSeed {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|e| {
            LauncherError::InvalidConfiguration(format!("seed '{s}' is not an integer ({e})"))
        })?;
        MatchSeed::new(value)
    }
}

/// Draws a seed uniformly from `[0, upper]` using the given generator.
///
/// `upper` is clamped to [`MatchSeed::MAX`].
pub fn random_seed<R: Rng>(rng: &mut R, upper: u32) -> MatchSeed {
    MatchSeed(rng.random_range(0..=upper.min(MatchSeed::MAX)))
}

/// Returns `explicit_seed` unchanged once validated, or a fresh random seed when absent.
pub fn resolve_seed(explicit_seed: Option<i64>) -> LauncherResult<MatchSeed> {
    match explicit_seed {
        Some(value) => MatchSeed::new(value),
        None => Ok(random_seed(&mut rand::rng(), MatchSeed::MAX)),
    }
}
