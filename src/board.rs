//! Board dimensions and simulator behavior flags.
//!
//! A [`BoardConfig`] is built with chainable setters, in the same way as the rest of the
//! launcher configuration:
//!
//! ```
//! use match_launcher::board::BoardConfig;
//!
//! let board = BoardConfig::new().with_size(48, 48).with_no_timeout(true);
//! assert_eq!(board.width(), Some(48));
//! ```
//!
//! Omitted dimensions are left to the simulator's own defaults.

use crate::error::{LauncherError, LauncherResult};

/// Board size plus the optional simulator flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardConfig {
    width: Option<u32>,
    height: Option<u32>,
    no_timeout: bool,
    no_logs: bool,
}

impl BoardConfig {
    /// Simulator defaults for everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both dimensions.
    #[must_use]
    pub fn with_size(self, width: u32, height: u32) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Sets the board width.
    #[must_use]
    pub fn with_width(self, width: u32) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    /// Sets the board height.
    #[must_use]
    pub fn with_height(self, height: u32) -> Self {
        Self {
            height: Some(height),
            ..self
        }
    }

    /// Disables the simulator's per-turn timeout.
    #[must_use]
    pub fn with_no_timeout(self, value: bool) -> Self {
        Self {
            no_timeout: value,
            ..self
        }
    }

    /// Suppresses the per-player log files the simulator writes.
    #[must_use]
    pub fn with_no_logs(self, value: bool) -> Self {
        Self {
            no_logs: value,
            ..self
        }
    }

    /// Board width, `None` for the simulator default.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Board height, `None` for the simulator default.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Whether `--no-timeout` is passed.
    pub fn no_timeout(&self) -> bool {
        self.no_timeout
    }

    /// Whether `--no-logs` is passed.
    pub fn no_logs(&self) -> bool {
        self.no_logs
    }

    /// Checks that given dimensions are positive.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when a dimension is zero.
    pub fn validate(&self) -> LauncherResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == Some(0) {
                return Err(LauncherError::InvalidConfiguration(format!(
                    "board {name} must be positive"
                )));
            }
        }
        Ok(())
    }

    /// Simulator flags for this board, in command-line order.
    pub(crate) fn to_args(self) -> Vec<String> {
        let mut args = vec![];
        if let Some(width) = self.width {
            args.push("--width".to_owned());
            args.push(width.to_string());
        }
        if let Some(height) = self.height {
            args.push("--height".to_owned());
            args.push(height.to_string());
        }
        if self.no_timeout {
            args.push("--no-timeout".to_owned());
        }
        if self.no_logs {
            args.push("--no-logs".to_owned());
        }
        args
    }
}

impl std::fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.width, self.height) {
            (Some(w), Some(h)) => write!(f, "{w}x{h}")?,
            (Some(w), None) => write!(f, "{w}x?")?,
            (None, Some(h)) => write!(f, "?x{h}")?,
            (None, None) => write!(f, "default size")?,
        }
        if self.no_timeout {
            write!(f, ", no timeout")?;
        }
        if self.no_logs {
            write!(f, ", no logs")?;
        }
        Ok(())
    }
}
