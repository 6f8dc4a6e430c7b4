//! Errors reported by the launcher.
//!
//! Every failure is terminal: nothing is retried, and a failed build never reaches the
//! simulator.

/// Errors produced while preparing or running a match.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    /// A build step exited non-zero or could not be started.
    #[error("build step '{step}' failed{}", describe_code(.code))]
    BuildFailed {
        /// The command line of the failing step.
        step: String,
        /// Exit code of the step, `None` if it never ran or was killed by a signal.
        code: Option<i32>,
    },

    /// A seed, opponent count or board dimension is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The simulator could not be started, or exited non-zero.
    #[error("simulator failed{}", describe_code(.code))]
    LaunchFailed {
        /// Exit code of the simulator, `None` if it never ran or was killed by a signal.
        code: Option<i32>,
    },
}

impl LauncherError {
    /// Process exit code matching this error.
    ///
    /// A simulator failure forwards the simulator's own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::LaunchFailed { code: Some(code) } => *code,
            LauncherError::InvalidConfiguration(_) => 2,
            _ => 1,
        }
    }

    /// Name of the phase that failed, for diagnostics.
    pub fn phase(&self) -> &'static str {
        match self {
            LauncherError::BuildFailed { .. } => "build",
            LauncherError::InvalidConfiguration(_) => "configuration",
            LauncherError::LaunchFailed { .. } => "launch",
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => String::new(),
    }
}

/// Result type for launcher operations.
pub type LauncherResult<T> = std::result::Result<T, LauncherError>;
