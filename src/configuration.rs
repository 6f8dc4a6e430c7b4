//! Config for the launcher behaviors
//!
//! This module locates the agent, the simulator, the replay directory and the build commands,
//! and controls progress output and logging.
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration values. All
//! values are optional. Flags are case-insensitive: set the value to `"true"` to enable one.
//!
//! - `MATCH_VERBOSE`: Print phase progress to stdout (default: `true`)
//! - `MATCH_LOG`: Enable logging to a file (default: `false`)
//! - `MATCH_LOG_DIR`: Directory for the log file (default: `.`)
//! - `MATCH_WORKING_DIR`: Directory every other path is relative to (default: `.`)
//! - `MATCH_SIMULATOR`: Simulator executable (default: `./halite`)
//! - `MATCH_AGENT`: Agent executable produced by the build (default: `./MyBot`)
//! - `MATCH_REPLAY_DIR`: Replay output directory (default: `replays/`)

use std::{fmt::Display, path::PathBuf};

/// One command of the agent build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
}

impl BuildStep {
    /// A step running `program` with `args`.
    pub fn new(program: impl Into<String>, args: &[&str]) -> BuildStep {
        BuildStep {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Configuration for launcher behaviors.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) log_dir: PathBuf,
    pub(crate) working_dir: PathBuf,
    pub(crate) simulator_path: PathBuf,
    pub(crate) agent_path: PathBuf,
    pub(crate) replay_dir: String,
    pub(crate) build_steps: Vec<BuildStep>,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The launcher will print phase progress to stdout.
    /// - Logging to file is disabled.
    /// - Paths are relative to the current directory.
    /// - The agent is built with `cmake .` then `make`, producing `./MyBot`.
    /// - The simulator is `./halite` and replays go to `replays/`.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            log_dir: PathBuf::from("."),
            working_dir: PathBuf::from("."),
            simulator_path: PathBuf::from("./halite"),
            agent_path: PathBuf::from("./MyBot"),
            replay_dir: "replays/".to_owned(),
            build_steps: vec![BuildStep::new("cmake", &["."]), BuildStep::new("make", &[])],
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Every variable listed in the [module documentation](self) overrides the matching
    /// default. Any other value (including unset) keeps the default.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        fn get_env_string(var: &str) -> Option<String> {
            std::env::var(var).ok().filter(|val| !val.is_empty())
        }

        let mut config = Self::new()
            .with_verbose(get_env_flag("MATCH_VERBOSE", true))
            .with_log(get_env_flag("MATCH_LOG", false));
        if let Some(dir) = get_env_string("MATCH_LOG_DIR") {
            config = config.with_log_dir(dir);
        }
        if let Some(dir) = get_env_string("MATCH_WORKING_DIR") {
            config = config.with_working_dir(dir);
        }
        if let Some(path) = get_env_string("MATCH_SIMULATOR") {
            config = config.with_simulator_path(path);
        }
        if let Some(path) = get_env_string("MATCH_AGENT") {
            config = config.with_agent_path(path);
        }
        if let Some(dir) = get_env_string("MATCH_REPLAY_DIR") {
            config = config.with_replay_dir(dir);
        }
        config
    }

    /// Enable or disable progress output.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Directory the log file is created in.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Directory builds and matches run in.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Simulator executable, relative to the working directory.
    pub fn with_simulator_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.simulator_path = path.into();
        self
    }

    /// Agent executable, relative to the working directory. Always seat 0.
    pub fn with_agent_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.agent_path = path.into();
        self
    }

    /// Replay directory handed to the simulator.
    ///
    /// A trailing `/` is added when missing. An empty value keeps the current directory.
    pub fn with_replay_dir(mut self, dir: impl Into<String>) -> Self {
        let mut dir = dir.into();
        if dir.trim().is_empty() {
            return self;
        }
        if !dir.ends_with('/') {
            dir.push('/');
        }
        self.replay_dir = dir;
        self
    }

    /// Replace the build commands. They run in order, and all must succeed.
    pub fn with_build_steps(mut self, steps: Vec<BuildStep>) -> Self {
        self.build_steps = steps;
        self
    }

    /// The agent executable path.
    pub fn agent_path(&self) -> &std::path::Path {
        &self.agent_path
    }

    /// Directory to create the log file in, when logging to file is enabled.
    pub fn log_file_dir(&self) -> Option<&std::path::Path> {
        self.log.then_some(self.log_dir.as_path())
    }

    /// The replay directory, always ending with `/`.
    pub fn replay_dir(&self) -> &str {
        &self.replay_dir
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
