use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use match_launcher::prelude::*;
use tracing::{error, info};

/// Build the agent, then run one match of it against reference bots.
#[derive(Parser, Debug)]
#[command(name = "match-launcher", version, about, long_about = None)]
struct Cli {
    /// Seed to replay, in [0, 2^31 - 1]. A random one is drawn when omitted
    #[arg(allow_negative_numbers = true)]
    seed: Option<String>,

    /// Opponent selection and board to start from
    #[arg(short, long, default_value_t = MatchPreset::Standard)]
    preset: MatchPreset,

    /// Opponent executable, overrides the preset's
    #[arg(short, long)]
    opponent: Option<PathBuf>,

    /// Number of copies of the opponent, overrides the preset's
    #[arg(short = 'n', long)]
    opponents: Option<usize>,

    /// Board width, overrides the preset's
    #[arg(long)]
    width: Option<u32>,

    /// Board height, overrides the preset's
    #[arg(long)]
    height: Option<u32>,

    /// Disable the simulator's per-turn timeout
    #[arg(long)]
    no_timeout: bool,

    /// Suppress the simulator's per-player logs
    #[arg(long)]
    no_logs: bool,

    /// Directory replays are written to
    #[arg(long)]
    replay_directory: Option<String>,

    /// Simulator executable
    #[arg(long)]
    simulator: Option<PathBuf>,

    /// Agent executable produced by the build
    #[arg(long)]
    agent: Option<PathBuf>,

    /// Directory the build and the match run in
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Write a log file into this directory
    #[arg(long)]
    log: Option<PathBuf>,

    /// Only print the simulator's own output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn configuration(&self) -> Configuration {
        let mut config = Configuration::from_env();
        if self.quiet {
            config = config.with_verbose(false);
        }
        if let Some(dir) = &self.log {
            config = config.with_log(true).with_log_dir(dir);
        }
        if let Some(dir) = &self.working_dir {
            config = config.with_working_dir(dir);
        }
        if let Some(path) = &self.simulator {
            config = config.with_simulator_path(path);
        }
        if let Some(path) = &self.agent {
            config = config.with_agent_path(path);
        }
        if let Some(dir) = &self.replay_directory {
            config = config.with_replay_dir(dir.as_str());
        }
        config
    }

    fn request(&self) -> LauncherResult<MatchRequest> {
        let seed = match &self.seed {
            Some(text) => Some(i64::from(text.parse::<MatchSeed>()?.value())),
            None => None,
        };

        let mut request = MatchRequest::from_preset(self.preset).with_seed(seed);
        if let Some(opponent) = &self.opponent {
            request.opponent = Some(opponent.clone());
        }
        if let Some(count) = self.opponents {
            request.opponent_count = count;
        }
        if let Some(width) = self.width {
            request.board = request.board.with_width(width);
        }
        if let Some(height) = self.height {
            request.board = request.board.with_height(height);
        }
        if self.no_timeout {
            request.board = request.board.with_no_timeout(true);
        }
        if self.no_logs {
            request.board = request.board.with_no_logs(true);
        }
        Ok(request)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.configuration();

    if let Some(dir) = config.log_file_dir() {
        if let Err(e) = match_launcher::init_logger(dir) {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    }

    let result = cli
        .request()
        .and_then(|request| MatchLauncher::new(config).run(&request));

    match result {
        Ok(played) => {
            info!(seed = %played.seed, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(phase = e.phase(), "{e}");
            eprintln!("Error ({} phase): {e}", e.phase());
            ExitCode::from(exit_byte(e.exit_code()))
        }
    }
}

/// Clamps an exit code to what a process can report.
fn exit_byte(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_seed_is_optional() {
        let cli = Cli::try_parse_from(["match-launcher"]).unwrap();
        let request = cli.request().unwrap();
        assert_eq!(request.seed, None);
        assert_eq!(request, MatchRequest::from_preset(MatchPreset::Standard));

        let cli = Cli::try_parse_from(["match-launcher", "12345"]).unwrap();
        assert_eq!(cli.request().unwrap().seed, Some(12345));
    }

    #[test]
    fn bad_seed_is_an_invalid_configuration() {
        let cli = Cli::try_parse_from(["match-launcher", "-1"]).unwrap();
        assert!(matches!(
            cli.request(),
            Err(LauncherError::InvalidConfiguration(_))
        ));

        let cli = Cli::try_parse_from(["match-launcher", "4294967296"]).unwrap();
        assert!(matches!(
            cli.request(),
            Err(LauncherError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn options_override_the_preset() {
        let cli = Cli::try_parse_from([
            "match-launcher",
            "--preset",
            "solo",
            "--opponent",
            "./bots/Other",
            "-n",
            "2",
            "--height",
            "32",
            "--no-logs",
        ])
        .unwrap();
        let request = cli.request().unwrap();
        assert_eq!(request.opponent, Some(PathBuf::from("./bots/Other")));
        assert_eq!(request.opponent_count, 2);
        assert_eq!(request.board.width(), Some(64));
        assert_eq!(request.board.height(), Some(32));
        assert!(request.board.no_logs());
        assert!(!request.board.no_timeout());
    }

    #[test]
    fn empty_replay_directory_keeps_the_default() {
        let cli = Cli::try_parse_from(["match-launcher", "--replay-directory", ""]).unwrap();
        assert_ne!(cli.configuration().replay_dir(), "/");

        let cli = Cli::try_parse_from(["match-launcher", "--replay-directory", "runs"]).unwrap();
        assert_eq!(cli.configuration().replay_dir(), "runs/");
    }

    #[test]
    fn exit_codes_fit_in_a_byte() {
        assert_eq!(exit_byte(3), 3);
        assert_eq!(exit_byte(0), 1);
        assert_eq!(exit_byte(-1), 1);
        assert_eq!(exit_byte(300), 1);
    }
}
