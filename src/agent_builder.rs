use std::{
    io::{BufRead, BufReader, Read},
    process::{Command, Stdio},
};

use tracing::{error, info, instrument};

use crate::configuration::{BuildStep, Configuration};
use crate::error::{LauncherError, LauncherResult};

/// Runs every build step of `config` in order, stopping at the first failure.
///
/// On success the agent executable at `config.agent_path` is current.
#[instrument(skip_all, fields(working_dir = %config.working_dir.display()))]
pub fn build_agent(config: &Configuration) -> LauncherResult<()> {
    for step in &config.build_steps {
        run_step(step, config)?;
    }
    info!("agent built");
    Ok(())
}

fn run_step(step: &BuildStep, config: &Configuration) -> LauncherResult<()> {
    info!(%step, "running build step");
    let stdout = if config.verbose {
        Stdio::inherit()
    } else {
        Stdio::null()
    };
    let failed = |code| LauncherError::BuildFailed {
        step: step.to_string(),
        code,
    };

    let mut proc = Command::new(&step.program)
        .args(&step.args)
        .current_dir(&config.working_dir)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            error!("could not launch '{step}': {e}");
            failed(None)
        })?;

    let first_error = match proc.stderr.take() {
        Some(stderr) => forward_stderr(stderr, config.verbose),
        None => None,
    };

    let status = proc.wait().map_err(|e| {
        error!("failed to wait for '{step}': {e}");
        failed(None)
    })?;
    if status.success() {
        return Ok(());
    }

    error!(
        "build step '{step}' failed: {}",
        first_error.as_deref().unwrap_or_default()
    );
    Err(failed(status.code()))
}

/// Echoes the build tool's stderr as it arrives, when `verbose`, and returns its first
/// non-blank line.
fn forward_stderr(stderr: impl Read, verbose: bool) -> Option<String> {
    let mut first = None;
    for line in BufReader::new(stderr).lines() {
        let Ok(line) = line else {
            break;
        };
        if verbose {
            eprintln!("{line}");
        }
        if first.is_none() && !line.trim().is_empty() {
            first = Some(line.trim().to_owned());
        }
    }
    first
}
