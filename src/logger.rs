use std::{fs::File, path::Path};

use anyhow::Context;
use time::{
    format_description::{self, parse},
    OffsetDateTime,
};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

/// Installs a global subscriber writing every event to a timestamped file in `dir`.
pub fn init_logger(dir: &Path) -> anyhow::Result<()> {
    let path = dir.join(get_log_file_name()?);
    let file = File::create(&path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let writer = BoxMakeWriter::new(file);
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        local_offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    set_global_default(subscriber)
        .context("could not set global default tracing subscriber, one is already set")
}

fn get_log_file_name() -> anyhow::Result<String> {
    let format = parse("[year]-[month]-[day]_[hour]-[minute]-[second]_match_log.txt")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(&format)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name_is_timestamped() {
        let name = get_log_file_name().unwrap();
        assert!(name.ends_with("_match_log.txt"));
        assert!(!name.contains(':'));
    }
}
