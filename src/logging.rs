use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Accepts `off`, `error`, `warn`, `info`, `debug`, `trace` (any case) or
/// their numeric forms; anything else is rejected.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .with_context(|| format!("invalid log level '{}'", level))
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// The terminal belongs to the TUI in interactive mode, so logs only go to
/// stderr when running headless; with no log file an interactive session
/// logs nothing.
pub fn init_logging(log_file: Option<&Path>, default_level: &str, interactive: bool) -> Result<()> {
    let level = parse_level(default_level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("failed to install log subscriber: {}", err))
        }
        None if !interactive => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!("failed to install log subscriber: {}", err)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert_eq!(parse_level("info").expect("info"), LevelFilter::INFO);
        assert_eq!(parse_level("DEBUG").expect("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("off").expect("off"), LevelFilter::OFF);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = parse_level("loud").unwrap_err();
        assert_eq!(err.to_string(), "invalid log level 'loud'");
    }

    #[test]
    fn init_rejects_unknown_level_before_touching_the_subscriber() {
        let err = init_logging(None, "loud", true).unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }
}
