// SPDX-License-Identifier: MIT
//
// Logging setup for the binary.
//
// Library crates only emit `tracing` events. This installs the subscriber:
// an `EnvFilter` (RUST_LOG wins when set) and a fmt layer on stderr, so
// stdout carries nothing but palette output.

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormatArg;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-oriented.
    Pretty,
    /// Single line per event.
    #[default]
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            format: LogFormat::default(),
            with_ansi: io::stderr().is_terminal(),
        }
    }
}

impl LogConfig {
    /// Level from `-v`/`-q` counts. Warnings by default.
    #[must_use]
    pub fn from_verbosity(verbose: u8, quiet: u8) -> Self {
        let level = match (verbose, quiet) {
            (_, 1) => LevelFilter::ERROR,
            (_, q) if q >= 2 => LevelFilter::OFF,
            (0, _) => LevelFilter::WARN,
            (1, _) => LevelFilter::INFO,
            (2, _) => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr).with_target(true))
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .without_time(),
            )
            .try_init()?,
    }
    Ok(())
}

/// `RUST_LOG` if set, otherwise our crates at `level` and everything else at warn.
fn build_env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let outer = if level == "off" || level == "error" { level.as_str() } else { "warn" };
    format!("{outer},hueforge={level},hf_theme={level},hf_color={level}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0, 0).level, LevelFilter::WARN);
        assert_eq!(LogConfig::from_verbosity(1, 0).level, LevelFilter::INFO);
        assert_eq!(LogConfig::from_verbosity(2, 0).level, LevelFilter::DEBUG);
        assert_eq!(LogConfig::from_verbosity(5, 0).level, LevelFilter::TRACE);
        assert_eq!(LogConfig::from_verbosity(0, 1).level, LevelFilter::ERROR);
        assert_eq!(LogConfig::from_verbosity(0, 3).level, LevelFilter::OFF);
    }

    #[test]
    fn directives_scope_our_crates() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,hueforge=debug,hf_theme=debug,hf_color=debug"
        );
    }

    #[test]
    fn quiet_directives_silence_everything() {
        assert_eq!(default_directives(LevelFilter::OFF), "off,hueforge=off,hf_theme=off,hf_color=off");
    }

    #[test]
    fn format_from_arg() {
        assert_eq!(LogFormat::from(LogFormatArg::Json), LogFormat::Json);
        assert_eq!(LogConfig::default().with_format(LogFormat::Pretty).format, LogFormat::Pretty);
    }
}
