//! Logging configuration and initialization.
//!
//! Sets up the tracing subscriber from `RUST_LOG` (INFO when unset), with
//! the command line verbosity flags layered on top.

use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Precedence: `quiet` forces WARN+, then `-vv` => TRACE, `-v` => DEBUG, else INFO.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => LogLevel::Warn,
            (false, 0) => LogLevel::Info,
            (false, 1) => LogLevel::Debug,
            (false, _) => LogLevel::Trace,
        }
    }

    fn max_level(self) -> Level {
        match self {
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Build the filter from `RUST_LOG`-style directives. `-q`/`-v` replace the
/// global level; target-specific directives are kept.
fn build_filter(level: LogLevel, directives: &str) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(level.max_level().into())
        .parse_lossy(directives);
    if level == LogLevel::Info {
        filter
    } else {
        filter.add_directive(level.max_level().into())
    }
}

pub fn configure_logging(level: LogLevel) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level, &directives))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(LogLevel::from_flags(true, 2), LogLevel::Warn);
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(LogLevel::from_flags(false, 0), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(false, 1), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(false, 2), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(false, 7).max_level(), Level::TRACE);
    }

    #[test]
    fn env_directives_apply_without_flags() {
        use tracing_subscriber::filter::LevelFilter;

        let filter = build_filter(LogLevel::Info, "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = build_filter(LogLevel::Info, "");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn verbose_flag_raises_env_level() {
        use tracing_subscriber::filter::LevelFilter;

        let filter = build_filter(LogLevel::Trace, "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = build_filter(LogLevel::Debug, "");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
