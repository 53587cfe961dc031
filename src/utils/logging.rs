// Mon Oct 19 2026 - Alex

use log::LevelFilter;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs `env_logger` on stderr. `RUST_LOG` still applies on top of
    /// the chosen level.
    pub fn init(level: LevelFilter) {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .format_target(false)
            .parse_default_env()
            .try_init();
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// An explicit level name wins over `-v` counting; `quiet` wins over both.
    pub fn resolve_level(name: Option<&str>, verbosity: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match name {
            Some(name) => Self::level_from_str(name),
            None => Self::level_from_verbosity(verbosity.saturating_add(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(LoggingUtils::resolve_level(None, 0, false), LevelFilter::Info);
        assert_eq!(LoggingUtils::resolve_level(None, 1, false), LevelFilter::Debug);
        assert_eq!(LoggingUtils::resolve_level(Some("trace"), 0, false), LevelFilter::Trace);
        assert_eq!(LoggingUtils::resolve_level(Some("trace"), 3, true), LevelFilter::Error);
    }
}
