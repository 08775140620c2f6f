/// Logger configuration derived from command-line flags
///
/// Supported flags:
/// - `--debug-<module>`: enable DEBUG logs for one tag (e.g. `--debug-ai`)
/// - `--debug-all`: enable DEBUG logs for every tag
/// - `--verbose`: enable VERBOSE logs globally
/// - `--quiet`: suppress everything below WARNING
use std::collections::HashSet;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub debug_all: bool,
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_all: false,
            debug_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Build the logger configuration from the process arguments
pub fn init_from_args() {
    let args = arguments::get_cmd_args();

    let mut config = LoggerConfig::default();

    for arg in &args {
        if let Some(module) = arg.strip_prefix("--debug-") {
            if module == "all" {
                config.debug_all = true;
            } else {
                config.debug_tags.insert(module.to_lowercase());
            }
        }
    }

    if arguments::has_arg("--verbose") {
        config.min_level = LogLevel::Verbose;
    } else if arguments::has_arg("--quiet") {
        config.min_level = LogLevel::Warning;
    }

    *LOGGER_CONFIG.write() = config;
}

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Whether DEBUG logs are enabled for a tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read();
    config.debug_all || config.debug_tags.contains(&tag.debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(!config.debug_all);
        assert!(config.debug_tags.is_empty());
    }
}
