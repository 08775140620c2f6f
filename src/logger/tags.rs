/// Log categories for finsight modules
///
/// Each tag maps to a `--debug-<key>` command-line flag via `debug_key()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Webserver,
    Api,
    Ai,
    Store,
    Other(String),
}

impl LogTag {
    /// Key used for `--debug-<key>` flag matching
    pub fn debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Ai => "ai".to_string(),
            LogTag::Store => "store".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored display name for file output
    pub fn as_plain_str(&self) -> &str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Webserver => "WEBSERVER",
            LogTag::Api => "API",
            LogTag::Ai => "AI",
            LogTag::Store => "STORE",
            LogTag::Other(s) => s.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys() {
        assert_eq!(LogTag::Ai.debug_key(), "ai");
        assert_eq!(LogTag::Other("Custom".to_string()).debug_key(), "custom");
    }
}
