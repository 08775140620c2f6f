//! Centralized path resolution
//!
//! All files live under a platform data directory:
//! - macOS: `~/Library/Application Support/Finsight/`
//! - Windows: `%LOCALAPPDATA%\Finsight\`
//! - Linux: `$XDG_DATA_HOME/Finsight/` (fallback `~/.local/share/Finsight/`)
//!
//! Layout:
//! ```text
//! Finsight/
//! ├── data/
//! │   └── config.json
//! └── logs/
//!     └── finsight-*.log
//! ```

use std::path::PathBuf;

use once_cell::sync::Lazy;

const APP_DIR: &str = "Finsight";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(format!(".{}", APP_DIR.to_lowercase()));
    }
    // Last resort: current directory
    PathBuf::from(".").join(APP_DIR.to_lowercase())
}

pub fn base_dir() -> PathBuf {
    BASE_DIRECTORY.clone()
}

pub fn data_dir() -> PathBuf {
    base_dir().join("data")
}

pub fn logs_dir() -> PathBuf {
    base_dir().join("logs")
}

/// Default config file location (overridable with `--config <path>`)
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Create the data and log directories if missing
pub fn ensure_all_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir())?;
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_base() {
        assert!(data_dir().starts_with(base_dir()));
        assert!(logs_dir().starts_with(base_dir()));
        assert_eq!(config_path().file_name().unwrap(), "config.json");
    }
}
