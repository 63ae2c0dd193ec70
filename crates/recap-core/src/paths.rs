//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the Recap base directory (~/.recap).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".recap"))
}

/// Get the main config file path (~/.recap/recap.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("recap.json5"))
}

/// Get the default data directory (~/.recap/data).
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("data"))
}

/// Get the default meetings file path (~/.recap/data/meetings.json).
pub fn meetings_file() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("meetings.json"))
}

/// Get the default uploads directory (~/.recap/uploads).
pub fn uploads_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("uploads"))
}

/// Ensure all required directories exist.
pub fn ensure_dirs() -> Result<(), ConfigError> {
    let dirs = [base_dir()?, data_dir()?, uploads_dir()?];

    for dir in dirs {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(())
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}
