//! Configuration loading and persistence.

use super::Config;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::Path;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no config file exists yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load_default() {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to the default path.
    pub fn save_default(&self) -> Result<(), ConfigError> {
        let path = paths::config_file()?;
        self.save(&path)
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("Server port cannot be 0".to_string());
        }

        if self.search.top_k == 0 {
            errors.push("search.top_k must be at least 1".to_string());
        }

        if !(-1.0..=1.0).contains(&self.search.min_score) {
            errors.push(format!(
                "search.min_score must be within [-1, 1], got {}",
                self.search.min_score
            ));
        }

        if self.upload.allowed_extensions.is_empty() {
            errors.push("upload.allowed_extensions cannot be empty".to_string());
        }

        for (name, value) in [
            ("openai.chat_model", &self.openai.chat_model),
            ("openai.transcription_model", &self.openai.transcription_model),
            ("openai.embedding_model", &self.openai.embedding_model),
            ("openai.image_model", &self.openai.image_model),
        ] {
            if value.is_empty() {
                errors.push(format!("{} cannot be empty", name));
            }
        }

        if self.storage.meetings_file.is_empty() {
            errors.push("storage.meetings_file cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Resolved meetings file path with tilde expansion.
    pub fn meetings_path(&self) -> std::path::PathBuf {
        paths::expand_tilde(&self.storage.meetings_file)
    }

    /// Resolved uploads directory with tilde expansion.
    pub fn uploads_path(&self) -> std::path::PathBuf {
        paths::expand_tilde(&self.storage.uploads_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json5() {
        let content = r#"{
            // comment support is the point of json5
            server: { port: 9000 },
            search: { top_k: 3, min_score: 0.25 },
        }"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.search.top_k, 3);
    }

    #[test]
    fn test_validate_default_ok() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = Config::default();
        config.server.port = 0;
        config.search.top_k = 0;
        config.search.min_score = 2.0;

        let err = config.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("port"));
        assert!(msg.contains("top_k"));
        assert!(msg.contains("min_score"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recap.json5");

        let mut config = Config::default();
        config.server.port = 9999;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.server.port, 9999);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/recap.json5")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
