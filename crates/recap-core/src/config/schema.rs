//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Main Recap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// OpenAI model selection.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Semantic search defaults.
    #[serde(default)]
    pub search: SearchConfig,

    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port number.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind mode.
    #[serde(default)]
    pub bind: BindMode,

    /// Enable CORS for browser clients.
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: BindMode::default(),
            cors: true,
        }
    }
}

/// Where the server listens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// 127.0.0.1 only.
    #[default]
    Loopback,
    /// All interfaces.
    Lan,
}

fn default_port() -> u16 {
    8780
}

fn default_true() -> bool {
    true
}

/// Storage locations. Paths may be tilde-prefixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Flat file holding all meeting records.
    #[serde(default = "default_meetings_file")]
    pub meetings_file: String,

    /// Directory retaining uploaded audio.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            meetings_file: default_meetings_file(),
            uploads_dir: default_uploads_dir(),
        }
    }
}

fn default_meetings_file() -> String {
    "~/.recap/data/meetings.json".to_string()
}

fn default_uploads_dir() -> String {
    "~/.recap/uploads".to_string()
}

/// OpenAI model selection. The API key is taken from the
/// `OPENAI_API_KEY` environment variable, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Chat model for transcript analysis.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Speech-to-text model.
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    /// Embedding model.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Image generation model.
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            chat_model: default_chat_model(),
            transcription_model: default_transcription_model(),
            embedding_model: default_embedding_model(),
            image_model: default_image_model(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

/// Semantic search defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum results per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Similarity floor in [-1, 1].
    #[serde(default = "default_min_score")]
    pub min_score: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_score: default_min_score(),
        }
    }
}

fn default_top_k() -> usize {
    5
}

fn default_min_score() -> f32 {
    0.1
}

/// Upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Accepted file extensions (lowercase, no dot).
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_extensions: default_extensions(),
        }
    }
}

fn default_max_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_extensions() -> Vec<String> {
    ["mp3", "wav", "m4a", "aac", "flac"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "recap=info".to_string()
}
