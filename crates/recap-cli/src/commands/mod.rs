//! Command implementations.

pub mod init;
pub mod insights;
pub mod meetings;
pub mod process;
pub mod search;
pub mod serve;

use recap_core::Config;
use recap_index::JsonFileStore;
use recap_providers::OpenAiClient;
use std::sync::Arc;

/// Open the configured meeting store.
pub(crate) fn open_store(config: &Config) -> anyhow::Result<Arc<JsonFileStore>> {
    Ok(Arc::new(JsonFileStore::new(config.meetings_path())?))
}

/// Build the OpenAI client from the environment key and configured models.
pub(crate) fn openai_client(config: &Config) -> anyhow::Result<Arc<OpenAiClient>> {
    Ok(Arc::new(OpenAiClient::from_config(&config.openai)?))
}
