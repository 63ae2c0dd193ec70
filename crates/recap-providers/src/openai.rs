//! OpenAI-backed provider implementations.
//!
//! One client covers the four APIs the pipeline uses: audio transcription,
//! chat completions (with forced function calling), embeddings, and image
//! generation.

use crate::{
    Analyzer, Embedder, ImageGenerator, ProviderError, Result, Transcriber, Transcription,
};
use async_trait::async_trait;
use bytes::Bytes;
use recap_core::config::OpenAiConfig;
use recap_core::{FollowUpPlan, MeetingAnalysis};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default OpenAI API base URL.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Transcript characters fed into analysis; longer input is truncated to
/// stay inside model context limits.
const ANALYSIS_INPUT_LIMIT: usize = 4_000;

/// Text characters fed into embedding requests.
const EMBED_INPUT_LIMIT: usize = 8_000;

/// OpenAI API client implementing all provider traits.
pub struct OpenAiClient {
    /// HTTP client.
    client: Client,

    /// API key.
    api_key: SecretString,

    /// API base URL.
    api_base: String,

    /// Chat model for analysis.
    chat_model: String,

    /// Speech-to-text model.
    transcription_model: String,

    /// Embedding model.
    embedding_model: String,

    /// Image generation model.
    image_model: String,
}

impl OpenAiClient {
    /// Create a new client with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::config("API key is required"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: SecretString::new(api_key),
            api_base: DEFAULT_API_BASE.to_string(),
            chat_model: "gpt-4o".to_string(),
            transcription_model: "whisper-1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            image_model: "dall-e-3".to_string(),
        })
    }

    /// Create a new client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ProviderError::config("OPENAI_API_KEY environment variable not set"))?;
        Self::new(api_key)
    }

    /// Create a client from the environment key plus configured models.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        Ok(Self::from_env()?
            .with_base_url(&config.api_base)
            .with_chat_model(&config.chat_model)
            .with_transcription_model(&config.transcription_model)
            .with_embedding_model(&config.embedding_model)
            .with_image_model(&config.image_model))
    }

    /// Set the API base URL (for proxies or compatible APIs).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Set the chat model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the transcription model.
    pub fn with_transcription_model(mut self, model: impl Into<String>) -> Self {
        self.transcription_model = model.into();
        self
    }

    /// Set the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the image model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Map a non-success response to a provider error.
    async fn error_for_response(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body: OpenAiErrorBody = response.json().await.unwrap_or_else(|_| OpenAiErrorBody {
            error: OpenAiErrorDetail {
                message: "Unknown error".to_string(),
            },
        });

        match status {
            401 => ProviderError::auth(body.error.message),
            429 => ProviderError::rate_limit(body.error.message, None),
            400 => ProviderError::invalid_request(body.error.message),
            _ => ProviderError::server_error(status, body.error.message),
        }
    }

    async fn send_transcription(
        &self,
        filename: &str,
        audio: Bytes,
        response_format: &str,
    ) -> Result<reqwest::Response> {
        let part = Part::bytes(audio.to_vec())
            .file_name(filename.to_string())
            .mime_str(audio_mime(filename))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone())
            .text("response_format", response_format.to_string());

        debug!(filename, model = %self.transcription_model, "sending transcription request");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.api_base))
            .header("Authorization", self.bearer())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_response(response).await);
        }

        Ok(response)
    }

    /// Issue a chat completion that must answer through the named function,
    /// returning the function's JSON arguments.
    async fn forced_function_call(
        &self,
        system: &str,
        user: String,
        function_name: &str,
        description: &str,
        parameters: serde_json::Value,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            tools: vec![serde_json::json!({
                "type": "function",
                "function": {
                    "name": function_name,
                    "description": description,
                    "parameters": parameters,
                }
            })],
            tool_choice: serde_json::json!({
                "type": "function",
                "function": { "name": function_name }
            }),
        };

        debug!(model = %self.chat_model, function = function_name, "sending analysis request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", self.bearer())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_response(response).await);
        }

        let response: ChatResponse = response.json().await?;

        let call = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.tool_calls)
            .and_then(|calls| calls.into_iter().next())
            .ok_or_else(|| ProviderError::internal("Model returned no function call"))?;

        Ok(call.function.arguments)
    }

    async fn generate_image(&self, prompt: String, size: &str) -> Result<String> {
        let request = ImageRequest {
            model: self.image_model.clone(),
            prompt,
            size: size.to_string(),
            quality: "standard".to_string(),
            n: 1,
        };

        debug!(model = %self.image_model, size, "sending image generation request");

        let response = self
            .client
            .post(format!("{}/images/generations", self.api_base))
            .header("Authorization", self.bearer())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_response(response).await);
        }

        let response: ImageResponse = response.json().await?;
        response
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or_else(|| ProviderError::internal("No image in response"))
    }
}

#[async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(&self, filename: &str, audio: Bytes) -> Result<String> {
        let response = self.send_transcription(filename, audio, "text").await?;
        Ok(response.text().await?.trim().to_string())
    }

    async fn transcribe_verbose(&self, filename: &str, audio: Bytes) -> Result<Transcription> {
        let response = self
            .send_transcription(filename, audio, "verbose_json")
            .await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Analyzer for OpenAiClient {
    async fn analyze(&self, transcript: &str) -> Result<MeetingAnalysis> {
        if transcript.trim().is_empty() {
            return Err(ProviderError::invalid_request("Transcript cannot be empty"));
        }

        let excerpt = truncate_chars(transcript, ANALYSIS_INPUT_LIMIT);
        let arguments = self
            .forced_function_call(
                ANALYST_SYSTEM_PROMPT,
                format!(
                    "Analyze this meeting transcript and extract key insights:\n\n{}",
                    excerpt
                ),
                "extract_meeting_insights",
                "Extract structured insights from a meeting transcript",
                analysis_schema(),
            )
            .await?;

        Ok(serde_json::from_str(&arguments)?)
    }

    async fn plan_follow_ups(&self, analysis: &MeetingAnalysis) -> Result<FollowUpPlan> {
        // Nothing to plan from; skip the API round-trip.
        if analysis.action_items.is_empty() {
            return Ok(FollowUpPlan::default());
        }

        let arguments = self
            .forced_function_call(
                "You are a task management assistant. Convert meeting insights into \
                 actionable calendar events and task assignments.",
                format!(
                    "Create task and calendar recommendations based on this meeting analysis:\n\n{}",
                    serde_json::to_string_pretty(analysis)?
                ),
                "plan_follow_ups",
                "Create task and calendar integration recommendations",
                follow_up_schema(),
            )
            .await?;

        Ok(serde_json::from_str(&arguments)?)
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    fn dimension(&self) -> usize {
        match self.embedding_model.as_str() {
            "text-embedding-3-small" => 1536,
            "text-embedding-3-large" => 3072,
            "text-embedding-ada-002" => 1536,
            _ => 1536,
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(ProviderError::invalid_request(
                "Text cannot be empty for embedding",
            ));
        }

        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: truncate_chars(text, EMBED_INPUT_LIMIT).to_string(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.api_base))
            .header("Authorization", self.bearer())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_response(response).await);
        }

        let response: EmbeddingResponse = response.json().await?;
        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ProviderError::internal("No embedding in response"))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn visual_summary(&self, summary: &str) -> Result<String> {
        if summary.trim().is_empty() {
            return Err(ProviderError::invalid_request(
                "Meeting summary cannot be empty",
            ));
        }

        self.generate_image(visual_summary_prompt(summary), "1024x1024")
            .await
    }

    async fn presentation_asset(&self, key_points: &[String]) -> Result<String> {
        let themes: Vec<&str> = key_points
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.as_str())
            .take(3)
            .collect();

        let themes = if themes.is_empty() {
            "business meeting, collaboration, productivity".to_string()
        } else {
            themes.join(", ")
        };

        // Presentation aspect ratio.
        self.generate_image(presentation_prompt(&themes), "1792x1024")
            .await
    }

    async fn concept_illustration(&self, concept: &str) -> Result<String> {
        if concept.trim().is_empty() {
            return Err(ProviderError::invalid_request("Concept text cannot be empty"));
        }

        self.generate_image(concept_prompt(concept), "1024x1024")
            .await
    }
}

/// System prompt for meeting analysis.
const ANALYST_SYSTEM_PROMPT: &str = "You are an expert meeting analyst. Analyze meeting \
transcripts to extract actionable insights.\n\nFocus on:\n- Clear, actionable summaries\n\
- Specific action items with owners\n- Key decisions and their business impact\n\
- Meeting effectiveness assessment\n- Recommendations for improvement\n\n\
Be precise and business-focused in your analysis.";

/// JSON schema for the analysis function call.
fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "Concise meeting summary (2-3 paragraphs)"
            },
            "key_decisions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "decision": {"type": "string"},
                        "context": {"type": "string"},
                        "impact": {"type": "string"}
                    }
                },
                "description": "List of key decisions made"
            },
            "action_items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "task": {"type": "string"},
                        "owner": {"type": "string"},
                        "deadline": {"type": "string"},
                        "priority": {"type": "string", "enum": ["high", "medium", "low"]}
                    }
                },
                "description": "List of action items with owners"
            },
            "participants": {
                "type": "array",
                "items": {"type": "string"},
                "description": "List of meeting participants"
            },
            "topics_discussed": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Main topics discussed"
            },
            "meeting_effectiveness_score": {
                "type": "integer",
                "minimum": 1,
                "maximum": 10,
                "description": "Meeting effectiveness score (1-10)"
            },
            "recommendations": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Recommendations for follow-up"
            }
        },
        "required": ["summary", "action_items", "key_decisions", "participants", "topics_discussed"]
    })
}

/// JSON schema for the follow-up planning function call.
fn follow_up_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "calendar_events": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "description": {"type": "string"},
                        "suggested_date": {"type": "string"},
                        "duration": {"type": "integer"},
                        "attendees": {"type": "array", "items": {"type": "string"}}
                    }
                }
            },
            "task_assignments": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "task_title": {"type": "string"},
                        "description": {"type": "string"},
                        "assignee": {"type": "string"},
                        "due_date": {"type": "string"},
                        "project": {"type": "string"}
                    }
                }
            }
        }
    })
}

/// Build the infographic prompt for a visual summary, with keyword-driven
/// enhancements from the summary content.
fn visual_summary_prompt(summary: &str) -> String {
    let mut prompt = String::from(
        "Create a professional, clean infographic-style illustration that represents a \
         business meeting summary. The image should include:\n\n\
         - Modern office or meeting room setting\n\
         - Professional business people discussing\n\
         - Visual elements like charts, graphs, or presentation screens\n\
         - Clean, corporate aesthetic with blue and white color scheme\n\
         - Symbols representing collaboration, decisions, and action items\n\
         - Abstract elements suggesting productivity and efficiency\n\n\
         Style: Modern, clean, professional infographic. No text or words in the image.",
    );

    let summary_lower = summary.to_lowercase();

    if summary_lower.contains("project") {
        prompt.push_str(" Include project management elements like timelines or milestones.");
    }

    if summary_lower.contains("decision") {
        prompt.push_str(
            " Emphasize decision-making with visual elements like checkmarks or selection symbols.",
        );
    }

    if ["budget", "financial", "cost", "revenue"]
        .iter()
        .any(|w| summary_lower.contains(w))
    {
        prompt.push_str(" Include financial elements like charts or calculator symbols.");
    }

    prompt
}

fn presentation_prompt(themes: &str) -> String {
    format!(
        "Create a professional presentation slide background with abstract business elements.\n\n\
         Key themes to represent visually: {}\n\n\
         Style requirements:\n\
         - Clean, modern design suitable for business presentations\n\
         - Professional color palette (blues, grays, whites)\n\
         - Abstract geometric shapes and business icons\n\
         - Space for text overlay\n\
         - No text or words in the image\n\
         - High contrast for readability when text is added later",
        themes
    )
}

fn concept_prompt(concept: &str) -> String {
    format!(
        "Create a professional conceptual illustration representing: {}\n\n\
         Style requirements:\n\
         - Clean, modern business illustration\n\
         - Abstract but meaningful visual metaphors\n\
         - Professional color palette\n\
         - Clear visual hierarchy\n\
         - No text or words in the image\n\
         - Infographic-style design elements",
        concept
    )
}

/// Guess an audio MIME type from the filename extension.
fn audio_mime(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "mp3" => "audio/mpeg",
        Some(ext) if ext == "wav" => "audio/wav",
        Some(ext) if ext == "m4a" => "audio/mp4",
        Some(ext) if ext == "aac" => "audio/aac",
        Some(ext) if ext == "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Char-boundary-safe prefix of a string.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// Internal types for the OpenAI API

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Vec<serde_json::Value>,
    tool_choice: serde_json::Value,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    size: String,
    quality: String,
    n: u8,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: String,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}
