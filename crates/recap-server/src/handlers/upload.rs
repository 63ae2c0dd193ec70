//! Audio upload and processing handlers.

use crate::state::AppState;
use crate::{ApiError, Result};
use axum::extract::{Multipart, Path, State};
use axum::Json;
use bytes::Bytes;
use recap_core::MeetingAnalysis;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,

    /// Stored filename to pass to the process endpoint.
    pub filename: String,

    pub message: String,
}

/// Accept a multipart audio upload and retain it under the uploads
/// directory with a timestamped, sanitized name.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|n| n.to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::bad_request("No file selected"))?;

        if !allowed_file(&filename, &state.config.upload.allowed_extensions) {
            return Err(ApiError::bad_request(format!(
                "Invalid file type. Use {}",
                state.config.upload.allowed_extensions.join(", ").to_uppercase()
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        if data.is_empty() {
            return Err(ApiError::bad_request("Uploaded file is empty"));
        }

        let stored_name = format!(
            "{}_{}",
            chrono::Utc::now().format("%Y%m%d_%H%M%S"),
            sanitize_filename(&filename)
        );

        let uploads_dir = state.config.uploads_path();
        tokio::fs::create_dir_all(&uploads_dir).await?;
        tokio::fs::write(uploads_dir.join(&stored_name), &data).await?;

        info!(filename = %stored_name, bytes = data.len(), "audio uploaded");

        return Ok(Json(UploadResponse {
            success: true,
            filename: stored_name,
            message: "File uploaded successfully".to_string(),
        }));
    }

    Err(ApiError::bad_request("No file selected"))
}

/// Optional metadata accepted by the process endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub attendees: Vec<String>,
}

/// Process response.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub meeting: ProcessedMeeting,
}

/// Summary of a freshly processed meeting.
#[derive(Debug, Serialize)]
pub struct ProcessedMeeting {
    pub id: String,
    pub title: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub analysis: MeetingAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_url: Option<String>,
}

/// Run a previously uploaded file through the processing pipeline.
pub async fn process(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    body: Option<Json<ProcessRequest>>,
) -> Result<Json<ProcessResponse>> {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(ApiError::bad_request("Invalid filename"));
    }

    let request = body.map(|Json(r)| r).unwrap_or_default();

    let path = state.config.uploads_path().join(&filename);
    let audio = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::not_found("File not found"));
        }
        Err(e) => return Err(e.into()),
    };

    let record = state
        .pipeline
        .process(&filename, Bytes::from(audio), request.title, request.attendees)
        .await?;

    Ok(Json(ProcessResponse {
        success: true,
        meeting: ProcessedMeeting {
            id: record.id,
            title: record.title,
            timestamp: record.timestamp,
            analysis: record.analysis,
            visual_url: record.visual_url,
        },
    }))
}

/// Check a filename against the configured extension allowlist.
fn allowed_file(filename: &str, allowed: &[String]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| a == &ext)
        }
        None => false,
    }
}

/// Keep only filesystem-safe characters from the final path component.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
