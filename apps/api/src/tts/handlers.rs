//! Axum route handlers for narration.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::state::AppState;
use crate::tts::{Voice, MAX_TEXT_CHARS};

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Deserialize)]
pub struct SpeechQuery {
    pub text: String,
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AudioStreamResponse {
    pub audio_url: String,
    /// Not measured yet; always null.
    pub duration: Option<f64>,
    pub text_length: usize,
}

fn validate_text(text: &str) -> Result<usize, AppError> {
    let length = text.chars().count();
    if length > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "Text too long (max {MAX_TEXT_CHARS} characters)"
        )));
    }
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(length)
}

/// POST /api/tts/generate
///
/// Synthesizes the text, stores the audio, and returns a URL to fetch it from.
pub async fn handle_generate_audio(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SpeechQuery>,
) -> Result<Json<AudioStreamResponse>, AppError> {
    let text_length = validate_text(&params.text)?;

    let audio = state
        .voice
        .synthesize(&params.text, params.voice_id.as_deref())
        .await?;
    let file_name = state.audio.save(audio).await?;

    Ok(Json(AudioStreamResponse {
        audio_url: format!("/api/tts/audio/{file_name}"),
        duration: None,
        text_length,
    }))
}

/// POST /api/tts/stream
///
/// Synthesizes the text and returns the MP3 body directly.
pub async fn handle_stream_audio(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SpeechQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_text(&params.text)?;
    let audio = state
        .voice
        .synthesize(&params.text, params.voice_id.as_deref())
        .await?;
    Ok(([(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)], audio))
}

/// GET /api/tts/audio/:filename
pub async fn handle_get_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let audio = state
        .audio
        .load(&filename)
        .await?
        .ok_or_else(|| AppError::NotFound("Audio file not found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, AUDIO_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{filename}\""),
            ),
        ],
        audio,
    ))
}

/// GET /api/tts/voices
pub async fn handle_list_voices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Voice>>, AppError> {
    Ok(Json(state.voice.list_voices().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_at_limit_accepted() {
        let text = "a".repeat(MAX_TEXT_CHARS);
        assert_eq!(validate_text(&text).unwrap(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_text_over_limit_rejected() {
        let text = "a".repeat(MAX_TEXT_CHARS + 1);
        assert!(matches!(validate_text(&text), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_text_rejected() {
        assert!(matches!(validate_text("   "), Err(AppError::Validation(_))));
    }
}
