//! Text-to-speech via ElevenLabs. The only module that calls the voice API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod audio;
pub mod handlers;

/// Model used for every synthesis request.
pub const MODEL_ID: &str = "eleven_multilingual_v2";
/// Longest text accepted for narration.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Audio storage error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Converts text to spoken audio.
///
/// Carried in `AppState` as `Arc<dyn SpeechSynthesizer>`.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns MP3 bytes. Uses the configured default voice when `voice_id` is `None`.
    async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Bytes, TtsError>;

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError>;
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    api_url: String,
    default_voice_id: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: String, api_url: String, default_voice_id: String) -> Result<Self, TtsError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(120)).build()?,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            default_voice_id,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Bytes, TtsError> {
        let voice_id = voice_id.unwrap_or(&self.default_voice_id);
        let response = self
            .client
            .post(format!("{}/v1/text-to-speech/{voice_id}", self.api_url))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&SynthesisRequest {
                text,
                model_id: MODEL_ID,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TtsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let audio = response.bytes().await?;
        debug!(
            "Synthesized {} chars into {} bytes with voice {voice_id}",
            text.chars().count(),
            audio.len()
        );
        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        let response = self
            .client
            .get(format!("{}/v1/voices", self.api_url))
            .header("xi-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TtsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: VoicesResponse = response.json().await?;
        Ok(body.voices)
    }
}
