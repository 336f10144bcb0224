use std::sync::Arc;

use crate::reddit::StorySource;
use crate::tts::audio::AudioStore;
use crate::tts::SpeechSynthesizer;
use crate::users::PreferenceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Content source. Default: `RedditClient`.
    pub reddit: Arc<dyn StorySource>,
    /// Interest preferences. Default: `PgPreferenceStore`.
    pub preferences: Arc<dyn PreferenceStore>,
    /// Voice synthesis. Default: `ElevenLabsClient`.
    pub voice: Arc<dyn SpeechSynthesizer>,
    pub audio: AudioStore,
}
