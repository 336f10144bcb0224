mod config;
mod db;
mod errors;
mod extract;
mod models;
mod recommendations;
mod reddit;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod tts;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::reddit::{RedditClient, RedditSettings};
use crate::routes::build_router;
use crate::state::AppState;
use crate::tts::audio::AudioStore;
use crate::tts::ElevenLabsClient;
use crate::users::PgPreferenceStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Threadist API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Reddit client (token is fetched lazily on first request)
    let reddit = RedditClient::new(RedditSettings {
        client_id: config.reddit_client_id.clone(),
        client_secret: config.reddit_client_secret.clone(),
        user_agent: config.reddit_user_agent.clone(),
        auth_url: config.reddit_auth_url.clone(),
        api_url: config.reddit_api_url.clone(),
    })?;
    info!("Reddit client initialized ({})", config.reddit_api_url);

    // Initialize ElevenLabs client
    let voice = ElevenLabsClient::new(
        config.elevenlabs_api_key.clone(),
        config.elevenlabs_api_url.clone(),
        config.elevenlabs_voice_id.clone(),
    )?;
    info!(
        "ElevenLabs client initialized (model: {}, default voice: {})",
        tts::MODEL_ID,
        config.elevenlabs_voice_id
    );

    let audio = AudioStore::new(config.audio_dir.clone());
    info!("Narration files stored in {}", config.audio_dir.display());

    // Build app state
    let state = AppState {
        reddit: Arc::new(reddit),
        preferences: Arc::new(PgPreferenceStore::new(db)),
        voice: Arc::new(voice),
        audio,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
