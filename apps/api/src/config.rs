use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub reddit_auth_url: String,
    pub reddit_api_url: String,
    pub elevenlabs_api_key: String,
    pub elevenlabs_api_url: String,
    pub elevenlabs_voice_id: String,
    pub audio_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            reddit_client_id: require_env("REDDIT_CLIENT_ID")?,
            reddit_client_secret: require_env("REDDIT_CLIENT_SECRET")?,
            reddit_user_agent: env_or("REDDIT_USER_AGENT", "Threadist/1.0"),
            reddit_auth_url: env_or(
                "REDDIT_AUTH_URL",
                "https://www.reddit.com/api/v1/access_token",
            ),
            reddit_api_url: env_or("REDDIT_API_URL", "https://oauth.reddit.com"),
            elevenlabs_api_key: require_env("ELEVENLABS_API_KEY")?,
            elevenlabs_api_url: env_or("ELEVENLABS_API_URL", "https://api.elevenlabs.io"),
            elevenlabs_voice_id: env_or("ELEVENLABS_VOICE_ID", "JBFqnCBsd6RMkjVDRZzb"),
            audio_dir: std::env::var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
