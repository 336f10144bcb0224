//! Axum route handlers for the recommendation feeds.

use axum::{
    extract::State,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ensure_range, AppError};
use crate::extract::AppQuery;
use crate::models::recommendation::StoryRecommendation;
use crate::models::story::RedditPost;
use crate::recommendations::classifier::is_story;
use crate::recommendations::interests::{resolve_sources, SourceResolution};
use crate::recommendations::ranker::{
    default_stories, recommended_stories, trending_stories, DEFAULT_SUBREDDITS,
};
use crate::state::AppState;

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct RecommendedQuery {
    pub user_id: Uuid,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    /// False when the default subreddits are used instead of the user's interests.
    pub personalized: bool,
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub is_story: bool,
}

fn now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// GET /api/recommendations/stories
pub async fn handle_recommended_stories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RecommendedQuery>,
) -> Result<Json<Vec<StoryRecommendation>>, AppError> {
    let limit = ensure_range("limit", params.limit, 1, 50)?;
    let stories = recommended_stories(
        state.reddit.as_ref(),
        state.preferences.as_ref(),
        params.user_id,
        limit,
        now_seconds(),
    )
    .await;
    Ok(Json(stories))
}

/// GET /api/recommendations/default
pub async fn handle_default_stories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitQuery>,
) -> Result<Json<Vec<StoryRecommendation>>, AppError> {
    let limit = ensure_range("limit", params.limit, 1, 50)?;
    Ok(Json(default_stories(state.reddit.as_ref(), limit).await))
}

/// GET /api/recommendations/trending
pub async fn handle_trending_stories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitQuery>,
) -> Result<Json<Vec<StoryRecommendation>>, AppError> {
    let limit = ensure_range("limit", params.limit, 1, 50)?;
    Ok(Json(trending_stories(state.reddit.as_ref(), limit).await))
}

/// GET /api/recommendations/sources
///
/// Shows which subreddits the personalized feed would poll for a user.
/// Store failures surface as errors here rather than falling back.
pub async fn handle_resolve_sources(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<SourcesResponse>, AppError> {
    let response = match resolve_sources(state.preferences.as_ref(), params.user_id).await? {
        SourceResolution::Personalized { sources, .. } => SourcesResponse {
            personalized: true,
            sources,
        },
        SourceResolution::NoPersonalization => SourcesResponse {
            personalized: false,
            sources: DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
        },
    };
    Ok(Json(response))
}

/// POST /api/stories/classify
pub async fn handle_classify(Json(post): Json<RedditPost>) -> Json<ClassifyResponse> {
    Json(ClassifyResponse {
        is_story: is_story(&post),
    })
}
