//! Axum route handlers for the Reddit pass-through API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{ensure_range, validate_subreddit, AppError};
use crate::extract::AppQuery;
use crate::models::story::{RedditPost, SortOrder, SubredditInfo};
use crate::state::AppState;

fn default_story_limit() -> u32 {
    25
}

fn default_subreddit_limit() -> u32 {
    10
}

fn default_sort() -> String {
    SortOrder::Hot.to_string()
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub subreddit: Option<String>,
    #[serde(default = "default_story_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(default = "default_story_limit")]
    pub limit: u32,
    #[serde(default = "default_sort")]
    pub sort: String,
}

#[derive(Debug, Deserialize)]
pub struct SubredditSearchQuery {
    pub query: String,
    #[serde(default = "default_subreddit_limit")]
    pub limit: u32,
}

/// GET /api/reddit/search
pub async fn handle_search_stories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchQuery>,
) -> Result<Json<Vec<RedditPost>>, AppError> {
    let limit = ensure_range("limit", params.limit, 1, 100)?;
    let subreddit = params.subreddit.as_deref().map(validate_subreddit).transpose()?;
    let stories = state
        .reddit
        .search(&params.query, subreddit, limit)
        .await?;
    Ok(Json(stories))
}

/// GET /api/reddit/subreddit/:subreddit/stories
pub async fn handle_subreddit_stories(
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
    AppQuery(params): AppQuery<ListingQuery>,
) -> Result<Json<Vec<RedditPost>>, AppError> {
    let subreddit = validate_subreddit(&subreddit)?;
    let limit = ensure_range("limit", params.limit, 1, 100)?;
    let sort: SortOrder = params.sort.parse().map_err(AppError::Validation)?;
    let stories = state.reddit.list_by_source(subreddit, limit, sort).await?;
    Ok(Json(stories))
}

/// GET /api/reddit/subreddit/:subreddit/info
pub async fn handle_subreddit_info(
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
) -> Result<Json<SubredditInfo>, AppError> {
    let subreddit = validate_subreddit(&subreddit)?;
    state
        .reddit
        .get_source_info(subreddit)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Subreddit not found".to_string()))
}

/// GET /api/reddit/subreddits/search
pub async fn handle_search_subreddits(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SubredditSearchQuery>,
) -> Result<Json<Vec<SubredditInfo>>, AppError> {
    let limit = ensure_range("limit", params.limit, 1, 50)?;
    let subreddits = state.reddit.search_sources(&params.query, limit).await?;
    Ok(Json(subreddits))
}
