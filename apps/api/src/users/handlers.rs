//! Axum route handlers for user profiles, interests, and categories.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::{ensure_range, AppError};
use crate::extract::AppQuery;
use crate::models::user::{CategorySubreddit, InterestCategory, UserInterest, UserProfile};
use crate::state::AppState;

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct AddInterestQuery {
    pub csid: Uuid,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

#[derive(Debug, Deserialize)]
pub struct WeightQuery {
    pub weight: u32,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub completed: bool,
}

fn validate_weight(weight: u32) -> Result<i32, AppError> {
    let weight = ensure_range("weight", weight, 1, 10)?;
    Ok(weight as i32)
}

/// GET /api/user/:user_id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let email = state
        .preferences
        .get_user_email(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let interests = state.preferences.get_interests(user_id).await?;

    Ok(Json(UserProfile {
        user_id,
        email,
        interests,
    }))
}

/// GET /api/user/:user_id/interests
pub async fn handle_get_interests(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserInterest>>, AppError> {
    Ok(Json(state.preferences.get_interests(user_id).await?))
}

/// GET /api/user/:user_id/interests/completed
pub async fn handle_interests_completed(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CompletionResponse>, AppError> {
    let interests = state.preferences.get_interests(user_id).await?;
    Ok(Json(CompletionResponse {
        completed: !interests.is_empty(),
    }))
}

/// POST /api/user/:user_id/interests
pub async fn handle_add_interest(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    AppQuery(params): AppQuery<AddInterestQuery>,
) -> Result<Json<Value>, AppError> {
    let weight = validate_weight(params.weight)?;
    if !state
        .preferences
        .add_interest(user_id, params.csid, weight)
        .await?
    {
        return Err(AppError::Validation("Failed to add interest".to_string()));
    }
    Ok(Json(json!({ "message": "Interest added successfully" })))
}

/// PATCH /api/user/:user_id/interests/:csid
pub async fn handle_update_interest_weight(
    State(state): State<AppState>,
    Path((user_id, csid)): Path<(Uuid, Uuid)>,
    AppQuery(params): AppQuery<WeightQuery>,
) -> Result<Json<Value>, AppError> {
    let weight = validate_weight(params.weight)?;
    if !state
        .preferences
        .update_interest_weight(user_id, csid, weight)
        .await?
    {
        return Err(AppError::NotFound(format!("Interest {csid} not found")));
    }
    Ok(Json(json!({ "message": "Interest updated successfully" })))
}

/// DELETE /api/user/:user_id/interests/:csid
pub async fn handle_remove_interest(
    State(state): State<AppState>,
    Path((user_id, csid)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    if !state.preferences.remove_interest(user_id, csid).await? {
        return Err(AppError::NotFound(format!("Interest {csid} not found")));
    }
    Ok(Json(json!({ "message": "Interest removed successfully" })))
}

/// GET /api/categories
pub async fn handle_get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<InterestCategory>>, AppError> {
    Ok(Json(state.preferences.get_categories().await?))
}

/// GET /api/categories/:category_id/subreddits
pub async fn handle_get_category_subreddits(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<CategorySubreddit>>, AppError> {
    Ok(Json(
        state
            .preferences
            .get_category_subreddits(category_id)
            .await?,
    ))
}
