use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's weighted affinity for a category subreddit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserInterest {
    pub interest_id: Uuid,
    pub csid: Uuid,
    pub user_id: Uuid,
    /// 1–10, defaults to 1.
    pub weight: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CategorySubreddit {
    pub csid: Uuid,
    pub category_id: Option<Uuid>,
    pub subreddit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InterestCategory {
    pub category_id: Uuid,
    pub slug: String,
    pub label: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub email: String,
    pub interests: Vec<UserInterest>,
}
