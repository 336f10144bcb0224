use serde::{Deserialize, Serialize};

use crate::models::story::RedditPost;

/// A post with its computed ranking score and a display reason.
/// Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecommendation {
    pub post: RedditPost,
    pub score: f64,
    pub reason: String,
}
