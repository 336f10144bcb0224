//! Recommendation Ranker — fans out to subreddits, scores candidates, and
//! returns the top stories for the personalized, default, and trending feeds.
//!
//! Per-subreddit failures are logged and contribute zero stories. A failure to
//! resolve the user's interests downgrades the personalized feed to the default
//! feed. Nothing here returns an error to the caller.

use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::recommendation::StoryRecommendation;
use crate::models::story::{RedditPost, SortOrder};
use crate::models::user::UserInterest;
use crate::recommendations::interests::{resolve_sources, SourceResolution};
use crate::recommendations::scoring::{recommendation_reason, score_story};
use crate::reddit::StorySource;
use crate::users::PreferenceStore;

/// Story-oriented subreddits used when a user has no usable interests.
pub const DEFAULT_SUBREDDITS: [&str; 5] = [
    "nosleep",
    "tifu",
    "relationship_advice",
    "AmItheAsshole",
    "entitledparents",
];

pub const TRENDING_SUBREDDITS: [&str; 7] = [
    "nosleep",
    "tifu",
    "relationship_advice",
    "AmItheAsshole",
    "entitledparents",
    "maliciouscompliance",
    "pettyrevenge",
];

/// Stories requested from each subreddit: `max(1, limit / sources)`.
pub fn fetch_quota(limit: u32, source_count: usize) -> u32 {
    if source_count == 0 {
        return limit.max(1);
    }
    let quota = limit as usize / source_count;
    u32::try_from(quota).unwrap_or(u32::MAX).max(1)
}

/// Fetches from every subreddit concurrently. Results keep subreddit order so
/// that equal scores rank in a deterministic order.
pub async fn fetch_candidates<S: AsRef<str>>(
    source: &dyn StorySource,
    subreddits: &[S],
    limit: u32,
    sort: SortOrder,
) -> Vec<RedditPost> {
    let quota = fetch_quota(limit, subreddits.len());

    let fetches = subreddits.iter().map(|subreddit| async move {
        let subreddit = subreddit.as_ref();
        (subreddit, source.list_by_source(subreddit, quota, sort).await)
    });

    join_all(fetches)
        .await
        .into_iter()
        .flat_map(|(subreddit, result)| match result {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Error getting stories from r/{subreddit}: {e}");
                Vec::new()
            }
        })
        .collect()
}

/// Sorts descending by score and keeps the first `limit`.
/// The sort is stable: equal scores keep their input order.
pub fn sort_and_truncate(
    mut recommendations: Vec<StoryRecommendation>,
    limit: usize,
) -> Vec<StoryRecommendation> {
    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations.truncate(limit);
    recommendations
}

/// Scores candidates with the composite formula and ranks them.
pub fn rank(
    candidates: Vec<RedditPost>,
    interests: &[UserInterest],
    limit: usize,
    now: f64,
) -> Vec<StoryRecommendation> {
    let recommendations = candidates
        .into_iter()
        .map(|post| StoryRecommendation {
            score: score_story(&post, interests, now),
            reason: recommendation_reason(&post, interests),
            post,
        })
        .collect();
    sort_and_truncate(recommendations, limit)
}

/// Ranks by raw popularity with a per-subreddit reason.
fn rank_by_popularity(
    candidates: Vec<RedditPost>,
    limit: usize,
    reason: impl Fn(&RedditPost) -> String,
) -> Vec<StoryRecommendation> {
    let recommendations = candidates
        .into_iter()
        .map(|post| StoryRecommendation {
            score: post.score as f64,
            reason: reason(&post),
            post,
        })
        .collect();
    sort_and_truncate(recommendations, limit)
}

/// Personalized feed for `user_id`, evaluated at `now` (seconds since epoch).
pub async fn recommended_stories(
    source: &dyn StorySource,
    store: &dyn PreferenceStore,
    user_id: Uuid,
    limit: u32,
    now: f64,
) -> Vec<StoryRecommendation> {
    let (interests, sources) = match resolve_sources(store, user_id).await {
        Ok(SourceResolution::Personalized { interests, sources }) => (interests, sources),
        Ok(SourceResolution::NoPersonalization) => return default_stories(source, limit).await,
        Err(e) => {
            warn!("Error resolving interests for user {user_id}: {e}");
            return default_stories(source, limit).await;
        }
    };

    let candidates = fetch_candidates(source, &sources, limit, SortOrder::Hot).await;
    info!(
        "Ranking {} candidates from {} subreddits for user {user_id}",
        candidates.len(),
        sources.len()
    );
    rank(candidates, &interests, limit as usize, now)
}

pub async fn default_stories(source: &dyn StorySource, limit: u32) -> Vec<StoryRecommendation> {
    let candidates = fetch_candidates(source, &DEFAULT_SUBREDDITS, limit, SortOrder::Hot).await;
    rank_by_popularity(candidates, limit as usize, |post| {
        format!("Popular story from r/{}", post.subreddit)
    })
}

pub async fn trending_stories(source: &dyn StorySource, limit: u32) -> Vec<StoryRecommendation> {
    let candidates = fetch_candidates(source, &TRENDING_SUBREDDITS, limit, SortOrder::Top).await;
    rank_by_popularity(candidates, limit as usize, |post| {
        format!("Trending in r/{}", post.subreddit)
    })
}
