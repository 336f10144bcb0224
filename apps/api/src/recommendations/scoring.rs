//! Composite story score and the display reason that accompanies it.
//!
//! score = popularity + interest_boost + recency_boost + engagement_boost
//!
//! Only popularity may be negative; the three boosts are floored at zero.

use crate::models::story::RedditPost;
use crate::models::user::UserInterest;

const SECONDS_PER_HOUR: f64 = 3600.0;
/// Hours after which a story earns no recency boost.
const RECENCY_WINDOW_HOURS: f64 = 100.0;
const ENGAGEMENT_CAP: u64 = 100;
const HIGHLY_UPVOTED_THRESHOLD: i64 = 1000;
const VERY_ENGAGING_THRESHOLD: u64 = 50;

/// Flat boost from the user's weighted interests.
///
/// Applied identically to every candidate regardless of which subreddit it came
/// from, so it shifts all personalized scores together without changing their
/// relative order.
pub fn interest_boost(interests: &[UserInterest]) -> f64 {
    interests
        .iter()
        .filter(|i| i.weight > 1)
        .map(|i| f64::from(i.weight) * 10.0)
        .sum()
}

/// 100 for a brand-new post, falling one point per hour, 0 from 100 hours on.
pub fn recency_boost(created_utc: f64, now: f64) -> f64 {
    let age_hours = (now - created_utc) / SECONDS_PER_HOUR;
    (RECENCY_WINDOW_HOURS - age_hours).max(0.0)
}

/// Two points per comment, capped at 100.
pub fn engagement_boost(num_comments: u64) -> f64 {
    num_comments.saturating_mul(2).min(ENGAGEMENT_CAP) as f64
}

pub fn score_story(post: &RedditPost, interests: &[UserInterest], now: f64) -> f64 {
    post.score as f64
        + interest_boost(interests)
        + recency_boost(post.created_utc, now)
        + engagement_boost(post.num_comments)
}

pub fn recommendation_reason(post: &RedditPost, interests: &[UserInterest]) -> String {
    let mut reasons = Vec::new();

    if post.score > HIGHLY_UPVOTED_THRESHOLD {
        reasons.push("Highly upvoted");
    }
    if post.num_comments > VERY_ENGAGING_THRESHOLD {
        reasons.push("Very engaging");
    }
    if interests.iter().any(|i| i.weight > 1) {
        reasons.push("Matches your interests");
    }
    if reasons.is_empty() {
        reasons.push("Popular story");
    }

    reasons.join(", ")
}
