//! Wire types for Reddit's JSON listings and their conversion into domain models.

use serde::Deserialize;

use crate::models::story::{RedditPost, SubredditInfo};
use crate::recommendations::classifier::is_story;

#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
}

/// A `{ "kind": ..., "data": ... }` envelope.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: String,
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    pub created_utc: f64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_self: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubredditData {
    pub display_name: String,
    #[serde(default)]
    pub public_description: Option<String>,
    #[serde(default)]
    pub subscribers: Option<u64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub over18: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

impl From<PostData> for RedditPost {
    fn from(data: PostData) -> Self {
        let selftext = if data.selftext.is_empty() {
            None
        } else {
            Some(data.selftext.clone())
        };
        Self {
            id: data.id,
            title: data.title,
            content: data.selftext,
            author: data.author,
            subreddit: data.subreddit,
            score: data.score,
            num_comments: data.num_comments,
            created_utc: data.created_utc,
            url: data.url,
            is_self: data.is_self,
            selftext,
        }
    }
}

impl From<SubredditData> for SubredditInfo {
    fn from(data: SubredditData) -> Self {
        Self {
            name: data.display_name.clone(),
            display_name: data.display_name,
            description: data.public_description.unwrap_or_default(),
            subscribers: data.subscribers.unwrap_or(0),
            url: data.url,
            is_nsfw: data.over18.unwrap_or(false),
        }
    }
}

impl Listing<PostData> {
    /// Keeps only self posts that read as stories.
    pub fn into_stories(self) -> Vec<RedditPost> {
        self.data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter(|data| data.is_self)
            .map(RedditPost::from)
            .filter(is_story)
            .collect()
    }
}

impl Listing<SubredditData> {
    pub fn into_subreddits(self) -> Vec<SubredditInfo> {
        self.data
            .children
            .into_iter()
            .map(|child| SubredditInfo::from(child.data))
            .collect()
    }
}
