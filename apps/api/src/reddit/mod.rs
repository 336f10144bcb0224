//! Reddit client. The only module that talks to the Reddit API.
//!
//! Authenticates with the application-only OAuth grant and memoizes the bearer
//! token for the lifetime of the process. Every listing it returns has already
//! been passed through the story classifier.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::models::story::{RedditPost, SortOrder, SubredditInfo};

pub mod handlers;
pub mod listing;

use listing::{Listing, PostData, SubredditData, Thing, TokenResponse};

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Fetches stories and subreddit metadata from a content API.
///
/// Carried in `AppState` as `Arc<dyn StorySource>`.
#[async_trait]
pub trait StorySource: Send + Sync {
    async fn search(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: u32,
    ) -> Result<Vec<RedditPost>, RedditError>;

    async fn list_by_source(
        &self,
        subreddit: &str,
        limit: u32,
        sort: SortOrder,
    ) -> Result<Vec<RedditPost>, RedditError>;

    /// `Ok(None)` when the subreddit does not exist.
    async fn get_source_info(&self, subreddit: &str) -> Result<Option<SubredditInfo>, RedditError>;

    async fn search_sources(&self, query: &str, limit: u32)
        -> Result<Vec<SubredditInfo>, RedditError>;
}

#[derive(Debug, Clone)]
pub struct RedditSettings {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    pub auth_url: String,
    pub api_url: String,
}

#[derive(Clone)]
pub struct RedditClient {
    http: Client,
    settings: RedditSettings,
    /// Shared by every clone, so the token is fetched at most once per process
    /// in the common case. A race may fetch it twice; either token is valid.
    token: Arc<OnceCell<String>>,
}

impl RedditClient {
    pub fn new(settings: RedditSettings) -> Result<Self, RedditError> {
        let http = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            settings,
            token: Arc::new(OnceCell::new()),
        })
    }

    async fn access_token(&self) -> Result<&str, RedditError> {
        let token = self
            .token
            .get_or_try_init(|| self.fetch_access_token())
            .await?;
        Ok(token.as_str())
    }

    async fn fetch_access_token(&self) -> Result<String, RedditError> {
        let response = self
            .http
            .post(&self.settings.auth_url)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = error_for_status(response).await?.json().await?;
        info!("Obtained Reddit access token");
        Ok(token.access_token)
    }

    async fn send_get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, RedditError> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.settings.api_url.trim_end_matches('/'), path);
        Ok(self
            .http
            .get(url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, RedditError> {
        let response = self.send_get(path, params).await?;
        Ok(error_for_status(response).await?.json().await?)
    }
}

#[async_trait]
impl StorySource for RedditClient {
    async fn search(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: u32,
    ) -> Result<Vec<RedditPost>, RedditError> {
        let path = match subreddit {
            Some(sub) => format!("/r/{sub}/search"),
            None => "/search".to_string(),
        };
        let params = [
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("sort", "relevance".to_string()),
            ("t", "all".to_string()),
            ("type", "link".to_string()),
        ];

        let listing: Listing<PostData> = self.get_json(&path, &params).await?;
        let stories = listing.into_stories();
        debug!("Search '{query}' returned {} stories", stories.len());
        Ok(stories)
    }

    async fn list_by_source(
        &self,
        subreddit: &str,
        limit: u32,
        sort: SortOrder,
    ) -> Result<Vec<RedditPost>, RedditError> {
        let path = format!("/r/{subreddit}/{sort}");
        let params = [("limit", limit.to_string())];

        let listing: Listing<PostData> = self.get_json(&path, &params).await?;
        let stories = listing.into_stories();
        debug!("Retrieved {} stories from r/{subreddit} ({sort})", stories.len());
        Ok(stories)
    }

    async fn get_source_info(&self, subreddit: &str) -> Result<Option<SubredditInfo>, RedditError> {
        let response = self.send_get(&format!("/r/{subreddit}/about"), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("r/{subreddit} not found");
            return Ok(None);
        }

        let about: Thing<SubredditData> = error_for_status(response).await?.json().await?;
        Ok(Some(about.data.into()))
    }

    async fn search_sources(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SubredditInfo>, RedditError> {
        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        let listing: Listing<SubredditData> = self.get_json("/subreddits/search", &params).await?;
        Ok(listing.into_subreddits())
    }
}

async fn error_for_status(response: Response) -> Result<Response, RedditError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RedditError::Api {
        status: status.as_u16(),
        message,
    })
}
