//! In-memory collaborators and fixtures shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::story::{RedditPost, SortOrder, SubredditInfo};
use crate::models::user::{CategorySubreddit, InterestCategory, UserInterest};
use crate::reddit::{RedditError, StorySource};
use crate::tts::{SpeechSynthesizer, TtsError, Voice};
use crate::users::PreferenceStore;

pub fn post_with_body(is_self: bool, body: Option<&str>) -> RedditPost {
    RedditPost {
        id: "abc".to_string(),
        title: "A post".to_string(),
        content: body.unwrap_or_default().to_string(),
        author: "someone".to_string(),
        subreddit: "nosleep".to_string(),
        score: 1,
        num_comments: 0,
        created_utc: 1_700_000_000.0,
        url: "https://reddit.com/r/nosleep/abc".to_string(),
        is_self,
        selftext: body.map(str::to_string),
    }
}

pub fn story(id: &str, subreddit: &str, score: i64, num_comments: u64, created_utc: f64) -> RedditPost {
    let body = "Let me tell you what happened the night the power went out. ".repeat(5);
    RedditPost {
        id: id.to_string(),
        title: format!("Story {id}"),
        content: body.clone(),
        author: "narrator".to_string(),
        subreddit: subreddit.to_string(),
        score,
        num_comments,
        created_utc,
        url: format!("https://reddit.com/r/{subreddit}/{id}"),
        is_self: true,
        selftext: Some(body),
    }
}

pub fn interest(weight: i32) -> UserInterest {
    interest_for(Uuid::new_v4(), Uuid::new_v4(), weight)
}

pub fn interest_for(user_id: Uuid, csid: Uuid, weight: i32) -> UserInterest {
    UserInterest {
        interest_id: Uuid::new_v4(),
        csid,
        user_id,
        weight,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Story source
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeSource {
    posts: Mutex<HashMap<String, Vec<RedditPost>>>,
    infos: Mutex<HashMap<String, SubredditInfo>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, u32, SortOrder)>>,
}

impl FakeSource {
    pub fn put(&self, subreddit: &str, posts: Vec<RedditPost>) {
        self.posts.lock().unwrap().insert(subreddit.to_string(), posts);
    }

    pub fn put_info(&self, info: SubredditInfo) {
        self.infos.lock().unwrap().insert(info.name.clone(), info);
    }

    pub fn fail(&self, subreddit: &str) {
        self.failing.lock().unwrap().insert(subreddit.to_string());
    }

    /// `(subreddit, limit, sort)` for every listing request, in call order.
    pub fn calls(&self) -> Vec<(String, u32, SortOrder)> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, subreddit: &str) -> Result<(), RedditError> {
        if self.failing.lock().unwrap().contains(subreddit) {
            return Err(RedditError::Api {
                status: 500,
                message: format!("r/{subreddit} unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StorySource for FakeSource {
    async fn search(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: u32,
    ) -> Result<Vec<RedditPost>, RedditError> {
        if let Some(sub) = subreddit {
            self.check(sub)?;
        }
        let posts = self.posts.lock().unwrap();
        let mut hits: Vec<RedditPost> = posts
            .iter()
            .filter(|(sub, _)| subreddit.map_or(true, |s| s == sub.as_str()))
            .flat_map(|(_, posts)| posts.iter())
            .filter(|p| p.title.to_lowercase().contains(&query.to_lowercase()))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.id.cmp(&b.id));
        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn list_by_source(
        &self,
        subreddit: &str,
        limit: u32,
        sort: SortOrder,
    ) -> Result<Vec<RedditPost>, RedditError> {
        self.calls
            .lock()
            .unwrap()
            .push((subreddit.to_string(), limit, sort));
        self.check(subreddit)?;
        let mut posts = self
            .posts
            .lock()
            .unwrap()
            .get(subreddit)
            .cloned()
            .unwrap_or_default();
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn get_source_info(&self, subreddit: &str) -> Result<Option<SubredditInfo>, RedditError> {
        self.check(subreddit)?;
        Ok(self.infos.lock().unwrap().get(subreddit).cloned())
    }

    async fn search_sources(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SubredditInfo>, RedditError> {
        let mut hits: Vec<SubredditInfo> = self
            .infos
            .lock()
            .unwrap()
            .values()
            .filter(|info| info.name.contains(query))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        hits.truncate(limit as usize);
        Ok(hits)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Preference store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeStore {
    interests: Mutex<Vec<UserInterest>>,
    mappings: Vec<CategorySubreddit>,
    categories: Vec<InterestCategory>,
    emails: HashMap<Uuid, String>,
    failing: bool,
    refuse_adds: bool,
}

impl FakeStore {
    /// A store whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// A store that reports every `add_interest` as not stored.
    pub fn refusing_adds(mut self) -> Self {
        self.refuse_adds = true;
        self
    }

    pub fn with_category(self, csid: Uuid, subreddits: &[&str]) -> Self {
        self.with_mapping(None, csid, subreddits)
    }

    pub fn with_mapping(mut self, category_id: Option<Uuid>, csid: Uuid, subreddits: &[&str]) -> Self {
        self.mappings
            .extend(subreddits.iter().map(|sub| CategorySubreddit {
                csid,
                category_id,
                subreddit: sub.to_string(),
            }));
        self
    }

    pub fn with_interest_category(mut self, category: InterestCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_user(mut self, user_id: Uuid, email: &str) -> Self {
        self.emails.insert(user_id, email.to_string());
        self
    }

    pub fn add(&self, interest: UserInterest) {
        self.interests.lock().unwrap().push(interest);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::Internal(anyhow::anyhow!("store unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FakeStore {
    async fn get_interests(&self, user_id: Uuid) -> Result<Vec<UserInterest>, AppError> {
        self.check()?;
        Ok(self
            .interests
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_sources_for_category(&self, csid: Uuid) -> Result<Vec<String>, AppError> {
        self.check()?;
        Ok(self
            .mappings
            .iter()
            .filter(|m| m.csid == csid)
            .map(|m| m.subreddit.clone())
            .collect())
    }

    async fn get_category_subreddits(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<CategorySubreddit>, AppError> {
        self.check()?;
        Ok(self
            .mappings
            .iter()
            .filter(|m| m.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn get_categories(&self) -> Result<Vec<InterestCategory>, AppError> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn add_interest(&self, user_id: Uuid, csid: Uuid, weight: i32) -> Result<bool, AppError> {
        self.check()?;
        if self.refuse_adds {
            return Ok(false);
        }
        let mut interests = self.interests.lock().unwrap();
        match interests
            .iter_mut()
            .find(|i| i.user_id == user_id && i.csid == csid)
        {
            Some(existing) => existing.weight = weight,
            None => interests.push(interest_for(user_id, csid, weight)),
        }
        Ok(true)
    }

    async fn remove_interest(&self, user_id: Uuid, csid: Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut interests = self.interests.lock().unwrap();
        let before = interests.len();
        interests.retain(|i| !(i.user_id == user_id && i.csid == csid));
        Ok(interests.len() < before)
    }

    async fn update_interest_weight(
        &self,
        user_id: Uuid,
        csid: Uuid,
        weight: i32,
    ) -> Result<bool, AppError> {
        self.check()?;
        let mut interests = self.interests.lock().unwrap();
        match interests
            .iter_mut()
            .find(|i| i.user_id == user_id && i.csid == csid)
        {
            Some(existing) => {
                existing.weight = weight;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_user_email(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        self.check()?;
        Ok(self.emails.get(&user_id).cloned())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Speech synthesizer
// ────────────────────────────────────────────────────────────────────────────

pub const FAKE_AUDIO: &[u8] = b"ID3\x04fake-mp3-frames";

#[derive(Default)]
pub struct FakeVoice {
    requests: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeVoice {
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeVoice {
    async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Bytes, TtsError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.map(str::to_string)));
        Ok(Bytes::from_static(FAKE_AUDIO))
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        Ok(vec![Voice {
            voice_id: "narrator".to_string(),
            name: "Narrator".to_string(),
            category: Some("premade".to_string()),
            preview_url: None,
            labels: Default::default(),
        }])
    }
}
