use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single text post fetched from Reddit. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub subreddit: String,
    /// Net upvotes. Can be negative.
    pub score: i64,
    pub num_comments: u64,
    /// Seconds since the Unix epoch.
    pub created_utc: f64,
    pub url: String,
    pub is_self: bool,
    pub selftext: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubredditInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub subscribers: u64,
    pub url: String,
    pub is_nsfw: bool,
}

/// Listing order accepted by the subreddit listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
            SortOrder::Top => "top",
            SortOrder::Rising => "rising",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(SortOrder::Hot),
            "new" => Ok(SortOrder::New),
            "top" => Ok(SortOrder::Top),
            "rising" => Ok(SortOrder::Rising),
            other => Err(format!(
                "sort must be one of hot, new, top, rising; got '{other}'"
            )),
        }
    }
}
