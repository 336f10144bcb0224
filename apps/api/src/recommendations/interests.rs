//! Interest Resolver — expands a user's weighted interests into the subreddits to poll.

use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserInterest;
use crate::users::PreferenceStore;

/// Upper bound on personalized subreddits fetched per request.
pub const MAX_PERSONALIZED_SOURCES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceResolution {
    /// The user's interests and the subreddits they map to, in discovery order.
    Personalized {
        interests: Vec<UserInterest>,
        sources: Vec<String>,
    },
    /// No interests, or none that map to a subreddit.
    NoPersonalization,
}

/// Resolves `user_id` to at most five deduplicated subreddits.
///
/// Store failures propagate; the caller decides how to degrade.
pub async fn resolve_sources(
    store: &dyn PreferenceStore,
    user_id: Uuid,
) -> Result<SourceResolution, AppError> {
    let interests = store.get_interests(user_id).await?;
    if interests.is_empty() {
        debug!("User {user_id} has no interests");
        return Ok(SourceResolution::NoPersonalization);
    }

    let mut sources: Vec<String> = Vec::new();
    for interest in &interests {
        for subreddit in store.get_sources_for_category(interest.csid).await? {
            if !sources.contains(&subreddit) {
                sources.push(subreddit);
            }
        }
    }

    if sources.is_empty() {
        debug!(
            "None of the {} interests for user {user_id} map to a subreddit",
            interests.len()
        );
        return Ok(SourceResolution::NoPersonalization);
    }

    sources.truncate(MAX_PERSONALIZED_SOURCES);
    Ok(SourceResolution::Personalized { interests, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{interest_for, FakeStore};

    #[tokio::test]
    async fn test_no_interests_means_no_personalization() {
        let store = FakeStore::default();
        let resolution = resolve_sources(&store, Uuid::new_v4()).await.unwrap();
        assert_eq!(resolution, SourceResolution::NoPersonalization);
    }

    #[tokio::test]
    async fn test_unmapped_interests_mean_no_personalization() {
        let user = Uuid::new_v4();
        let store = FakeStore::default();
        store.add(interest_for(user, Uuid::new_v4(), 3));

        let resolution = resolve_sources(&store, user).await.unwrap();
        assert_eq!(resolution, SourceResolution::NoPersonalization);
    }

    #[tokio::test]
    async fn test_sources_deduplicated_in_discovery_order() {
        let user = Uuid::new_v4();
        let (horror, funny) = (Uuid::new_v4(), Uuid::new_v4());
        let store = FakeStore::default()
            .with_category(horror, &["nosleep", "shortscarystories"])
            .with_category(funny, &["tifu", "nosleep"]);
        store.add(interest_for(user, horror, 2));
        store.add(interest_for(user, funny, 1));

        match resolve_sources(&store, user).await.unwrap() {
            SourceResolution::Personalized { interests, sources } => {
                assert_eq!(interests.len(), 2);
                assert_eq!(sources, vec!["nosleep", "shortscarystories", "tifu"]);
            }
            other => panic!("expected personalized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_truncates_to_first_five() {
        let user = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let store = FakeStore::default()
            .with_category(a, &["s1", "s2", "s3", "s4"])
            .with_category(b, &["s5", "s6", "s7"]);
        store.add(interest_for(user, a, 1));
        store.add(interest_for(user, b, 1));

        match resolve_sources(&store, user).await.unwrap() {
            SourceResolution::Personalized { sources, .. } => {
                assert_eq!(sources, vec!["s1", "s2", "s3", "s4", "s5"]);
            }
            other => panic!("expected personalized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = FakeStore::failing();
        assert!(resolve_sources(&store, Uuid::new_v4()).await.is_err());
    }
}
