pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::recommendations::handlers as recommendations;
use crate::reddit::handlers as reddit;
use crate::state::AppState;
use crate::tts::handlers as tts;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Reddit pass-through
        .route("/api/reddit/search", get(reddit::handle_search_stories))
        .route(
            "/api/reddit/subreddit/:subreddit/stories",
            get(reddit::handle_subreddit_stories),
        )
        .route(
            "/api/reddit/subreddit/:subreddit/info",
            get(reddit::handle_subreddit_info),
        )
        .route(
            "/api/reddit/subreddits/search",
            get(reddit::handle_search_subreddits),
        )
        // Recommendation feeds
        .route(
            "/api/recommendations/stories",
            get(recommendations::handle_recommended_stories),
        )
        .route(
            "/api/recommendations/default",
            get(recommendations::handle_default_stories),
        )
        .route(
            "/api/recommendations/trending",
            get(recommendations::handle_trending_stories),
        )
        .route(
            "/api/recommendations/sources",
            get(recommendations::handle_resolve_sources),
        )
        .route("/api/stories/classify", post(recommendations::handle_classify))
        // Narration
        .route("/api/tts/generate", post(tts::handle_generate_audio))
        .route("/api/tts/stream", post(tts::handle_stream_audio))
        .route("/api/tts/audio/:filename", get(tts::handle_get_audio))
        .route("/api/tts/voices", get(tts::handle_list_voices))
        // Users and interests
        .route("/api/user/:user_id/profile", get(users::handle_get_profile))
        .route(
            "/api/user/:user_id/interests",
            get(users::handle_get_interests).post(users::handle_add_interest),
        )
        .route(
            "/api/user/:user_id/interests/completed",
            get(users::handle_interests_completed),
        )
        .route(
            "/api/user/:user_id/interests/:csid",
            patch(users::handle_update_interest_weight).delete(users::handle_remove_interest),
        )
        .route("/api/categories", get(users::handle_get_categories))
        .route(
            "/api/categories/:category_id/subreddits",
            get(users::handle_get_category_subreddits),
        )
        .with_state(state)
}
