// Story recommendations: classification, interest resolution, scoring, and ranking.
// All Reddit access goes through the StorySource trait; no HTTP calls here.

pub mod classifier;
pub mod handlers;
pub mod interests;
pub mod ranker;
pub mod scoring;
