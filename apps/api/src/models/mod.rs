pub mod recommendation;
pub mod story;
pub mod user;
