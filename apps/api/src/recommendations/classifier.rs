use crate::models::story::RedditPost;

/// Minimum body length (exclusive) for a post to count as a story.
pub const MIN_STORY_CHARS: usize = 200;

pub const STORY_KEYWORDS: [&str; 6] = [
    "story",
    "tale",
    "experience",
    "happened",
    "incident",
    "event",
];

/// Decides whether a post reads as a story: a self post whose body is longer
/// than 200 characters and mentions at least one story keyword.
pub fn is_story(post: &RedditPost) -> bool {
    if !post.is_self {
        return false;
    }
    let body = match post.selftext.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => return false,
    };

    let lowered = body.to_lowercase();
    body.chars().count() > MIN_STORY_CHARS && STORY_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::post_with_body;

    #[test]
    fn test_long_body_with_keyword_is_story() {
        let body = format!("{} It happened at night.", "x".repeat(200));
        assert!(is_story(&post_with_body(true, Some(&body))));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let body = format!("{} A TRUE TALE.", "x".repeat(200));
        assert!(is_story(&post_with_body(true, Some(&body))));
    }

    #[test]
    fn test_exactly_200_chars_is_not_story() {
        let body = format!("story{}", "x".repeat(195));
        assert_eq!(body.chars().count(), 200);
        assert!(!is_story(&post_with_body(true, Some(&body))));

        let body = format!("story{}", "x".repeat(196));
        assert!(is_story(&post_with_body(true, Some(&body))));
    }

    #[test]
    fn test_short_bodies_never_stories() {
        for len in [0, 1, 50, 199] {
            let body = "story happened ".chars().cycle().take(len).collect::<String>();
            assert!(!is_story(&post_with_body(true, Some(&body))), "len {len}");
        }
    }

    #[test]
    fn test_long_body_without_keyword_is_not_story() {
        let body = "lorem ipsum dolor sit amet ".repeat(20);
        assert!(!is_story(&post_with_body(true, Some(&body))));
    }

    #[test]
    fn test_link_posts_never_stories() {
        let body = "This incident happened years ago. ".repeat(20);
        assert!(!is_story(&post_with_body(false, Some(&body))));
    }

    #[test]
    fn test_missing_body_is_not_story() {
        assert!(!is_story(&post_with_body(true, None)));
        assert!(!is_story(&post_with_body(true, Some(""))));
    }
}
