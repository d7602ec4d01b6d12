//! MCP tool implementations.

mod analyze;
mod search_posts;
mod user_posts;

pub use analyze::{handle_analyze_topic, AnalyzeTopicInput};
pub use search_posts::{handle_search_posts, SearchPostsInput};
pub use user_posts::{handle_search_user_posts, SearchUserPostsInput};

/// Lowercase an optional enum-like argument, falling back when absent or empty.
pub(crate) fn lower_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_lowercase(),
        _ => fallback.to_string(),
    }
}
