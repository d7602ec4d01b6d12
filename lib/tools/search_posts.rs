//! search_posts tool implementation.

use rmcp::handler::server::wrapper::Parameters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::{SearchOptions, XSearchClient};
use crate::normalize::{parse_handles, validate_iso_date};
use crate::prompts::SEARCH_SYSTEM_PROMPT;
use crate::tools::lower_or;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for the search_posts tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchPostsInput {
    /// Search query.
    pub query: String,

    /// Maximum number of results (1-25). Defaults to 8.
    #[serde(default)]
    pub max_results: Option<i64>,

    /// Comma-separated handles to restrict the search to, e.g. "elonmusk,OpenAI".
    #[serde(default)]
    pub allowed_x_handles: Option<String>,

    /// Comma-separated handles to exclude. Mutually exclusive with allowed_x_handles.
    #[serde(default)]
    pub excluded_x_handles: Option<String>,

    /// Start date, YYYY-MM-DD.
    #[serde(default)]
    pub from_date: Option<String>,

    /// End date, YYYY-MM-DD.
    #[serde(default)]
    pub to_date: Option<String>,

    /// Recency filter: auto / day / week / month. Defaults to "auto".
    #[serde(default)]
    pub freshness: Option<String>,

    /// Search mode: auto / latest / popular. Defaults to "auto".
    #[serde(default)]
    pub search_mode: Option<String>,

    /// Language tag, e.g. "ja" or "en". Defaults to "ja".
    #[serde(default)]
    pub language: Option<String>,

    /// Enable image understanding. Defaults to false.
    #[serde(default)]
    pub enable_image_understanding: Option<bool>,

    /// Enable video understanding. Defaults to false.
    #[serde(default)]
    pub enable_video_understanding: Option<bool>,

    /// Generation temperature (0.0-1.0). Defaults to 0.2.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Output token budget. Defaults to 900.
    #[serde(default)]
    pub max_output_tokens: Option<i64>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate the input and assemble search options. No I/O.
fn prepare(input: &SearchPostsInput) -> Result<(String, SearchOptions), String> {
    if input.query.trim().is_empty() {
        return Err("検索クエリを指定してください。".into());
    }

    let max_results = input.max_results.unwrap_or(8).clamp(1, 25) as u32;
    let temperature = input.temperature.unwrap_or(0.2).clamp(0.0, 1.0);

    let allowed = parse_handles(input.allowed_x_handles.as_deref().unwrap_or(""));
    let excluded = parse_handles(input.excluded_x_handles.as_deref().unwrap_or(""));
    if !allowed.is_empty() && !excluded.is_empty() {
        return Err("allowed_x_handlesとexcluded_x_handlesは同時に指定できません。".into());
    }

    let from_date = validate_iso_date(input.from_date.as_deref().unwrap_or(""), "from_date")
        .map_err(|err| err.to_string())?;
    let to_date = validate_iso_date(input.to_date.as_deref().unwrap_or(""), "to_date")
        .map_err(|err| err.to_string())?;

    let opts = SearchOptions {
        system_prompt: SEARCH_SYSTEM_PROMPT.to_string(),
        max_results,
        allowed_handles: allowed,
        excluded_handles: excluded,
        from_date,
        to_date,
        freshness: lower_or(input.freshness.as_deref(), "auto"),
        search_mode: lower_or(input.search_mode.as_deref(), "auto"),
        language: input.language.clone().unwrap_or_else(|| "ja".into()),
        enable_image_understanding: input.enable_image_understanding.unwrap_or(false),
        enable_video_understanding: input.enable_video_understanding.unwrap_or(false),
        temperature,
        max_output_tokens: input.max_output_tokens.unwrap_or(900),
        ..SearchOptions::default()
    };

    Ok((input.query.clone(), opts))
}

/// Handle the search_posts tool call.
pub async fn handle_search_posts(
    client: &XSearchClient,
    params: Parameters<SearchPostsInput>,
) -> String {
    match prepare(&params.0) {
        Ok((query, opts)) => client.search(&query, &opts).await,
        Err(message) => message,
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_rejected() {
        let input = SearchPostsInput::default();
        assert_eq!(prepare(&input).unwrap_err(), "検索クエリを指定してください。");
    }

    #[test]
    fn test_whitespace_query_rejected() {
        let input = SearchPostsInput {
            query: "   ".into(),
            ..SearchPostsInput::default()
        };
        assert_eq!(prepare(&input).unwrap_err(), "検索クエリを指定してください。");
    }

    #[test]
    fn test_defaults() {
        let input = SearchPostsInput {
            query: "生成AI".into(),
            ..SearchPostsInput::default()
        };
        let (query, opts) = prepare(&input).unwrap();
        assert_eq!(query, "生成AI");
        assert_eq!(opts.max_results, 8);
        assert_eq!(opts.temperature, 0.2);
        assert_eq!(opts.max_output_tokens, 900);
        assert_eq!(opts.freshness, "auto");
        assert_eq!(opts.search_mode, "auto");
        assert_eq!(opts.language, "ja");
        assert_eq!(opts.system_prompt, SEARCH_SYSTEM_PROMPT);
        assert!(opts.allowed_handles.is_empty());
        assert!(opts.excluded_handles.is_empty());
    }

    #[test]
    fn test_max_results_clamped_high() {
        let input = SearchPostsInput {
            query: "test".into(),
            max_results: Some(100),
            ..SearchPostsInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.max_results, 25);
    }

    #[test]
    fn test_max_results_clamped_low() {
        let input = SearchPostsInput {
            query: "test".into(),
            max_results: Some(0),
            ..SearchPostsInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.max_results, 1);
    }

    #[test]
    fn test_temperature_clamped() {
        let input = SearchPostsInput {
            query: "test".into(),
            temperature: Some(5.0),
            ..SearchPostsInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.temperature, 1.0);
    }

    #[test]
    fn test_conflicting_handle_lists_rejected() {
        let input = SearchPostsInput {
            query: "test".into(),
            allowed_x_handles: Some("user1".into()),
            excluded_x_handles: Some("user2".into()),
            ..SearchPostsInput::default()
        };
        let message = prepare(&input).unwrap_err();
        assert!(message.contains("同時に指定できません"));
    }

    #[test]
    fn test_handles_parsed_and_normalized() {
        let input = SearchPostsInput {
            query: "test".into(),
            allowed_x_handles: Some("@elonmusk, ＠OpenAI".into()),
            ..SearchPostsInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.allowed_handles, vec!["elonmusk", "OpenAI"]);
    }

    #[test]
    fn test_invalid_from_date_rejected() {
        let input = SearchPostsInput {
            query: "test".into(),
            from_date: Some("invalid".into()),
            ..SearchPostsInput::default()
        };
        let message = prepare(&input).unwrap_err();
        assert!(message.contains("from_date"));
        assert!(message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_valid_dates_preserved_verbatim() {
        let input = SearchPostsInput {
            query: "test".into(),
            from_date: Some("2026-02-01".into()),
            to_date: Some("2026-02-24T10:00:00".into()),
            ..SearchPostsInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.from_date.as_deref(), Some("2026-02-01"));
        assert_eq!(opts.to_date.as_deref(), Some("2026-02-24T10:00:00"));
    }

    #[test]
    fn test_freshness_and_mode_lowercased() {
        let input = SearchPostsInput {
            query: "test".into(),
            freshness: Some("WEEK".into()),
            search_mode: Some("Latest".into()),
            ..SearchPostsInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.freshness, "week");
        assert_eq!(opts.search_mode, "latest");
    }
}
