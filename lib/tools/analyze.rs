//! analyze_topic tool implementation.

use rmcp::handler::server::wrapper::Parameters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::{SearchOptions, XSearchClient};
use crate::normalize::validate_iso_date;
use crate::prompts::Aspect;
use crate::tools::lower_or;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for the analyze_topic tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeTopicInput {
    /// Topic to analyze, e.g. "生成AI規制".
    pub topic: String,

    /// Analysis aspect: summary / sentiment / timeline. Defaults to "summary".
    #[serde(default)]
    pub aspect: Option<String>,

    /// Maximum number of results (1-25). Defaults to 15.
    #[serde(default)]
    pub max_results: Option<i64>,

    /// Start date, YYYY-MM-DD.
    #[serde(default)]
    pub from_date: Option<String>,

    /// End date, YYYY-MM-DD.
    #[serde(default)]
    pub to_date: Option<String>,

    /// Recency filter: auto / day / week / month. Defaults to "week".
    #[serde(default)]
    pub freshness: Option<String>,

    /// Language tag. Defaults to "ja".
    #[serde(default)]
    pub language: Option<String>,

    /// Output token budget. Defaults to 1500.
    #[serde(default)]
    pub max_output_tokens: Option<i64>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate the input and assemble search options. No I/O.
fn prepare(input: &AnalyzeTopicInput) -> Result<(String, SearchOptions), String> {
    if input.topic.trim().is_empty() {
        return Err("分析対象のトピックを指定してください。".into());
    }

    let aspect_value = lower_or(input.aspect.as_deref(), "summary");
    let Some(aspect) = Aspect::parse(&aspect_value) else {
        return Err(format!(
            "aspectは summary/sentiment/timeline のいずれかを指定してください（指定値: {aspect_value}）"
        ));
    };

    let max_results = input.max_results.unwrap_or(15).clamp(1, 25) as u32;

    let from_date = validate_iso_date(input.from_date.as_deref().unwrap_or(""), "from_date")
        .map_err(|err| err.to_string())?;
    let to_date = validate_iso_date(input.to_date.as_deref().unwrap_or(""), "to_date")
        .map_err(|err| err.to_string())?;

    let opts = SearchOptions {
        system_prompt: aspect.prompt().to_string(),
        max_results,
        from_date,
        to_date,
        freshness: lower_or(input.freshness.as_deref(), "week"),
        search_mode: "auto".into(),
        language: input.language.clone().unwrap_or_else(|| "ja".into()),
        temperature: 0.3,
        max_output_tokens: input.max_output_tokens.unwrap_or(1500),
        ..SearchOptions::default()
    };

    Ok((input.topic.trim().to_string(), opts))
}

/// Handle the analyze_topic tool call.
pub async fn handle_analyze_topic(
    client: &XSearchClient,
    params: Parameters<AnalyzeTopicInput>,
) -> String {
    match prepare(&params.0) {
        Ok((topic, opts)) => client.search(&topic, &opts).await,
        Err(message) => message,
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{SEARCH_SYSTEM_PROMPT, USER_SEARCH_SYSTEM_PROMPT};

    #[test]
    fn test_empty_topic_rejected() {
        let input = AnalyzeTopicInput::default();
        assert_eq!(prepare(&input).unwrap_err(), "分析対象のトピックを指定してください。");
    }

    #[test]
    fn test_invalid_aspect_rejected() {
        let input = AnalyzeTopicInput {
            topic: "AI".into(),
            aspect: Some("bogus".into()),
            ..AnalyzeTopicInput::default()
        };
        let message = prepare(&input).unwrap_err();
        assert!(message.contains("summary/sentiment/timeline"));
        assert!(message.contains("bogus"));
    }

    #[test]
    fn test_aspect_case_insensitive() {
        let input = AnalyzeTopicInput {
            topic: "AI".into(),
            aspect: Some("Sentiment".into()),
            ..AnalyzeTopicInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.system_prompt, Aspect::Sentiment.prompt());
    }

    #[test]
    fn test_defaults() {
        let input = AnalyzeTopicInput {
            topic: "生成AI規制".into(),
            ..AnalyzeTopicInput::default()
        };
        let (topic, opts) = prepare(&input).unwrap();
        assert_eq!(topic, "生成AI規制");
        assert_eq!(opts.max_results, 15);
        assert_eq!(opts.freshness, "week");
        assert_eq!(opts.search_mode, "auto");
        assert_eq!(opts.temperature, 0.3);
        assert_eq!(opts.max_output_tokens, 1500);
        assert_eq!(opts.system_prompt, Aspect::Summary.prompt());
    }

    #[test]
    fn test_analysis_prompt_is_not_a_search_prompt() {
        let input = AnalyzeTopicInput {
            topic: "AI".into(),
            aspect: Some("timeline".into()),
            ..AnalyzeTopicInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_ne!(opts.system_prompt, SEARCH_SYSTEM_PROMPT);
        assert_ne!(opts.system_prompt, USER_SEARCH_SYSTEM_PROMPT);
    }

    #[test]
    fn test_topic_trimmed() {
        let input = AnalyzeTopicInput {
            topic: "  AI規制  ".into(),
            ..AnalyzeTopicInput::default()
        };
        let (topic, _) = prepare(&input).unwrap();
        assert_eq!(topic, "AI規制");
    }

    #[test]
    fn test_max_results_clamped() {
        let input = AnalyzeTopicInput {
            topic: "AI".into(),
            max_results: Some(-3),
            ..AnalyzeTopicInput::default()
        };
        let (_, opts) = prepare(&input).unwrap();
        assert_eq!(opts.max_results, 1);
    }
}
