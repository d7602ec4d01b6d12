//! search_user_posts tool implementation.

use rmcp::handler::server::wrapper::Parameters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::{SearchOptions, XSearchClient};
use crate::normalize::validate_iso_date;
use crate::prompts::USER_SEARCH_SYSTEM_PROMPT;
use crate::tools::lower_or;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for the search_user_posts tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchUserPostsInput {
    /// X username, with or without the leading "@", e.g. "elonmusk".
    pub username: String,

    /// Additional search keywords (optional).
    #[serde(default)]
    pub query: Option<String>,

    /// Maximum number of results (1-25). Defaults to 10.
    #[serde(default)]
    pub max_results: Option<i64>,

    /// Start date, YYYY-MM-DD.
    #[serde(default)]
    pub from_date: Option<String>,

    /// End date, YYYY-MM-DD.
    #[serde(default)]
    pub to_date: Option<String>,

    /// Recency filter: auto / day / week / month. Defaults to "auto".
    #[serde(default)]
    pub freshness: Option<String>,

    /// Search mode: auto / latest / popular. Defaults to "latest".
    #[serde(default)]
    pub search_mode: Option<String>,

    /// Language tag. Defaults to "ja".
    #[serde(default)]
    pub language: Option<String>,

    /// Output token budget. Defaults to 900.
    #[serde(default)]
    pub max_output_tokens: Option<i64>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate the input and assemble search options. No I/O.
fn prepare(input: &SearchUserPostsInput) -> Result<(String, SearchOptions), String> {
    if input.username.trim().is_empty() {
        return Err("ユーザー名を指定してください。".into());
    }

    let handle = input.username.trim().trim_start_matches('@').to_string();

    let extra = input.query.as_deref().map(str::trim).unwrap_or("");
    let query = if extra.is_empty() {
        format!("@{handle}の投稿")
    } else {
        format!("@{handle} {extra}")
    };

    let max_results = input.max_results.unwrap_or(10).clamp(1, 25) as u32;

    let from_date = validate_iso_date(input.from_date.as_deref().unwrap_or(""), "from_date")
        .map_err(|err| err.to_string())?;
    let to_date = validate_iso_date(input.to_date.as_deref().unwrap_or(""), "to_date")
        .map_err(|err| err.to_string())?;

    let opts = SearchOptions {
        system_prompt: USER_SEARCH_SYSTEM_PROMPT.to_string(),
        max_results,
        allowed_handles: vec![handle],
        from_date,
        to_date,
        freshness: lower_or(input.freshness.as_deref(), "auto"),
        search_mode: lower_or(input.search_mode.as_deref(), "latest"),
        language: input.language.clone().unwrap_or_else(|| "ja".into()),
        max_output_tokens: input.max_output_tokens.unwrap_or(900),
        ..SearchOptions::default()
    };

    Ok((query, opts))
}

/// Handle the search_user_posts tool call.
pub async fn handle_search_user_posts(
    client: &XSearchClient,
    params: Parameters<SearchUserPostsInput>,
) -> String {
    match prepare(&params.0) {
        Ok((query, opts)) => client.search(&query, &opts).await,
        Err(message) => message,
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
