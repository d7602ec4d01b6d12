//! xAI Grok API client for the `x_search` tool.
//!
//! The client owns the provider configuration and a `reqwest::Client`; the
//! latter is an inherently thread-safe connection pool, so concurrent tool
//! calls share it without locking and connections are created lazily and
//! recycled when defunct.
//!
//! Every outcome of [`XSearchClient::search`] — success, missing
//! configuration, transport failure, provider error, malformed body — is a
//! plain string. Nothing here raises across the tool boundary.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::{XaiConfig, ENV_API_KEY, ENV_API_KEY_FALLBACK};
use crate::extract::extract_text;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

//--------------------------------------------------------------------------------------------------
// Types: Options
//--------------------------------------------------------------------------------------------------

/// Per-call search parameters assembled by the tool handlers.
///
/// Handlers guarantee that `allowed_handles` and `excluded_handles` are never
/// both non-empty; the client serializes whichever is present.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// System prompt template chosen by the calling tool.
    pub system_prompt: String,

    /// Maximum number of posts to consider, already clamped to [1, 25].
    pub max_results: u32,

    /// Restrict the search to these handles.
    pub allowed_handles: Vec<String>,

    /// Exclude these handles from the search.
    pub excluded_handles: Vec<String>,

    /// Inclusive start date (ISO-8601), if any.
    pub from_date: Option<String>,

    /// Inclusive end date (ISO-8601), if any.
    pub to_date: Option<String>,

    /// Recency filter: auto / day / week / month.
    pub freshness: String,

    /// Search mode: auto / latest / popular.
    pub search_mode: String,

    /// Language tag, e.g. "ja" or "en".
    pub language: String,

    /// Let the model inspect images attached to posts.
    pub enable_image_understanding: bool,

    /// Let the model inspect videos attached to posts.
    pub enable_video_understanding: bool,

    /// Generation temperature, already clamped to [0.0, 1.0].
    pub temperature: f64,

    /// Output token budget.
    pub max_output_tokens: i64,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            max_results: 8,
            allowed_handles: Vec::new(),
            excluded_handles: Vec::new(),
            from_date: None,
            to_date: None,
            freshness: "auto".into(),
            search_mode: "auto".into(),
            language: "ja".into(),
            enable_image_understanding: false,
            enable_video_understanding: false,
            temperature: 0.2,
            max_output_tokens: 900,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Types: Wire Format
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    input: [Message<'a>; 2],
    tools: [ToolEntry<'a>; 1],
    temperature: f64,
    max_output_tokens: i64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolEntry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    x_search: XSearchToolConfig<'a>,
}

/// Filter fields of the `x_search` tool descriptor. Absent optional fields
/// are omitted from the body entirely, never sent as null or empty.
#[derive(Debug, Serialize)]
struct XSearchToolConfig<'a> {
    max_results: u32,
    search_mode: &'a str,
    freshness: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_x_handles: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded_x_handles: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_date: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    enable_image_understanding: bool,
    #[serde(skip_serializing_if = "is_false")]
    enable_video_understanding: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

//--------------------------------------------------------------------------------------------------
// Types: Client
//--------------------------------------------------------------------------------------------------

/// Client for the xAI Grok Responses API.
#[derive(Debug, Clone)]
pub struct XSearchClient {
    config: XaiConfig,
    http: reqwest::Client,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl XSearchClient {
    pub fn new(config: XaiConfig) -> Self {
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self { config, http }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &XaiConfig {
        &self.config
    }

    /// Run one search round trip and return display text.
    ///
    /// Soft-fails: missing configuration, transport errors, provider errors,
    /// and malformed bodies all come back as descriptive strings.
    pub async fn search(&self, query: &str, opts: &SearchOptions) -> String {
        if !self.config.is_configured() {
            return format!("{ENV_API_KEY} (または{ENV_API_KEY_FALLBACK}) が設定されていません。");
        }

        let query = query.trim();
        let body = build_request_body(&self.config.model, query, opts);
        let url = self.config.responses_url();

        tracing::debug!(
            model = %self.config.model,
            max_results = opts.max_results,
            search_mode = %opts.search_mode,
            "sending x_search request"
        );

        let response = match self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .timeout(Duration::from_secs(opts.timeout_seconds))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return format!("Grok APIへの接続に失敗しました: {err}"),
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return format!("Grok APIへの接続に失敗しました: {err}"),
        };

        if status >= 300 {
            tracing::warn!(status, "Grok API returned an error");
            return format!("Grok APIエラー({status}): {}", classify_error_body(&text));
        }

        let payload: Value = match serde_json::from_str(&text) {
            Ok(payload) => payload,
            Err(_) => return format!("Grok APIの応答を解析できませんでした: {text}"),
        };

        let extracted = extract_text(&payload);
        if extracted.is_empty() {
            serde_json::to_string(&payload).unwrap_or(text)
        } else {
            extracted
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Assemble the Responses API request body.
fn build_request_body<'a>(model: &'a str, query: &'a str, opts: &'a SearchOptions) -> RequestBody<'a> {
    let tool_config = XSearchToolConfig {
        max_results: opts.max_results,
        search_mode: &opts.search_mode,
        freshness: &opts.freshness,
        language: &opts.language,
        allowed_x_handles: (!opts.allowed_handles.is_empty())
            .then_some(opts.allowed_handles.as_slice()),
        excluded_x_handles: (!opts.excluded_handles.is_empty())
            .then_some(opts.excluded_handles.as_slice()),
        from_date: opts.from_date.as_deref(),
        to_date: opts.to_date.as_deref(),
        enable_image_understanding: opts.enable_image_understanding,
        enable_video_understanding: opts.enable_video_understanding,
    };

    RequestBody {
        model,
        input: [
            Message { role: "system", content: &opts.system_prompt },
            Message { role: "user", content: query },
        ],
        tools: [ToolEntry { kind: "x_search", x_search: tool_config }],
        temperature: opts.temperature,
        max_output_tokens: opts.max_output_tokens,
    }
}

/// Best-effort extraction of a human-readable message from an error body.
///
/// Priority: structured `error.message` → serialized `error` object → plain
/// string `error` → serialized whole body → raw response text.
fn classify_error_body(text: &str) -> String {
    let Ok(payload) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };

    match payload.get("error") {
        Some(Value::Object(err)) => err
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| serde_json::to_string(err).unwrap_or_else(|_| text.to_string())),
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        _ => serde_json::to_string(&payload).unwrap_or_else(|_| text.to_string()),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
