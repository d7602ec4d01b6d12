//! X Search MCP Server
//!
//! An MCP server that lets AI agents search X (Twitter) posts through the
//! xAI Grok API's `x_search` tool.
//!
//! # Tools
//!
//! - **search_posts**: generic post search with handle allow/deny lists,
//!   date range, freshness and mode filters
//! - **search_user_posts**: posts from one user, optionally keyword-filtered
//! - **analyze_topic**: summary, sentiment, or timeline analysis of the
//!   discussion around a topic
//!
//! Every tool returns plain text on both success and failure; caller input
//! errors, missing configuration, transport failures, and provider errors
//! all come back as descriptive strings rather than protocol errors.
//!
//! Configuration is read from the environment once at startup: `XAI_API_KEY`
//! (or `GROK_API_KEY`), `XAI_API_BASE`, and `XAI_GROK_MODEL`.

pub mod client;
pub mod config;
pub mod extract;
pub mod normalize;
pub mod prompts;
pub mod server;
pub mod tools;

pub use client::{SearchOptions, XSearchClient, DEFAULT_TIMEOUT_SECS};
pub use config::XaiConfig;
pub use extract::extract_text;
pub use normalize::{parse_handles, validate_iso_date, InvalidDateError};
pub use server::Server;
