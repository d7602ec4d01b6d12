//! Configuration for the X search MCP server.
//!
//! The environment is read exactly once at startup via [`XaiConfig::from_env`];
//! the resulting struct is immutable and injected into the API client.

use std::env;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Primary environment variable holding the xAI API key.
pub const ENV_API_KEY: &str = "XAI_API_KEY";

/// Fallback environment variable for the API key.
pub const ENV_API_KEY_FALLBACK: &str = "GROK_API_KEY";

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE: &str = "XAI_API_BASE";

/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "XAI_GROK_MODEL";

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.x.ai/v1";

/// Default Grok model identifier.
pub const DEFAULT_MODEL: &str = "grok-4-0709";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Immutable provider configuration.
///
/// An empty `api_key` means "unconfigured": not a startup error, but every
/// search call will report the missing configuration instead of hitting the
/// network.
#[derive(Debug, Clone)]
pub struct XaiConfig {
    /// Bearer token for the xAI API. May be empty.
    pub api_key: String,

    /// Base URL of the xAI API.
    pub api_base: String,

    /// Model identifier sent with every request.
    pub model: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl XaiConfig {
    /// Read the configuration from the environment.
    ///
    /// The key is taken from `XAI_API_KEY`, falling back to `GROK_API_KEY`;
    /// the first non-empty value wins.
    pub fn from_env() -> Self {
        let api_key = env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| env::var(ENV_API_KEY_FALLBACK).ok())
            .unwrap_or_default();

        Self {
            api_key,
            api_base: env::var(ENV_API_BASE).unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            model: env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Endpoint URL for the Responses API.
    ///
    /// Trailing slashes on the base URL are stripped before concatenation.
    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.api_base.trim_end_matches('/'))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for XaiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.into(),
            model: DEFAULT_MODEL.into(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
