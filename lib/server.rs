//! MCP server wiring for the X search tools.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::client::XSearchClient;
use crate::config::XaiConfig;
use crate::tools::{
    handle_analyze_topic, handle_search_posts, handle_search_user_posts, AnalyzeTopicInput,
    SearchPostsInput, SearchUserPostsInput,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

#[derive(Clone)]
pub struct Server {
    tool_router: ToolRouter<Self>,
    client: Arc<XSearchClient>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Server {
    pub fn new(config: XaiConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: Arc::new(XSearchClient::new(config)),
        }
    }

    /// The shared API client.
    pub fn client(&self) -> &XSearchClient {
        &self.client
    }
}

/// Wrap tool output text. Success and soft failure alike are plain text;
/// no tool call ever surfaces a protocol-level error.
fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Tool Router
//--------------------------------------------------------------------------------------------------

#[tool_router]
impl Server {
    /// Search X (Twitter) posts via Grok's x_search tool.
    #[tool(
        name = "search_posts",
        description = "Search X (Twitter) posts via Grok x_search and report the latest matching posts."
    )]
    async fn search_posts(
        &self,
        params: Parameters<SearchPostsInput>,
    ) -> Result<CallToolResult, McpError> {
        text_result(handle_search_posts(&self.client, params).await)
    }

    /// Search posts from a specific X user.
    #[tool(
        name = "search_user_posts",
        description = "Search posts from a specific X (Twitter) user, optionally filtered by keywords."
    )]
    async fn search_user_posts(
        &self,
        params: Parameters<SearchUserPostsInput>,
    ) -> Result<CallToolResult, McpError> {
        text_result(handle_search_user_posts(&self.client, params).await)
    }

    /// Analyze X reactions and discussion around a topic.
    #[tool(
        name = "analyze_topic",
        description = "Analyze X (Twitter) reactions to a topic: summary, sentiment, or timeline."
    )]
    async fn analyze_topic(
        &self,
        params: Parameters<AnalyzeTopicInput>,
    ) -> Result<CallToolResult, McpError> {
        text_result(handle_analyze_topic(&self.client, params).await)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Server Handler
//--------------------------------------------------------------------------------------------------

#[tool_handler]
impl ServerHandler for Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
