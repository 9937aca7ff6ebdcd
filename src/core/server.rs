//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` owns the immutable pieces every call needs: the tool registry,
//! the upstream client and the error reporter. The HTTP transport calls
//! [`McpServer::call_tool`] with a per-request [`AuthContext`]; the STDIO
//! transport goes through rmcp's `ToolRouter`, built from the same registry.

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, instrument, warn};

use super::auth::AuthContext;
use super::config::Config;
use super::error::Result as ServerResult;
use super::reporting::ErrorReporter;
use crate::domains::tools::{
    ErrorHook, ToolError, ToolRegistry, Upstream, VercelClient, build_tool_router,
};

const INSTRUCTIONS: &str = "Tools for the Vercel REST API: deployments, DNS records, \
     domains, projects, teams and users. Every tool performs one API request \
     and returns the JSON response.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Immutable tool table.
    registry: Arc<ToolRegistry>,

    /// Client for the Vercel REST API.
    upstream: Arc<dyn Upstream>,

    /// Optional webhook reporter.
    reporter: ErrorReporter,

    /// Whether `DEFAULT_ACCESS_TOKEN` was configured.
    default_auth: bool,

    /// Tool router for rmcp-driven transports.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured base URL.
    pub fn new(config: Config) -> ServerResult<Self> {
        let upstream = VercelClient::new(
            config.upstream.base_url.clone(),
            Some(config.upstream.timeout),
        )?;
        Self::with_upstream(config, Arc::new(upstream))
    }

    /// Create a server with a custom upstream.
    pub fn with_upstream(config: Config, upstream: Arc<dyn Upstream>) -> ServerResult<Self> {
        let config = Arc::new(config);
        let registry = Arc::new(ToolRegistry::new()?);
        let reporter = ErrorReporter::from_config(&config);
        let default_auth =
            AuthContext::from_token(config.credentials.default_access_token.as_deref());

        let hook_reporter = reporter.clone();
        let on_error: ErrorHook = Arc::new(move |name: &str, err: &ToolError| {
            log_failure(&hook_reporter, name, err)
        });

        Ok(Self {
            tool_router: build_tool_router::<Self>(
                registry.clone(),
                upstream.clone(),
                default_auth.clone(),
                on_error,
            ),
            default_auth: default_auth.is_some(),
            config,
            registry,
            upstream,
            reporter,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Whether rmcp-driven transports have a token to call tools with.
    pub fn has_default_auth(&self) -> bool {
        self.default_auth
    }

    /// Usage instructions reported on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// List all available tools as `tools/list` entries.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name on behalf of one request.
    #[instrument(skip(self, arguments, auth))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
        auth: &AuthContext,
    ) -> Result<CallToolResult, ToolError> {
        self.registry
            .call_tool(name, arguments, auth, self.upstream.as_ref())
            .await
            .inspect_err(|e| log_failure(&self.reporter, name, e))
    }
}

fn log_failure(reporter: &ErrorReporter, tool: &str, err: &ToolError) {
    match err {
        ToolError::Internal(detail) => error!("Tool {} failed internally: {}", tool, detail),
        ToolError::Upstream { .. } => warn!("Tool {} failed upstream: {}", tool, err),
        _ => {}
    }
    reporter.report(tool, err);
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
