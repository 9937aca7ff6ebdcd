//! STDIO transport implementation.
//!
//! rmcp drives the protocol over stdin/stdout; tool calls go through the
//! server's `ToolRouter`, authenticated with `DEFAULT_ACCESS_TOKEN`.

use rmcp::ServiceExt;
use tracing::{info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        if !server.has_default_auth() {
            warn!("DEFAULT_ACCESS_TOKEN is not set; every tool call will be rejected");
        }
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
