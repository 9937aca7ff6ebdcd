//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! The rmcp-driven transports (STDIO) dispatch through a `ToolRouter`. Every
//! route forwards to [`ToolRegistry::call_tool`], so both transports share one
//! validation and request path.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::CallToolResult,
};
use serde_json::Value;

use super::error::ToolError;
use super::registry::ToolRegistry;
use super::upstream::Upstream;
use crate::core::auth::AuthContext;

/// Callback invoked with the tool name for every failed call.
pub type ErrorHook = Arc<dyn Fn(&str, &ToolError) + Send + Sync>;

/// Build the tool router with all registered tools.
///
/// `auth` is the process-wide context used by transports without per-request
/// headers; when it is `None`, every call fails with an authentication error.
pub fn build_tool_router<S>(
    registry: Arc<ToolRegistry>,
    upstream: Arc<dyn Upstream>,
    auth: Option<AuthContext>,
    on_error: ErrorHook,
) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .list_tools()
        .into_iter()
        .fold(ToolRouter::new(), |router, tool| {
            let name = tool.name.to_string();
            let registry = registry.clone();
            let upstream = upstream.clone();
            let auth = auth.clone();
            let on_error = on_error.clone();

            router.with_route(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
                let args = Value::Object(ctx.arguments.clone().unwrap_or_default());
                let name = name.clone();
                let registry = registry.clone();
                let upstream = upstream.clone();
                let auth = auth.clone();
                let on_error = on_error.clone();

                async move {
                    dispatch(
                        &registry,
                        upstream.as_ref(),
                        auth.as_ref(),
                        &name,
                        args,
                        &on_error,
                    )
                    .await
                }
                .boxed()
            }))
        })
}

/// Body of every route: authenticate, call through the registry, and hand
/// failures to the hook before converting them for rmcp.
async fn dispatch(
    registry: &ToolRegistry,
    upstream: &dyn Upstream,
    auth: Option<&AuthContext>,
    name: &str,
    args: Value,
    on_error: &ErrorHook,
) -> Result<CallToolResult, McpError> {
    let result = match auth {
        Some(auth) => registry.call_tool(name, args, auth, upstream).await,
        None => Err(ToolError::authentication(
            "set DEFAULT_ACCESS_TOKEN to call Vercel tools",
        )),
    };
    result.map_err(|e| {
        on_error(name, &e);
        McpError::from(e)
    })
}
