//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests. Every POST resolves its own
//! [`AuthContext`] from the request headers before anything else happens, so
//! concurrent requests with different tokens never share credentials.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::auth::AuthContext;
use crate::domains::tools::{ToolError, output::result_to_json};

/// MCP protocol revision reported on initialize.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Error response for a failed tool operation.
    pub fn tool_error(id: Option<Value>, err: &ToolError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: err.code(),
                message: err.public_message(),
                data: err.data(),
            }),
        }
    }

    /// Parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Wrong HTTP verb on the RPC endpoint.
    pub fn method_not_allowed() -> Self {
        Self::error(None, -32000, "Method not allowed.")
    }
}

/// HTTP status paired with a tool error.
fn status_for(err: &ToolError) -> StatusCode {
    match err {
        ToolError::Authentication(_) => StatusCode::UNAUTHORIZED,
        ToolError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl AppState {
    /// Create handler state for the given server.
    pub fn new(server: McpServer, rpc_path: impl Into<String>) -> Self {
        Self {
            server,
            rpc_path: rpc_path.into(),
        }
    }
}

/// Build the axum application for the given state and config.
pub fn router(state: AppState, config: &HttpConfig) -> Router {
    let mut app = Router::new()
        .route(
            &config.rpc_path,
            post(handle_rpc)
                .get(method_not_allowed)
                .delete(method_not_allowed),
        )
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = router(
            AppState::new(server, self.config.rpc_path.clone()),
            &self.config,
        );

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!(
            "Send POST requests to {} with JSON-RPC messages and an Authorization: Bearer <token> header",
            state.rpc_path
        )
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET and DELETE on the RPC path.
async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(JsonRpcResponse::method_not_allowed()),
    )
        .into_response()
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    let auth = match AuthContext::from_headers(&headers) {
        Ok(auth) => auth,
        Err(e) => {
            warn!("Rejected request without access token");
            return (status_for(&e), Json(JsonRpcResponse::tool_error(None, &e))).into_response();
        }
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::JsonDataError(e)) => {
            warn!("Invalid JSON-RPC request: {}", e.body_text());
            return (StatusCode::BAD_REQUEST, Json(JsonRpcResponse::invalid_request(None)))
                .into_response();
        }
        Err(e) => {
            warn!("Unparseable request body: {}", e.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::parse_error(format!(
                    "Parse error: {}",
                    e.body_text()
                ))),
            )
                .into_response();
        }
    };

    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    // Notifications are never answered.
    if request.method.starts_with("notifications/") {
        info!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let (status, response) = process_request(&state, &auth, request).await;
    (status, Json(response)).into_response()
}

/// Process a JSON-RPC request and return the response.
async fn process_request(
    state: &AppState,
    auth: &AuthContext,
    request: JsonRpcRequest,
) -> (StatusCode, JsonRpcResponse) {
    if request.jsonrpc != "2.0" {
        return (StatusCode::OK, JsonRpcResponse::invalid_request(request.id));
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(state, request),
        "tools/list" => handle_tools_list(state, request),
        "tools/call" => return handle_tools_call(state, auth, request).await,
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };

    (StatusCode::OK, response)
}

/// Handle initialize request.
fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": state.server.instructions()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let result = serde_json::json!({
        "tools": state.server.list_tools()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
async fn handle_tools_call(
    state: &AppState,
    auth: &AuthContext,
    request: JsonRpcRequest,
) -> (StatusCode, JsonRpcResponse) {
    let params = request.params.unwrap_or(Value::Null);

    let Some(name) = params.get("name").and_then(Value::as_str) else {
        let err = ToolError::invalid_field("name", "tool name is required");
        return (status_for(&err), JsonRpcResponse::tool_error(request.id, &err));
    };
    info!("Processing tools/call request for {}", name);

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    match state.server.call_tool(name, arguments, auth).await {
        Ok(result) => (
            StatusCode::OK,
            JsonRpcResponse::success(request.id, result_to_json(&result)),
        ),
        Err(e) => (status_for(&e), JsonRpcResponse::tool_error(request.id, &e)),
    }
}
