//! Tool-specific error types.
//!
//! Every failure that can happen between receiving a tool call and returning
//! its result is folded into [`ToolError`] before it reaches a transport.
//! Each variant maps to a stable JSON-RPC error code.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use serde::Serialize;
use thiserror::Error;

/// JSON-RPC error code for a missing or unusable access token.
pub const AUTHENTICATION_ERROR_CODE: i32 = -32001;

/// JSON-RPC error code for a failed upstream API call.
pub const UPSTREAM_ERROR_CODE: i32 = -32002;

/// JSON-RPC error code for an unknown tool name.
pub const NOT_FOUND_ERROR_CODE: i32 = -32601;

/// JSON-RPC error code for arguments rejected by a tool's schema.
pub const VALIDATION_ERROR_CODE: i32 = -32602;

/// JSON-RPC error code for unexpected failures.
pub const INTERNAL_ERROR_CODE: i32 = -32603;

/// A single argument that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path of the offending field (empty for the argument object itself).
    pub field: String,

    /// The constraint that was violated.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "'{}': {}", self.field, self.message)
        }
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No access token could be resolved for the request.
    #[error("Authentication required: {0}")]
    Authentication(String),

    /// The arguments did not satisfy the tool's parameter schema.
    #[error("Invalid arguments: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The upstream API answered with a non-2xx status or could not be reached.
    #[error("{}", upstream_message(.status, .body))]
    Upstream {
        /// HTTP status of the upstream response, absent for transport failures.
        status: Option<u16>,
        /// Upstream response body, or the transport error text.
        body: String,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn upstream_message(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(status) => format!("Upstream API returned HTTP {}: {}", status, body),
        None => format!("Upstream API request failed: {}", body),
    }
}

impl ToolError {
    /// Create a new authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a validation error for a single field.
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(field, msg)])
    }

    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create an error for an upstream response with a non-2xx status.
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Create an error for an upstream request that never produced a response.
    pub fn upstream_transport(err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            status: None,
            body: err.to_string(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Authentication(_) => AUTHENTICATION_ERROR_CODE,
            Self::Validation(_) => VALIDATION_ERROR_CODE,
            Self::NotFound(_) => NOT_FOUND_ERROR_CODE,
            Self::Upstream { .. } => UPSTREAM_ERROR_CODE,
            Self::Internal(_) => INTERNAL_ERROR_CODE,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Internal errors are replaced with a generic message; their detail only
    /// goes to the server log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }

    /// Structured detail attached to the error envelope, if any.
    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(violations) => Some(serde_json::json!({ "violations": violations })),
            Self::Upstream { status, body } => Some(serde_json::json!({
                "status": status,
                "body": body,
            })),
            Self::NotFound(name) => Some(serde_json::json!({ "tool": name })),
            Self::Authentication(_) | Self::Internal(_) => None,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::new(ErrorCode(err.code()), err.public_message(), err.data())
    }
}
