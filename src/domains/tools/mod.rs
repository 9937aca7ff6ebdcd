//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Each tool wraps exactly one Vercel REST API operation.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per resource)
//! - `handlers.rs` - The `VercelTool` contract every tool implements
//! - `validation.rs` - Schema-driven argument validation
//! - `timestamp.rs` - ISO 8601 to epoch-millisecond coercion
//! - `upstream.rs` - Upstream request description and HTTP client
//! - `output.rs` - Result formatting
//! - `registry.rs` - Central tool registry and dispatch
//! - `router.rs` - rmcp ToolRouter builder for STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct and a unit struct implementing `VercelTool` in the
//!    matching file under `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to the resource's list in `registry.rs`
//!
//! The router and the HTTP transport pick it up from the registry.

pub mod definitions;
pub mod error;
mod handlers;
pub mod output;
mod registry;
pub mod router;
pub mod timestamp;
pub mod upstream;
pub mod validation;

pub use error::{FieldViolation, ToolError};
pub use handlers::VercelTool;
pub use registry::{ToolDefinition, ToolRegistry};
pub use router::{ErrorHook, build_tool_router};
pub use upstream::{Upstream, UpstreamRequest, VercelClient};
