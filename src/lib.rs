//! Vercel MCP Server Library
//!
//! This crate exposes the Vercel REST API as a catalog of Model Context
//! Protocol (MCP) tools. Each tool validates its arguments, performs exactly
//! one upstream request with the caller's bearer token, and returns the JSON
//! response as text.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, per-request auth, error
//!   reporting, the server handler and the HTTP/STDIO transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the Vercel tool catalog, validation and the upstream client
//!
//! # Example
//!
//! ```rust,no_run
//! use vercel_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{AuthContext, Config, Error, McpServer, Result};
