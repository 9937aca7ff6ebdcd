//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including configuration, error handling, per-request authentication,
//! error reporting, server lifecycle management and the transport layer.

pub mod auth;
pub mod config;
pub mod error;
pub mod reporting;
pub mod server;
pub mod transport;

pub use auth::AuthContext;
pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
