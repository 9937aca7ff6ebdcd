//! Transport layer for the MCP server.
//!
//! This module provides two transport implementations:
//! - **HTTP**: JSON-RPC over POST with per-request credentials - feature: `http` (default)
//! - **STDIO**: Standard input/output via rmcp - feature: `stdio`
//!
//! Each transport handles the connection lifecycle and delegates tool calls
//! to the MCP server.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
