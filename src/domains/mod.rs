//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain: tools backed by the Vercel REST API.

pub mod tools;
