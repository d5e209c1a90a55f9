//! # refkit MCP Server
//!
//! Model Context Protocol server exposing GitHub branch management (create,
//! resolve, force-update) and commit listing as discoverable tools for coding
//! agents. Tool failures carry the typed error kind, HTTP status, and raw
//! response body from [`refkit_gh`].

pub mod server;
pub mod tools;
pub mod types;

pub use server::RefkitMcpServer;
