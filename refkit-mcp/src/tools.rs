//! Typed parameters and handlers for each registered tool.
//!
//! Handlers take the shared [`GitHubClient`](refkit_gh::GitHubClient) and
//! return a [`ToolResponse`](crate::types::ToolResponse); the MCP wiring lives
//! in [`server`](crate::server).

pub mod branches;
pub mod commits;
pub mod users;
