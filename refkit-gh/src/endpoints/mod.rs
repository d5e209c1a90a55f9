//! # GitHub API Endpoints
//!
//! Endpoint implementations grouped by GitHub API resource: git references
//! and branches, commits, and users.

pub mod branches;
pub mod commits;
pub mod users;
