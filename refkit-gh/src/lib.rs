//! # GitHub API Client
//!
//! Typed GitHub REST integration for branch and commit management: name
//! validation, a single request gateway, classification of HTTP failures into
//! a closed error taxonomy, and default-branch resolution for branch creation.

pub mod client;
pub mod config;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod validate;

// Re-export the client
pub use client::{GitHubClient, ResponseBody, build_url};
pub use config::GitHubConfig;
pub use error::{ApiError, ErrorKind, GitHubError, ValidationError};
// Re-export models
pub use models::{BranchRef, CommitAuthor, CommitSummary, CreateBranchRequest, GitHubBranch, GitHubUser, GitObject};
