//! Constants for the refkit-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("refkit/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Content-Type sent with every request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Environment variable holding the optional bearer credential
pub const TOKEN_ENV_VAR: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";

/// Request timeout applied when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Branch names tried, in order, when no source branch is given
pub const DEFAULT_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// Prefix of every branch reference path
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";
