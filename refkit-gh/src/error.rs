//! # GitHub Error Taxonomy
//!
//! Typed errors for GitHub API interactions. Every non-success HTTP response is
//! classified into an [`ApiError`] carrying a closed [`ErrorKind`], the HTTP
//! status, a message, and the raw response body for diagnostics. Local
//! pre-flight failures surface as [`ValidationError`].

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Closed set of failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  Generic,
  Validation,
  NotFound,
  Authentication,
  Permission,
  RateLimit,
  Conflict,
}

impl ErrorKind {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Generic => "generic",
      Self::Validation => "validation",
      Self::NotFound => "not_found",
      Self::Authentication => "authentication",
      Self::Permission => "permission",
      Self::RateLimit => "rate_limit",
      Self::Conflict => "conflict",
    }
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A failed GitHub API call.
///
/// Constructed once per failed request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
  pub kind: ErrorKind,
  pub status: u16,
  pub message: String,
  pub detail: Value,
  pub reset_at: Option<DateTime<Utc>>,
}

impl ApiError {
  /// Map an HTTP status and parsed response body to an error envelope.
  ///
  /// The body may be any JSON value; a `message` string field, when present,
  /// replaces the default message for the status.
  pub fn classify(status: u16, body: &Value) -> Self {
    let body_message = body.get("message").and_then(Value::as_str).map(str::to_string);
    let message_or = |default: &str| body_message.clone().unwrap_or_else(|| default.to_string());

    let (kind, message, reset_at) = match status {
      401 => (ErrorKind::Authentication, message_or("Authentication failed"), None),
      403 => (ErrorKind::Permission, message_or("Insufficient permissions"), None),
      404 => (
        ErrorKind::NotFound,
        format!("Resource not found: {}", message_or("Resource")),
        None,
      ),
      409 => (ErrorKind::Conflict, message_or("Conflict occurred"), None),
      422 => (ErrorKind::Validation, message_or("Validation failed"), None),
      429 => (
        ErrorKind::RateLimit,
        message_or("Rate limit exceeded"),
        Some(parse_reset_at(body.get("reset_at")).unwrap_or_else(Utc::now)),
      ),
      _ => (ErrorKind::Generic, message_or("Remote API error"), None),
    };

    Self {
      kind,
      status,
      message,
      detail: body.clone(),
      reset_at,
    }
  }

  pub fn new(kind: ErrorKind, status: u16, message: String, detail: Value) -> Self {
    Self {
      kind,
      status,
      message,
      detail,
      reset_at: None,
    }
  }

  /// Absence determined by a lookup rather than a raw HTTP response
  pub fn not_found(resource: impl fmt::Display) -> Self {
    Self::new(
      ErrorKind::NotFound,
      404,
      format!("Resource not found: {resource}"),
      json!({ "message": format!("{resource} not found") }),
    )
  }
}

/// Parse a rate-limit reset hint: RFC 3339, a naive ISO timestamp (taken as
/// UTC), or epoch seconds.
fn parse_reset_at(value: Option<&Value>) -> Option<DateTime<Utc>> {
  match value? {
    Value::String(s) => DateTime::parse_from_rfc3339(s)
      .map(|dt| dt.with_timezone(&Utc))
      .ok()
      .or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
          .ok()
          .map(|naive| naive.and_utc())
      }),
    Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
    _ => None,
  }
}

/// Syntactic rule violated by an owner, repository, or branch name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Branch name cannot be empty")]
  EmptyBranch,
  #[error("Branch name cannot contain '..'")]
  BranchDoubleDot,
  #[error("Branch name contains invalid characters: '{0}'")]
  BranchInvalidCharacters(String),
  #[error("Branch name cannot start or end with '/'")]
  BranchSlashBoundary,
  #[error("Branch name cannot end with '.lock'")]
  BranchLockSuffix,
  #[error("Repository name cannot be empty")]
  EmptyRepository,
  #[error(
    "Repository name can only contain lowercase letters, numbers, hyphens, periods, and underscores: '{0}'"
  )]
  RepositoryInvalidCharacters(String),
  #[error("Repository name cannot start or end with a period")]
  RepositoryPeriodBoundary,
  #[error("Owner name cannot be empty")]
  EmptyOwner,
  #[error("Owner name must start with a letter or number and can contain up to 39 characters: '{0}'")]
  InvalidOwner(String),
}

/// Errors returned by [`GitHubClient`](crate::GitHubClient) operations
#[derive(Debug, Error)]
pub enum GitHubError {
  #[error(transparent)]
  Api(#[from] ApiError),
  #[error(transparent)]
  InvalidInput(#[from] ValidationError),
  #[error("GitHub request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("Failed to decode GitHub response: {0}")]
  Decode(#[from] serde_json::Error),
}

impl GitHubError {
  pub const fn kind(&self) -> ErrorKind {
    match self {
      Self::Api(e) => e.kind,
      Self::InvalidInput(_) => ErrorKind::Validation,
      Self::Transport(_) | Self::Decode(_) => ErrorKind::Generic,
    }
  }

  /// HTTP status, present only for classified API failures
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Api(e) => Some(e.status),
      _ => None,
    }
  }

  pub const fn is_not_found_status(&self) -> bool {
    matches!(self.status(), Some(404))
  }

  pub const fn as_api(&self) -> Option<&ApiError> {
    match self {
      Self::Api(e) => Some(e),
      _ => None,
    }
  }
}
