//! Structured response and error types for refkit-mcp tools.
//!
//! Every tool returns a JSON-serialized `ToolResponse<T>`: either an `ok`
//! payload or a structured error whose `code` is the GitHub error kind.

use refkit_gh::{CommitSummary, ErrorKind, GitHubError};
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

/// Standard envelope for all tool responses.
#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum ToolResponse<T: Serialize> {
  #[serde(rename = "ok")]
  Ok { data: T },
  #[serde(rename = "error")]
  Error { error: ToolError },
}

impl<T: Serialize> ToolResponse<T> {
  pub fn ok(data: T) -> Self {
    Self::Ok { data }
  }

  /// Serialize to a `CallToolResult`, setting `is_error` for error responses.
  pub fn to_call_tool_result(&self) -> CallToolResult {
    let json = serde_json::to_string(self).unwrap_or_else(|e| {
      format!(r#"{{"status":"error","error":{{"code":"internal","message":"Serialization failed: {e}"}}}}"#)
    });
    let is_error = matches!(self, Self::Error { .. });
    let mut result = CallToolResult::success(vec![Content::text(json)]);
    result.is_error = Some(is_error);
    result
  }
}

impl<T: Serialize> From<Result<T, GitHubError>> for ToolResponse<T> {
  fn from(result: Result<T, GitHubError>) -> Self {
    match result {
      Ok(data) => Self::ok(data),
      Err(e) => Self::Error { error: ToolError::from(&e) },
    }
  }
}

/// Consistent error shape returned by all tools.
#[derive(Debug, Serialize)]
pub struct ToolError {
  pub code: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<u16>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reset_at: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hint: Option<String>,
}

impl From<&GitHubError> for ToolError {
  fn from(error: &GitHubError) -> Self {
    let api = error.as_api();
    let kind = error.kind();
    Self {
      code: kind.as_str().to_string(),
      message: error.to_string(),
      status: error.status(),
      reset_at: api.and_then(|a| a.reset_at).map(|t| t.to_rfc3339()),
      detail: api.map(|a| a.detail.clone()).filter(|d| !d.is_null()),
      hint: hint_for(kind),
    }
  }
}

fn hint_for(kind: ErrorKind) -> Option<String> {
  let hint = match kind {
    ErrorKind::Authentication => "Set GITHUB_PERSONAL_ACCESS_TOKEN to a valid token and restart the server.",
    ErrorKind::Permission => "The configured token lacks access to this repository.",
    ErrorKind::RateLimit => "Wait until `reset_at` before retrying.",
    _ => return None,
  };
  Some(hint.to_string())
}

// ---------------------------------------------------------------------------
// Branch responses
// ---------------------------------------------------------------------------

/// Response for `get_branch_sha`.
#[derive(Debug, Serialize)]
pub struct BranchShaResponse {
  pub branch: String,
  pub sha: String,
}

/// Response for `check_branch_exists`.
#[derive(Debug, Serialize)]
pub struct BranchExistsResponse {
  pub branch: String,
  pub exists: bool,
}

// ---------------------------------------------------------------------------
// Commit and user responses
// ---------------------------------------------------------------------------

/// Response for `list_commits`.
#[derive(Debug, Serialize)]
pub struct ListCommitsResponse {
  pub commits: Vec<CommitSummary>,
}

/// Response for `check_user_exists`.
#[derive(Debug, Serialize)]
pub struct UserExistsResponse {
  pub username: String,
  pub exists: bool,
}

#[cfg(test)]
mod tests {
  use refkit_gh::{ApiError, ValidationError};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_ok_response_shape() {
    let response = ToolResponse::ok(BranchShaResponse {
      branch: "main".to_string(),
      sha: "abc123".to_string(),
    });

    assert_eq!(
      serde_json::to_value(&response).unwrap(),
      json!({ "status": "ok", "data": { "branch": "main", "sha": "abc123" } })
    );
    assert_eq!(response.to_call_tool_result().is_error, Some(false));
  }

  #[test]
  fn test_api_error_envelope() {
    let error = GitHubError::from(ApiError::classify(409, &json!({ "message": "Reference update conflict" })));
    let response: ToolResponse<()> = Err(error).into();

    let json = serde_json::to_string_pretty(&response).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "status": "error",
      "error": {
        "code": "conflict",
        "message": "Reference update conflict",
        "status": 409,
        "detail": {
          "message": "Reference update conflict"
        }
      }
    }
    "#);
    assert_eq!(response.to_call_tool_result().is_error, Some(true));
  }

  #[test]
  fn test_rate_limit_error_carries_reset_and_hint() {
    let error = GitHubError::from(ApiError::classify(429, &json!({ "reset_at": "2030-01-01T00:00:00Z" })));
    let tool_error = ToolError::from(&error);

    assert_eq!(tool_error.code, "rate_limit");
    assert_eq!(tool_error.status, Some(429));
    assert_eq!(tool_error.reset_at.as_deref(), Some("2030-01-01T00:00:00+00:00"));
    assert!(tool_error.hint.is_some());
  }

  #[test]
  fn test_validation_error_has_no_status() {
    let error = GitHubError::from(ValidationError::BranchLockSuffix);
    let tool_error = ToolError::from(&error);

    assert_eq!(tool_error.code, "validation");
    assert_eq!(tool_error.message, "Branch name cannot end with '.lock'");
    assert_eq!(tool_error.status, None);
    assert_eq!(tool_error.detail, None);
  }
}
