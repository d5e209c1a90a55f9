//! Parameter structs and handlers for commit tools.

use refkit_gh::GitHubClient;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::types::{ListCommitsResponse, ToolResponse};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListCommitsParams {
  /// Repository owner (user or organization).
  pub owner: String,
  /// Repository name.
  pub repo: String,
  /// Page number of the results to fetch.
  pub page: Option<u32>,
  /// Results per page (GitHub caps this at 100).
  pub per_page: Option<u32>,
  /// Branch name or commit hash to start listing from.
  pub sha: Option<String>,
}

pub async fn list_commits(client: &GitHubClient, params: ListCommitsParams) -> ToolResponse<ListCommitsResponse> {
  client
    .list_commits(
      &params.owner,
      &params.repo,
      params.page,
      params.per_page,
      params.sha.as_deref(),
    )
    .await
    .map(|commits| ListCommitsResponse { commits })
    .into()
}
