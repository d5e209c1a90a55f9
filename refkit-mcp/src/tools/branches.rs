//! Parameter structs and handlers for branch tools.

use refkit_gh::{BranchRef, GitHubClient};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::types::{BranchExistsResponse, BranchShaResponse, ToolResponse};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateBranchOptions {
  /// Name of the branch to create (without the `refs/heads/` prefix).
  #[serde(rename = "ref")]
  pub branch: String,
  /// Commit hash the new branch points at.
  pub sha: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateBranchParams {
  /// Repository owner (user or organization).
  pub owner: String,
  /// Repository name.
  pub repo: String,
  pub options: CreateBranchOptions,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BranchParams {
  /// Repository owner (user or organization).
  pub owner: String,
  /// Repository name.
  pub repo: String,
  /// Branch name.
  pub branch: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateBranchFromRefParams {
  /// Repository owner (user or organization).
  pub owner: String,
  /// Repository name.
  pub repo: String,
  /// Name of the branch to create.
  pub new_branch: String,
  /// Source branch. Defaults to `main`, then `master`.
  pub from_branch: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateBranchParams {
  /// Repository owner (user or organization).
  pub owner: String,
  /// Repository name.
  pub repo: String,
  /// Branch to move.
  pub branch: String,
  /// Commit hash the branch is force-moved to.
  pub sha: String,
}

pub async fn create_branch(client: &GitHubClient, params: CreateBranchParams) -> ToolResponse<BranchRef> {
  client
    .create_branch(&params.owner, &params.repo, &params.options.branch, &params.options.sha)
    .await
    .into()
}

pub async fn get_branch_sha(client: &GitHubClient, params: BranchParams) -> ToolResponse<BranchShaResponse> {
  client
    .get_branch_sha(&params.owner, &params.repo, &params.branch)
    .await
    .map(|sha| BranchShaResponse {
      branch: params.branch.trim().to_string(),
      sha,
    })
    .into()
}

pub async fn create_branch_from_ref(
  client: &GitHubClient,
  params: CreateBranchFromRefParams,
) -> ToolResponse<BranchRef> {
  client
    .create_branch_from(
      &params.owner,
      &params.repo,
      &params.new_branch,
      params.from_branch.as_deref(),
    )
    .await
    .into()
}

pub async fn update_branch(client: &GitHubClient, params: UpdateBranchParams) -> ToolResponse<BranchRef> {
  client
    .update_branch(&params.owner, &params.repo, &params.branch, &params.sha)
    .await
    .into()
}

pub async fn check_branch_exists(client: &GitHubClient, params: BranchParams) -> ToolResponse<BranchExistsResponse> {
  client
    .branch_exists(&params.owner, &params.repo, &params.branch)
    .await
    .map(|exists| BranchExistsResponse {
      branch: params.branch.trim().to_string(),
      exists,
    })
    .into()
}
