//! # GitHub Branch Endpoints
//!
//! Branch lookup, default-branch resolution, and reference creation/update
//! through the git refs API.

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::consts::{BRANCH_REF_PREFIX, DEFAULT_BRANCH_CANDIDATES};
use crate::error::{ApiError, ErrorKind, GitHubError};
use crate::models::{BranchRef, CreateBranchRequest, GitHubBranch};
use crate::validate::{validate_branch_name, validate_owner_name, validate_repository_name};

/// Validated `repos/{owner}/{repo}` path prefix
pub(crate) fn repo_path(owner: &str, repo: &str) -> Result<String, GitHubError> {
  let owner = validate_owner_name(owner)?;
  let repo = validate_repository_name(repo)?;
  Ok(format!("repos/{owner}/{repo}"))
}

/// Percent-encode each `/`-separated segment of a branch name for use in a
/// URL path. `#`, `%` and `?` would otherwise change which ref is addressed.
pub(crate) fn branch_path(branch: &str) -> String {
  branch
    .split('/')
    .map(|segment| urlencoding::encode(segment).into_owned())
    .collect::<Vec<_>>()
    .join("/")
}

impl GitHubClient {
  /// Fetch the reference for a branch.
  ///
  /// # Errors
  ///
  /// Fails with a validation error before any request for malformed names,
  /// and with the classified API error (commonly `NotFound`) otherwise.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_branch_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<BranchRef, GitHubError> {
    let repo_path = repo_path(owner, repo)?;
    let branch = validate_branch_name(branch)?;

    let url = self.api_url(&format!("{repo_path}/git/refs/heads/{}", branch_path(&branch)));
    self.get_json(&url).await
  }

  /// Commit hash a branch currently points at
  pub async fn get_branch_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String, GitHubError> {
    let reference = self.get_branch_ref(owner, repo, branch).await?;
    Ok(reference.object.sha)
  }

  /// Fetch a branch summary from the branches API
  #[instrument(skip(self), level = "debug")]
  pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<GitHubBranch, GitHubError> {
    let repo_path = repo_path(owner, repo)?;
    let branch = validate_branch_name(branch)?;

    let url = self.api_url(&format!("{repo_path}/branches/{}", branch_path(&branch)));
    self.get_json(&url).await
  }

  /// Whether a branch exists.
  ///
  /// Only a 404 maps to `false`; authentication, rate-limit, and transport
  /// failures are returned as errors.
  #[instrument(skip(self), level = "debug")]
  pub async fn branch_exists(&self, owner: &str, repo: &str, branch: &str) -> Result<bool, GitHubError> {
    match self.get_branch(owner, repo, branch).await {
      Ok(_) => Ok(true),
      Err(e) if e.is_not_found_status() => {
        debug!("Branch '{}' not found in {}/{}", branch, owner, repo);
        Ok(false)
      }
      Err(e) => Err(e),
    }
  }

  /// Determine the commit to branch from.
  ///
  /// With `from_branch`, that branch's hash is returned and any failure is
  /// propagated. Without it (or when blank), `main` is tried and then
  /// `master`, strictly in that order.
  #[instrument(skip(self), level = "debug")]
  pub async fn resolve_base_sha(
    &self,
    owner: &str,
    repo: &str,
    from_branch: Option<&str>,
  ) -> Result<String, GitHubError> {
    repo_path(owner, repo)?;

    match from_branch.map(str::trim).filter(|b| !b.is_empty()) {
      Some(branch) => self.get_branch_sha(owner, repo, branch).await,
      None => self.resolve_default_branch_sha(owner, repo).await,
    }
  }

  async fn resolve_default_branch_sha(&self, owner: &str, repo: &str) -> Result<String, GitHubError> {
    let [primary, fallback] = DEFAULT_BRANCH_CANDIDATES;

    match self.get_branch_sha(owner, repo, primary).await {
      Ok(sha) => return Ok(sha),
      Err(e) => debug!("Lookup of '{}' failed ({}), trying '{}'", primary, e, fallback),
    }

    match self.get_branch_sha(owner, repo, fallback).await {
      Ok(sha) => Ok(sha),
      Err(e) if e.kind() == ErrorKind::NotFound || matches!(e, GitHubError::Decode(_)) => {
        let message = format!("Could not find default branch (tried '{primary}' and '{fallback}')");
        Err(ApiError::new(ErrorKind::NotFound, 404, message.clone(), json!({ "message": message })).into())
      }
      Err(e) => Err(e),
    }
  }

  /// Create `refs/heads/<branch_name>` pointing at `sha`.
  ///
  /// # Errors
  ///
  /// Commonly `Validation` (HTTP 422) when the reference already exists or the
  /// hash is malformed.
  #[instrument(skip(self), level = "debug")]
  pub async fn create_branch(
    &self,
    owner: &str,
    repo: &str,
    branch_name: &str,
    sha: &str,
  ) -> Result<BranchRef, GitHubError> {
    let repo_path = repo_path(owner, repo)?;
    let branch_name = validate_branch_name(branch_name)?;
    info!("Creating branch '{}' in {} at {}", branch_name, repo_path, sha);

    let url = self.api_url(&format!("{repo_path}/git/refs"));
    let body = json!({
      "ref": format!("{BRANCH_REF_PREFIX}{branch_name}"),
      "sha": sha,
    });
    self.send_json(Method::POST, &url, &body).await
  }

  /// Create a branch from a named source branch, or from the repository's
  /// de-facto default when none is given.
  #[instrument(skip(self), level = "debug")]
  pub async fn create_branch_from(
    &self,
    owner: &str,
    repo: &str,
    new_branch: &str,
    from_branch: Option<&str>,
  ) -> Result<BranchRef, GitHubError> {
    self
      .create_branch_from_request(&CreateBranchRequest::new(owner, repo, new_branch, from_branch))
      .await
  }

  pub async fn create_branch_from_request(&self, request: &CreateBranchRequest) -> Result<BranchRef, GitHubError> {
    let request = request.validated()?;

    let sha = self
      .resolve_base_sha(&request.owner, &request.repo, request.from_branch.as_deref())
      .await?;
    self
      .create_branch(&request.owner, &request.repo, &request.branch_name, &sha)
      .await
  }

  /// Force-move a branch to `sha`.
  ///
  /// The update is always forced, so commits reachable only from the previous
  /// tip may be discarded.
  #[instrument(skip(self), level = "debug")]
  pub async fn update_branch(
    &self,
    owner: &str,
    repo: &str,
    branch: &str,
    sha: &str,
  ) -> Result<BranchRef, GitHubError> {
    let repo_path = repo_path(owner, repo)?;
    let branch = validate_branch_name(branch)?;
    info!("Force-updating branch '{}' in {} to {}", branch, repo_path, sha);

    let url = self.api_url(&format!("{repo_path}/git/refs/heads/{}", branch_path(&branch)));
    let body = json!({
      "sha": sha,
      "force": true,
    });
    self.send_json(Method::PATCH, &url, &body).await
  }
}
