//! GitHub Commits API endpoint implementations.

use tracing::{info, instrument};

use super::branches::repo_path;
use crate::client::{GitHubClient, build_url};
use crate::error::GitHubError;
use crate::models::CommitSummary;

impl GitHubClient {
  /// List commits for a repository, newest first.
  ///
  /// `sha` may be a branch name or commit hash to start listing from. Paging
  /// parameters are passed through unchanged.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_commits(
    &self,
    owner: &str,
    repo: &str,
    page: Option<u32>,
    per_page: Option<u32>,
    sha: Option<&str>,
  ) -> Result<Vec<CommitSummary>, GitHubError> {
    let repo_path = repo_path(owner, repo)?;
    info!("Listing commits for {}", repo_path);

    let url = build_url(
      &self.api_url(&format!("{repo_path}/commits")),
      &[
        ("page", page.map(|p| p.to_string())),
        ("per_page", per_page.map(|p| p.to_string())),
        ("sha", sha.map(str::to_string)),
      ],
    );
    self.get_json(&url).await
  }
}
