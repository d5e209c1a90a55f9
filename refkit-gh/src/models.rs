use serde::{Deserialize, Serialize};

use crate::consts::BRANCH_REF_PREFIX;
use crate::error::ValidationError;
use crate::validate::{validate_branch_name, validate_owner_name, validate_repository_name};

/// A named reference snapshot as returned by the git refs API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
  #[serde(rename = "ref")]
  pub ref_name: String,
  pub object: GitObject,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub node_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

impl BranchRef {
  /// Commit hash the reference points at
  pub fn sha(&self) -> &str {
    &self.object.sha
  }

  /// Short branch name, when the reference lives under `refs/heads/`
  pub fn branch_name(&self) -> Option<&str> {
    self.ref_name.strip_prefix(BRANCH_REF_PREFIX)
  }
}

/// The object a reference points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitObject {
  pub sha: String,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub object_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

/// Input for creating a branch reference. Validated before any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchRequest {
  pub owner: String,
  pub repo: String,
  pub branch_name: String,
  pub from_branch: Option<String>,
}

impl CreateBranchRequest {
  pub fn new(owner: &str, repo: &str, branch_name: &str, from_branch: Option<&str>) -> Self {
    Self {
      owner: owner.to_string(),
      repo: repo.to_string(),
      branch_name: branch_name.to_string(),
      from_branch: from_branch.map(str::to_string),
    }
  }

  /// Return the sanitized request, or the first rule violated.
  ///
  /// A blank `from_branch` is treated as omitted.
  pub fn validated(&self) -> Result<Self, ValidationError> {
    let from_branch = match self.from_branch.as_deref().map(str::trim) {
      Some(branch) if !branch.is_empty() => Some(validate_branch_name(branch)?),
      _ => None,
    };

    Ok(Self {
      owner: validate_owner_name(&self.owner)?,
      repo: validate_repository_name(&self.repo)?,
      branch_name: validate_branch_name(&self.branch_name)?,
      from_branch,
    })
  }
}

/// Branch summary from the branches API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubBranch {
  pub name: String,
  pub commit: BranchCommit,
  #[serde(default)]
  pub protected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCommit {
  pub sha: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

/// Represents a GitHub user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub html_url: Option<String>,
}

/// One entry of the list-commits API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
  pub sha: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub node_id: Option<String>,
  pub commit: CommitDetail,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub html_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
  pub message: String,
  #[serde(default)]
  pub author: Option<CommitAuthor>,
  #[serde(default)]
  pub committer: Option<CommitAuthor>,
}

/// Git identity attached to a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
  pub name: String,
  pub email: String,
  pub date: String,
}
