//! # Name Validation
//!
//! Pure syntactic checks for branch, repository, and owner names, applied
//! before any request leaves the process.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static BRANCH_INVALID_CHARS_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\s~^:?*\[\\]").expect("Failed to compile branch character regex"));

static REPOSITORY_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-z0-9_.-]+$").expect("Failed to compile repository name regex"));

// Alphanumeric runs joined by single hyphens: no leading, trailing, or doubled '-'.
static OWNER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Failed to compile owner name regex"));

const OWNER_MAX_LEN: usize = 39;

/// Validate a branch name, returning it trimmed.
pub fn validate_branch_name(branch: &str) -> Result<String, ValidationError> {
  let sanitized = branch.trim();

  if sanitized.is_empty() {
    return Err(ValidationError::EmptyBranch);
  }
  if sanitized.contains("..") {
    return Err(ValidationError::BranchDoubleDot);
  }
  if BRANCH_INVALID_CHARS_REGEX.is_match(sanitized) {
    return Err(ValidationError::BranchInvalidCharacters(sanitized.to_string()));
  }
  if sanitized.starts_with('/') || sanitized.ends_with('/') {
    return Err(ValidationError::BranchSlashBoundary);
  }
  if sanitized.ends_with(".lock") {
    return Err(ValidationError::BranchLockSuffix);
  }

  Ok(sanitized.to_string())
}

/// Validate a repository name, returning it trimmed and lower-cased.
pub fn validate_repository_name(name: &str) -> Result<String, ValidationError> {
  let sanitized = name.trim().to_lowercase();

  if sanitized.is_empty() {
    return Err(ValidationError::EmptyRepository);
  }
  if !REPOSITORY_REGEX.is_match(&sanitized) {
    return Err(ValidationError::RepositoryInvalidCharacters(sanitized));
  }
  if sanitized.starts_with('.') || sanitized.ends_with('.') {
    return Err(ValidationError::RepositoryPeriodBoundary);
  }

  Ok(sanitized)
}

/// Validate an owner (user or organization) name, returning it trimmed and
/// lower-cased.
pub fn validate_owner_name(owner: &str) -> Result<String, ValidationError> {
  let sanitized = owner.trim().to_lowercase();

  if sanitized.is_empty() {
    return Err(ValidationError::EmptyOwner);
  }
  if sanitized.len() > OWNER_MAX_LEN || !OWNER_REGEX.is_match(&sanitized) {
    return Err(ValidationError::InvalidOwner(sanitized));
  }

  Ok(sanitized)
}
