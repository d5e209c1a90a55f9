//! # Client Configuration
//!
//! Process-wide settings for the GitHub client: API base URL, optional bearer
//! credential, and request timeout. Built once at startup and handed to
//! [`GitHubClient::new`](crate::GitHubClient::new).

use std::env;
use std::fmt;
use std::time::Duration;

use crate::consts::{API_BASE_URL, DEFAULT_TIMEOUT_SECS, TOKEN_ENV_VAR};

/// Settings shared by every request issued through a client
#[derive(Clone)]
pub struct GitHubConfig {
  pub base_url: String,
  pub token: Option<String>,
  pub timeout: Duration,
}

impl Default for GitHubConfig {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      token: None,
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
  }
}

impl GitHubConfig {
  /// Build a configuration from the process environment.
  ///
  /// The credential is read from `GITHUB_PERSONAL_ACCESS_TOKEN`. A missing or
  /// blank value means anonymous access.
  pub fn from_env() -> Self {
    let token = env::var(TOKEN_ENV_VAR).ok();
    Self::default().with_token(token)
  }

  /// Override the API base URL (trailing slashes are dropped)
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  /// Set or clear the bearer credential
  pub fn with_token(mut self, token: Option<String>) -> Self {
    self.token = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Whether requests will carry an `Authorization` header
  pub fn has_token(&self) -> bool {
    self.token.is_some()
  }
}

impl fmt::Debug for GitHubConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GitHubConfig")
      .field("base_url", &self.base_url)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("timeout", &self.timeout)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use refkit_test_utils::EnvTestGuard;
  use serial_test::serial;

  use super::*;

  #[test]
  fn test_default_config() {
    let config = GitHubConfig::default();
    assert_eq!(config.base_url, "https://api.github.com");
    assert!(config.token.is_none());
    assert_eq!(config.timeout, Duration::from_secs(30));
  }

  #[test]
  #[serial]
  fn test_from_env_reads_token() {
    let _guard = EnvTestGuard::with_var(TOKEN_ENV_VAR, Some("ghp_example"));

    let config = GitHubConfig::from_env();
    assert_eq!(config.token.as_deref(), Some("ghp_example"));
    assert!(config.has_token());
  }

  #[test]
  #[serial]
  fn test_from_env_without_token_is_anonymous() {
    let _guard = EnvTestGuard::with_var(TOKEN_ENV_VAR, None);

    let config = GitHubConfig::from_env();
    assert!(!config.has_token());
  }

  #[test]
  #[serial]
  fn test_from_env_blank_token_is_anonymous() {
    let _guard = EnvTestGuard::with_var(TOKEN_ENV_VAR, Some("   "));

    assert!(!GitHubConfig::from_env().has_token());
  }

  #[test]
  fn test_with_base_url_strips_trailing_slash() {
    let config = GitHubConfig::default().with_base_url("http://127.0.0.1:8080/");
    assert_eq!(config.base_url, "http://127.0.0.1:8080");
  }

  #[test]
  fn test_debug_redacts_token() {
    let config = GitHubConfig::default().with_token(Some("super-secret".to_string()));
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
  }
}
