use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::error::GitHubError;
use crate::models::GitHubUser;
use crate::validate::validate_owner_name;

impl GitHubClient {
  /// Get a user's public profile
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user(&self, username: &str) -> Result<GitHubUser, GitHubError> {
    let username = validate_owner_name(username)?;
    let url = self.api_url(&format!("users/{username}"));
    self.get_json(&url).await
  }

  /// Whether a user exists. Only a 404 maps to `false`.
  #[instrument(skip(self), level = "debug")]
  pub async fn user_exists(&self, username: &str) -> Result<bool, GitHubError> {
    match self.get_user(username).await {
      Ok(_) => Ok(true),
      Err(e) if e.is_not_found_status() => {
        debug!("User '{}' not found", username);
        Ok(false)
      }
      Err(e) => Err(e),
    }
  }
}
