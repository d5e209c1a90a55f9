//! Parameter structs and handlers for user tools.

use refkit_gh::GitHubClient;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::types::{ToolResponse, UserExistsResponse};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserParams {
  /// GitHub login to look up.
  pub username: String,
}

pub async fn check_user_exists(client: &GitHubClient, params: UserParams) -> ToolResponse<UserExistsResponse> {
  client
    .user_exists(&params.username)
    .await
    .map(|exists| UserExistsResponse {
      username: params.username.trim().to_lowercase(),
      exists,
    })
    .into()
}

#[cfg(test)]
mod tests {
  use refkit_gh::GitHubConfig;
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  #[tokio::test]
  async fn test_check_user_exists_tool() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(GitHubConfig::default().with_base_url(mock_server.uri()))?;

    Mock::given(method("GET"))
      .and(path("/users/ghost-user"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
      .mount(&mock_server)
      .await;

    let params = UserParams {
      username: "Ghost-User".to_string(),
    };
    let response = serde_json::to_value(check_user_exists(&client, params).await)?;

    assert_eq!(
      response,
      json!({ "status": "ok", "data": { "username": "ghost-user", "exists": false } })
    );

    Ok(())
  }
}
