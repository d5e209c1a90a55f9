//! MCP server implementation with all tool handlers.
//!
//! The tool registry (name → typed handler and parameter schema) is built once
//! in [`RefkitMcpServer::new`].

use std::sync::Arc;

use refkit_gh::GitHubClient;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use crate::tools::branches::{BranchParams, CreateBranchFromRefParams, CreateBranchParams, UpdateBranchParams};
use crate::tools::commits::ListCommitsParams;
use crate::tools::users::UserParams;
use crate::tools::{branches, commits, users};

#[derive(Clone)]
pub struct RefkitMcpServer {
  client: Arc<GitHubClient>,
  tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RefkitMcpServer {
  pub fn new(client: GitHubClient) -> Self {
    Self {
      client: Arc::new(client),
      tool_router: Self::tool_router(),
    }
  }

  // =========================================================================
  // Branch tools
  // =========================================================================

  #[tool(description = "Create a branch at a commit. `options.ref` is the branch name, `options.sha` the commit hash.")]
  async fn create_branch(&self, params: Parameters<CreateBranchParams>) -> Result<CallToolResult, McpError> {
    Ok(branches::create_branch(&self.client, params.0).await.to_call_tool_result())
  }

  #[tool(
    description = "Get the commit hash a branch currently points at",
    annotations(read_only_hint = true, idempotent_hint = true)
  )]
  async fn get_branch_sha(&self, params: Parameters<BranchParams>) -> Result<CallToolResult, McpError> {
    Ok(branches::get_branch_sha(&self.client, params.0).await.to_call_tool_result())
  }

  #[tool(
    description = "Create a branch from a source branch. Without `from_branch`, uses `main`, falling back to `master`."
  )]
  async fn create_branch_from_ref(
    &self,
    params: Parameters<CreateBranchFromRefParams>,
  ) -> Result<CallToolResult, McpError> {
    Ok(
      branches::create_branch_from_ref(&self.client, params.0)
        .await
        .to_call_tool_result(),
    )
  }

  #[tool(
    description = "Force-move a branch to a commit. Commits reachable only from the old tip may be lost.",
    annotations(destructive_hint = true, idempotent_hint = true)
  )]
  async fn update_branch(&self, params: Parameters<UpdateBranchParams>) -> Result<CallToolResult, McpError> {
    Ok(branches::update_branch(&self.client, params.0).await.to_call_tool_result())
  }

  #[tool(
    description = "Check whether a branch exists in a repository",
    annotations(read_only_hint = true, idempotent_hint = true)
  )]
  async fn check_branch_exists(&self, params: Parameters<BranchParams>) -> Result<CallToolResult, McpError> {
    Ok(
      branches::check_branch_exists(&self.client, params.0)
        .await
        .to_call_tool_result(),
    )
  }

  // =========================================================================
  // Commit and user tools
  // =========================================================================

  #[tool(
    description = "List commits for a repository, optionally starting from a branch or commit",
    annotations(read_only_hint = true, idempotent_hint = true)
  )]
  async fn list_commits(&self, params: Parameters<ListCommitsParams>) -> Result<CallToolResult, McpError> {
    Ok(commits::list_commits(&self.client, params.0).await.to_call_tool_result())
  }

  #[tool(
    description = "Check whether a GitHub user exists",
    annotations(read_only_hint = true, idempotent_hint = true)
  )]
  async fn check_user_exists(&self, params: Parameters<UserParams>) -> Result<CallToolResult, McpError> {
    Ok(users::check_user_exists(&self.client, params.0).await.to_call_tool_result())
  }
}

#[tool_handler]
impl ServerHandler for RefkitMcpServer {
  fn get_info(&self) -> ServerInfo {
    ServerInfo {
      instructions: Some(
        "refkit MCP server. Creates, resolves, and force-updates GitHub branches and lists commits. \
         Failures carry a `code` naming the error kind."
          .into(),
      ),
      capabilities: ServerCapabilities::builder().enable_tools().build(),
      ..Default::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use refkit_gh::GitHubConfig;
  use serde_json::Value;

  use super::*;

  fn test_server() -> RefkitMcpServer {
    let client = GitHubClient::new(GitHubConfig::default()).expect("client");
    RefkitMcpServer::new(client)
  }

  #[test]
  fn test_registry_lists_every_tool() {
    let server = test_server();
    let mut names: Vec<String> = server
      .tool_router
      .list_all()
      .into_iter()
      .map(|tool| tool.name.to_string())
      .collect();
    names.sort();

    assert_eq!(
      names,
      vec![
        "check_branch_exists",
        "check_user_exists",
        "create_branch",
        "create_branch_from_ref",
        "get_branch_sha",
        "list_commits",
        "update_branch",
      ]
    );
  }

  #[test]
  fn test_create_branch_from_ref_schema_marks_source_optional() {
    let tool = RefkitMcpServer::tool_router()
      .list_all()
      .into_iter()
      .find(|tool| tool.name == "create_branch_from_ref")
      .expect("tool registered");

    let required: Vec<&str> = tool
      .input_schema
      .get("required")
      .and_then(Value::as_array)
      .map(|values| values.iter().filter_map(Value::as_str).collect())
      .unwrap_or_default();

    for field in ["owner", "repo", "new_branch"] {
      assert!(required.contains(&field), "{field} should be required");
    }
    assert!(!required.contains(&"from_branch"));
  }

  #[test]
  fn test_server_info_enables_tools() {
    let info = test_server().get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.is_some());
  }
}
