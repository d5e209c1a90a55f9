//! # GitHub HTTP Client
//!
//! The single network boundary for GitHub API interactions: builds headers,
//! attaches the bearer credential, decodes response bodies, and routes every
//! non-success status through [`ApiError::classify`]. No retries are performed.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};
use url::form_urlencoded;

use crate::config::GitHubConfig;
use crate::consts::{ACCEPT, CONTENT_TYPE_JSON, USER_AGENT};
use crate::error::{ApiError, GitHubError};

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  token: Option<String>,
}

/// Decoded response body: JSON when the server says so, raw text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
  Json(Value),
  Text(String),
}

impl ResponseBody {
  /// Collapse into a JSON value; empty text becomes `null`
  pub fn into_value(self) -> Value {
    match self {
      Self::Json(value) => value,
      Self::Text(text) if text.is_empty() => Value::Null,
      Self::Text(text) => Value::String(text),
    }
  }

  /// Deserialize the body into a typed model
  pub fn decode<T: DeserializeOwned>(self) -> Result<T, GitHubError> {
    Ok(serde_json::from_value(self.into_value())?)
  }
}

impl GitHubClient {
  /// Create a new GitHub client
  pub fn new(config: GitHubConfig) -> Result<Self, GitHubError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self {
      client,
      base_url: config.base_url,
      token: config.token,
    })
  }

  /// Create a client configured from the process environment
  pub fn from_env() -> Result<Self, GitHubError> {
    Self::new(GitHubConfig::from_env())
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub(crate) fn api_url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }

  /// Issue one HTTP request.
  ///
  /// Caller-supplied headers override the defaults. On a non-success status
  /// the body is classified and returned as [`GitHubError::Api`]; the body is
  /// never handed back to the caller on failure.
  #[instrument(skip(self, body, extra_headers), level = "debug")]
  pub async fn request(
    &self,
    method: Method,
    url: &str,
    body: Option<&Value>,
    extra_headers: Option<HeaderMap>,
  ) -> Result<ResponseBody, GitHubError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    if let Some(extra) = extra_headers {
      headers.extend(extra);
    }

    trace!("GitHub API URL: {}", url);

    let mut builder = self.client.request(method, url).headers(headers);
    if let Some(token) = &self.token {
      builder = builder.bearer_auth(token);
    }
    if let Some(body) = body {
      builder = builder.body(serde_json::to_vec(body)?);
    }

    let response = builder.send().await?;
    let status = response.status();
    debug!("GitHub API response status: {}", status);

    let parsed = parse_response_body(response).await?;

    if !status.is_success() {
      let error = ApiError::classify(status.as_u16(), &parsed.into_value());
      warn!("GitHub API error: HTTP {} ({}) - {}", status, error.kind, error.message);
      return Err(error.into());
    }

    trace!("GitHub API response body: {:?}", parsed);
    Ok(parsed)
  }

  /// GET a resource and decode it
  pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
    self.request(Method::GET, url, None, None).await?.decode()
  }

  /// Send a JSON body and decode the response
  pub(crate) async fn send_json<T: DeserializeOwned>(
    &self,
    method: Method,
    url: &str,
    body: &Value,
  ) -> Result<T, GitHubError> {
    self.request(method, url, Some(body), None).await?.decode()
  }
}

/// Read the body as JSON when the content type says so, else as text.
async fn parse_response_body(response: Response) -> Result<ResponseBody, GitHubError> {
  let is_json = response
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| ct.contains("application/json"));

  let text = response.text().await?;
  if !is_json {
    return Ok(ResponseBody::Text(text));
  }
  if text.trim().is_empty() {
    return Ok(ResponseBody::Json(Value::Null));
  }

  match serde_json::from_str::<Value>(&text) {
    Ok(value) => Ok(ResponseBody::Json(value)),
    Err(e) => {
      debug!("Response declared JSON but failed to parse: {}", e);
      Ok(ResponseBody::Text(text))
    }
  }
}

/// Append the non-null parameters to `base_url` as a URL-encoded query string.
///
/// Returns `base_url` untouched when every parameter is `None`.
pub fn build_url(base_url: &str, params: &[(&str, Option<String>)]) -> String {
  let mut serializer = form_urlencoded::Serializer::new(String::new());
  for (key, value) in params {
    if let Some(value) = value {
      serializer.append_pair(key, value);
    }
  }

  let query = serializer.finish();
  if query.is_empty() {
    base_url.to_string()
  } else {
    format!("{base_url}?{query}")
  }
}

#[cfg(test)]
pub(crate) fn test_client(base_url: &str, token: Option<&str>) -> GitHubClient {
  let config = GitHubConfig::default()
    .with_base_url(base_url)
    .with_token(token.map(str::to_string));
  GitHubClient::new(config).expect("Failed to build test client")
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{body_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::error::ErrorKind;

  #[test]
  fn test_build_url_skips_none_params() {
    let url = build_url(
      "https://x/y",
      &[("page", Some("2".to_string())), ("per_page", None), ("sha", None)],
    );
    assert_eq!(url, "https://x/y?page=2");
  }

  #[test]
  fn test_build_url_without_params_has_no_question_mark() {
    assert_eq!(build_url("https://x/y", &[("page", None)]), "https://x/y");
    assert_eq!(build_url("https://x/y", &[]), "https://x/y");
  }

  #[test]
  fn test_build_url_encodes_values_in_order() {
    let url = build_url(
      "https://x/y",
      &[("sha", Some("feature/a b".to_string())), ("per_page", Some("10".to_string()))],
    );
    assert_eq!(url, "https://x/y?sha=feature%2Fa+b&per_page=10");
  }

  #[test]
  fn test_github_client_creation() {
    let client = test_client("https://api.github.com/", Some("test_token"));
    assert_eq!(client.base_url(), "https://api.github.com");
    assert_eq!(client.api_url("/repos/o/r"), "https://api.github.com/repos/o/r");
  }

  #[tokio::test]
  async fn test_request_sends_default_headers_and_bearer_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), Some("test_token"));

    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("accept", ACCEPT))
      .and(header("content-type", CONTENT_TYPE_JSON))
      .and(header("user-agent", USER_AGENT))
      .and(header("authorization", "Bearer test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let body = client
      .request(Method::GET, &client.api_url("/user"), None, None)
      .await?;
    assert_eq!(body, ResponseBody::Json(json!({ "login": "octocat" })));

    Ok(())
  }

  #[tokio::test]
  async fn test_request_without_token_is_anonymous() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), None);

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
      .mount(&mock_server)
      .await;

    client.request(Method::GET, &client.api_url("/user"), None, None).await?;

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());

    Ok(())
  }

  #[tokio::test]
  async fn test_request_extra_headers_override_defaults() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), None);

    Mock::given(method("GET"))
      .and(path("/raw"))
      .and(header("accept", "application/vnd.github.raw"))
      .respond_with(ResponseTemplate::new(200).set_body_string("plain contents"))
      .expect(1)
      .mount(&mock_server)
      .await;

    let mut extra = HeaderMap::new();
    extra.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.raw"));

    let body = client
      .request(Method::GET, &client.api_url("/raw"), None, Some(extra))
      .await?;
    assert_eq!(body, ResponseBody::Text("plain contents".to_string()));

    Ok(())
  }

  #[tokio::test]
  async fn test_request_posts_json_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), None);

    Mock::given(method("POST"))
      .and(path("/echo"))
      .and(body_json(json!({ "ref": "refs/heads/x", "sha": "abc" })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let response: Value = client
      .send_json(
        Method::POST,
        &client.api_url("/echo"),
        &json!({ "ref": "refs/heads/x", "sha": "abc" }),
      )
      .await?;
    assert_eq!(response, json!({ "ok": true }));

    Ok(())
  }

  #[tokio::test]
  async fn test_request_classifies_error_status() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), Some("test_token"));

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(401).set_body_json(json!({
        "message": "Bad credentials",
        "documentation_url": "https://docs.github.com/rest"
      })))
      .mount(&mock_server)
      .await;

    let error = client
      .request(Method::GET, &client.api_url("/user"), None, None)
      .await
      .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Authentication);
    assert_eq!(error.status(), Some(401));
    assert_eq!(error.to_string(), "Bad credentials");
    assert!(!format!("{error:?}").contains("test_token"));

    Ok(())
  }

  #[tokio::test]
  async fn test_request_classifies_text_error_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri(), None);

    Mock::given(method("GET"))
      .and(path("/flaky"))
      .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
      .mount(&mock_server)
      .await;

    let error = client
      .request(Method::GET, &client.api_url("/flaky"), None, None)
      .await
      .unwrap_err();

    let api = error.as_api().expect("expected an API error");
    assert_eq!(api.kind, ErrorKind::Generic);
    assert_eq!(api.status, 503);
    assert_eq!(api.message, "Remote API error");
    assert_eq!(api.detail, json!("upstream unavailable"));

    Ok(())
  }
}
