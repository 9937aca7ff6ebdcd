//! Upstream Vercel API access.
//!
//! Tool handlers describe the single call they need as an [`UpstreamRequest`];
//! an [`Upstream`] implementation performs it. [`VercelClient`] is the real
//! implementation, built on an async `reqwest::Client`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::ToolError;
use crate::core::auth::AuthContext;

// ============================================================================
// Request description
// ============================================================================

/// One outbound call to the upstream API.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    /// HTTP method.
    pub method: Method,

    /// Path segments, unencoded (`["v2", "teams", "team_123"]`).
    pub segments: Vec<String>,

    /// Query pairs in insertion order. Only present parameters are recorded.
    pub query: Vec<(&'static str, String)>,

    /// JSON body for mutating calls.
    pub body: Option<Value>,
}

impl UpstreamRequest {
    fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    /// Append a query parameter if it is present. `None` leaves no trace.
    pub fn query<T: ToString>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_string()));
        }
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ToolError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ToolError::internal(format!("failed to encode request body: {}", e)))?;
        self.body = Some(body);
        Ok(self)
    }

    #[cfg(test)]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolve this request against a base URL.
    pub fn url(&self, base: &Url) -> Result<Url, ToolError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ToolError::internal(format!("base URL cannot carry a path: {}", base))
            })?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
        }

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}

// ============================================================================
// Upstream trait
// ============================================================================

/// Something that can execute an [`UpstreamRequest`] on behalf of a caller.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Perform the request with the caller's credentials and decode the body.
    async fn send(&self, auth: &AuthContext, request: UpstreamRequest) -> Result<Value, ToolError>;
}

// ============================================================================
// reqwest implementation
// ============================================================================

/// HTTP client for the Vercel REST API.
#[derive(Debug, Clone)]
pub struct VercelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl VercelClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ToolError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("vercel-mcp-server/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ToolError::internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl Upstream for VercelClient {
    #[instrument(skip_all, fields(method = %request.method, path = %request.segments.join("/")))]
    async fn send(&self, auth: &AuthContext, request: UpstreamRequest) -> Result<Value, ToolError> {
        let url = request.url(&self.base_url)?;
        debug!("Sending upstream request to {}", url);

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .bearer_auth(auth.token());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            ToolError::upstream_transport(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read upstream response body: {}", e);
            ToolError::upstream_transport(e)
        })?;

        if !status.is_success() {
            warn!("Upstream responded with {}", status);
            return Err(ToolError::upstream_status(status.as_u16(), text));
        }

        Ok(decode_body(&text))
    }
}

/// Decode a response body: JSON when possible, raw text otherwise.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth() -> AuthContext {
        AuthContext::new("tok_test")
    }

    async fn client_for(server: &MockServer) -> VercelClient {
        VercelClient::new(Url::parse(&server.uri()).unwrap(), None).unwrap()
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let base = Url::parse("https://api.vercel.com").unwrap();
        let url = UpstreamRequest::get(["v2", "user"])
            .query::<String>("teamId", None)
            .url(&base)
            .unwrap();
        assert_eq!(url.as_str(), "https://api.vercel.com/v2/user");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_url_encodes_segments_and_query() {
        let base = Url::parse("https://api.vercel.com/").unwrap();
        let url = UpstreamRequest::get(["v9", "projects", "my project/x"])
            .query("search", Some("a&b"))
            .url(&base)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.vercel.com/v9/projects/my%20project%2Fx?search=a%26b"
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let base = Url::parse("https://proxy.example.com/vercel").unwrap();
        let url = UpstreamRequest::get(["v2", "teams"]).url(&base).unwrap();
        assert_eq!(url.as_str(), "https://proxy.example.com/vercel/v2/teams");
    }

    #[tokio::test]
    async fn test_get_sends_bearer_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .and(query_param("limit", "10"))
            .and(header("authorization", "Bearer tok_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "teams": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .send(&auth(), UpstreamRequest::get(["v2", "teams"]).query("limit", Some(10)))
            .await
            .unwrap();
        assert_eq!(value, json!({ "teams": [] }));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/domains/example.com/records"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "name": "www" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uid": "rec_1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = UpstreamRequest::post(["v2", "domains", "example.com", "records"])
            .json(&json!({ "name": "www" }))
            .unwrap();
        let value = client.send(&auth(), request).await.unwrap();
        assert_eq!(value["uid"], "rec_1");
    }

    #[tokio::test]
    async fn test_not_found_becomes_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v9/projects/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(
                    r#"{"error":{"code":"not_found","message":"Project not found"}}"#,
                ),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .send(&auth(), UpstreamRequest::get(["v9", "projects", "missing"]))
            .await
            .unwrap_err();

        match &err {
            ToolError::Upstream { status, body } => {
                assert_eq!(*status, Some(404));
                assert!(body.contains("Project not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Project not found"));
    }

    #[tokio::test]
    async fn test_connection_failure_becomes_upstream_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        drop(listener);

        let client = VercelClient::new(base, Some(Duration::from_secs(2))).unwrap();
        let err = client
            .send(&auth(), UpstreamRequest::get(["v2", "user"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Upstream { status: None, .. }));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body(r#"{"a":1}"#), json!({ "a": 1 }));
        assert_eq!(decode_body("plain text"), json!("plain text"));
    }
}
