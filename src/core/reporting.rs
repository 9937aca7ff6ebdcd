//! Out-of-band error reporting.
//!
//! When `ERROR_REPORT_URL` is configured, upstream and internal tool failures
//! are POSTed to that webhook as JSON. Delivery runs on a detached task and
//! never affects the response returned to the caller.

use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::config::Config;
use crate::domains::tools::ToolError;

const REPORT_TIMEOUT: Duration = Duration::from_secs(5);

/// Payload sent to the error webhook.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub level: &'static str,
    pub message: String,
    pub environment: String,
    pub tool: String,
    pub code: i32,
    pub timestamp: String,
}

/// Sends error reports to an optional webhook.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    http: reqwest::Client,
    endpoint: Option<Url>,
    environment: String,
}

impl ErrorReporter {
    /// Create a reporter. A `None` endpoint disables reporting.
    pub fn new(endpoint: Option<Url>, environment: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REPORT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint,
            environment: environment.into(),
        }
    }

    /// Create a reporter from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.reporting.error_report_url.clone(),
            config.logging.environment.clone(),
        )
    }

    /// Whether a webhook is configured.
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Whether this error kind is worth reporting.
    pub fn should_report(err: &ToolError) -> bool {
        matches!(err, ToolError::Upstream { .. } | ToolError::Internal(_))
    }

    /// Build the payload for a failed tool call.
    pub fn build_report(&self, tool: &str, err: &ToolError) -> ErrorReport {
        ErrorReport {
            level: "error",
            message: err.to_string(),
            environment: self.environment.clone(),
            tool: tool.to_string(),
            code: err.code(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Report a failed tool call in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn report(&self, tool: &str, err: &ToolError) {
        if !self.is_enabled() || !Self::should_report(err) {
            return;
        }

        let reporter = self.clone();
        let report = self.build_report(tool, err);
        tokio::spawn(async move {
            if let Err(e) = reporter.deliver(&report).await {
                warn!("Failed to deliver error report: {}", e);
            }
        });
    }

    /// Deliver one report and wait for the webhook's answer.
    pub async fn deliver(&self, report: &ErrorReport) -> Result<(), reqwest::Error> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(());
        };

        self.http
            .post(endpoint.clone())
            .json(report)
            .send()
            .await?
            .error_for_status()?;

        debug!("Error report delivered for {}", report.tool);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_only_upstream_and_internal_are_reported() {
        assert!(ErrorReporter::should_report(&ToolError::internal("boom")));
        assert!(ErrorReporter::should_report(&ToolError::upstream_status(
            500, "oops"
        )));
        assert!(!ErrorReporter::should_report(&ToolError::not_found("X")));
        assert!(!ErrorReporter::should_report(&ToolError::invalid_field(
            "limit", "bad"
        )));
        assert!(!ErrorReporter::should_report(&ToolError::authentication(
            "missing"
        )));
    }

    #[test]
    fn test_build_report() {
        let reporter = ErrorReporter::new(None, "staging");
        let report =
            reporter.build_report("VERCEL_GET_USER", &ToolError::upstream_status(502, "bad"));
        assert_eq!(report.level, "error");
        assert_eq!(report.environment, "staging");
        assert_eq!(report.tool, "VERCEL_GET_USER");
        assert_eq!(report.code, -32002);
        assert!(report.message.contains("502"));
    }

    #[tokio::test]
    async fn test_deliver_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/errors"))
            .and(body_partial_json(serde_json::json!({
                "level": "error",
                "tool": "VERCEL_LIST_TEAMS",
                "environment": "production"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/errors", server.uri())).unwrap();
        let reporter = ErrorReporter::new(Some(url), "production");
        let report = reporter.build_report("VERCEL_LIST_TEAMS", &ToolError::internal("boom"));
        reporter.deliver(&report).await.unwrap();
    }

    #[tokio::test]
    async fn test_disabled_reporter_is_noop() {
        let reporter = ErrorReporter::new(None, "development");
        assert!(!reporter.is_enabled());
        let report = reporter.build_report("X", &ToolError::internal("boom"));
        reporter.deliver(&report).await.unwrap();
        reporter.report("X", &ToolError::internal("boom"));
    }
}
