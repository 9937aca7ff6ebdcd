//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup from environment variables (after
//! loading an optional `.env` file) and is immutable afterwards.

use std::time::Duration;

use reqwest::Url;
use tracing::{info, warn};

use super::error::{Error, Result};
use super::transport::TransportConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream Vercel API settings.
    pub upstream: UpstreamConfig,

    /// Credentials used when no per-request token is available.
    pub credentials: CredentialsConfig,

    /// Optional error reporting.
    pub reporting: ReportingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Deployment environment name (`production`, `staging`, ...).
    pub environment: String,

    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Upstream API configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL every tool path is resolved against.
    pub base_url: Url,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Credentials for transports without request headers.
#[derive(Clone, Default)]
pub struct CredentialsConfig {
    /// Token used by the STDIO transport.
    pub default_access_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "default_access_token",
                &self.default_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Error reporting configuration.
#[derive(Debug, Clone, Default)]
pub struct ReportingConfig {
    /// Webhook receiving error reports. Reporting is off when unset.
    pub error_report_url: Option<Url>,
}

/// Default upstream timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default server name reported to clients.
pub const DEFAULT_SERVER_NAME: &str = "vercel-tools";

/// Map a deployment environment to its default log level.
pub fn level_for_environment(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        "staging" => "debug",
        _ => "trace",
    }
}

impl Config {
    /// Build a configuration with defaults around the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            server: ServerConfig {
                name: DEFAULT_SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                environment: "development".to_string(),
                level: level_for_environment("development").to_string(),
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig {
                base_url,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            credentials: CredentialsConfig::default(),
            reporting: ReportingConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Fails when `BASE_URL` is absent or not a valid URL.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config("BASE_URL is required"))?;
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| Error::config(format!("BASE_URL is not a valid URL: {e}")))?;

        let mut config = Self::new(base_url);

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(environment) = lookup("APP_ENV") {
            config.logging.level = level_for_environment(&environment).to_string();
            config.logging.environment = environment;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_lookup(&lookup);

        if let Some(secs) = lookup("VERCEL_API_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.upstream.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring invalid VERCEL_API_TIMEOUT_SECS={secs}, using {DEFAULT_TIMEOUT_SECS}s"
                ),
            }
        }

        config.credentials.default_access_token =
            lookup("DEFAULT_ACCESS_TOKEN").filter(|t| !t.trim().is_empty());

        if let Some(url) = lookup("ERROR_REPORT_URL").filter(|v| !v.trim().is_empty()) {
            let url = Url::parse(url.trim())
                .map_err(|e| Error::config(format!("ERROR_REPORT_URL is not a valid URL: {e}")))?;
            info!("Error reporting enabled");
            config.reporting.error_report_url = Some(url);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_base_url_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("BASE_URL"));

        assert!(load(&[("BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("BASE_URL", "https://api.vercel.com")]).unwrap();
        assert_eq!(config.upstream.base_url.as_str(), "https://api.vercel.com/");
        assert_eq!(config.upstream.timeout, Duration::from_secs(30));
        assert_eq!(config.server.name, "vercel-tools");
        assert_eq!(config.logging.level, "trace");
        assert!(config.credentials.default_access_token.is_none());
        assert!(config.reporting.error_report_url.is_none());
    }

    #[test]
    fn test_log_level_follows_environment() {
        let config = load(&[("BASE_URL", "https://x.test"), ("APP_ENV", "production")]).unwrap();
        assert_eq!(config.logging.level, "info");

        let config = load(&[("BASE_URL", "https://x.test"), ("APP_ENV", "staging")]).unwrap();
        assert_eq!(config.logging.level, "debug");

        let config = load(&[
            ("BASE_URL", "https://x.test"),
            ("APP_ENV", "production"),
            ("MCP_LOG_LEVEL", "warn"),
        ])
        .unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.environment, "production");
    }

    #[test]
    fn test_timeout_and_reporting() {
        let config = load(&[
            ("BASE_URL", "https://x.test"),
            ("VERCEL_API_TIMEOUT_SECS", "5"),
            ("ERROR_REPORT_URL", "https://hooks.test/errors"),
        ])
        .unwrap();
        assert_eq!(config.upstream.timeout, Duration::from_secs(5));
        assert_eq!(
            config.reporting.error_report_url.unwrap().as_str(),
            "https://hooks.test/errors"
        );

        let config = load(&[("BASE_URL", "https://x.test"), ("VERCEL_API_TIMEOUT_SECS", "0")])
            .unwrap();
        assert_eq!(config.upstream.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("BASE_URL", "https://env.test");
            std::env::set_var("DEFAULT_ACCESS_TOKEN", "tok_env");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.upstream.base_url.host_str(), Some("env.test"));
        assert_eq!(
            config.credentials.default_access_token.as_deref(),
            Some("tok_env")
        );
        unsafe {
            std::env::remove_var("BASE_URL");
            std::env::remove_var("DEFAULT_ACCESS_TOKEN");
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            default_access_token: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
