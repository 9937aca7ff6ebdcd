//! Per-request authentication context.
//!
//! The bearer token used for upstream calls is resolved from each inbound
//! request's headers and passed explicitly to every tool invocation made on
//! behalf of that request. Nothing here is cached between requests.

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Header carrying a raw Vercel token.
pub const VERCEL_TOKEN_HEADER: &str = "x-vercel-token";

/// Alternate spelling of [`VERCEL_TOKEN_HEADER`].
pub const VERCEL_TOKEN_HEADER_ALT: &str = "vercel-token";

/// Credentials for one inbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl AuthContext {
    /// Wrap an already-resolved bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Build a context from an optional token, ignoring blank values.
    pub fn from_token(token: Option<&str>) -> Option<Self> {
        token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Resolve the token from request headers.
    ///
    /// Precedence: `Authorization: Bearer <token>`, then `x-vercel-token`,
    /// then `vercel-token`.
    #[cfg(feature = "http")]
    pub fn from_headers(headers: &http::HeaderMap) -> Result<Self, ToolError> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let bearer = header(http::header::AUTHORIZATION.as_str()).and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then_some(token)
        });

        Self::from_token(bearer)
            .or_else(|| Self::from_token(header(VERCEL_TOKEN_HEADER)))
            .or_else(|| Self::from_token(header(VERCEL_TOKEN_HEADER_ALT)))
            .ok_or_else(|| {
                ToolError::authentication(
                    "Access token required. Provide it via the Authorization header \
                     (Bearer <token>) or the x-vercel-token header.",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let auth = AuthContext::new("super_secret_token");
        let debug_str = format!("{:?}", auth);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_from_token_ignores_blank() {
        assert!(AuthContext::from_token(None).is_none());
        assert!(AuthContext::from_token(Some("   ")).is_none());
        assert_eq!(
            AuthContext::from_token(Some(" tok ")).unwrap().token(),
            "tok"
        );
    }

    #[cfg(feature = "http")]
    mod headers {
        use super::super::*;
        use http::{HeaderMap, HeaderValue};

        fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
            let mut map = HeaderMap::new();
            for (name, value) in pairs {
                map.insert(*name, HeaderValue::from_static(value));
            }
            map
        }

        #[test]
        fn test_bearer_header() {
            let auth = AuthContext::from_headers(&headers(&[("authorization", "Bearer tok_1")]))
                .unwrap();
            assert_eq!(auth.token(), "tok_1");
        }

        #[test]
        fn test_bearer_takes_precedence() {
            let auth = AuthContext::from_headers(&headers(&[
                ("authorization", "Bearer tok_1"),
                ("x-vercel-token", "tok_2"),
                ("vercel-token", "tok_3"),
            ]))
            .unwrap();
            assert_eq!(auth.token(), "tok_1");
        }

        #[test]
        fn test_vendor_headers() {
            let auth =
                AuthContext::from_headers(&headers(&[("x-vercel-token", "tok_2")])).unwrap();
            assert_eq!(auth.token(), "tok_2");

            let auth = AuthContext::from_headers(&headers(&[("vercel-token", "tok_3")])).unwrap();
            assert_eq!(auth.token(), "tok_3");
        }

        #[test]
        fn test_non_bearer_authorization_falls_through() {
            let auth = AuthContext::from_headers(&headers(&[
                ("authorization", "Basic dXNlcjpwYXNz"),
                ("x-vercel-token", "tok_2"),
            ]))
            .unwrap();
            assert_eq!(auth.token(), "tok_2");
        }

        #[test]
        fn test_missing_token() {
            let err = AuthContext::from_headers(&HeaderMap::new()).unwrap_err();
            assert!(matches!(err, ToolError::Authentication(_)));

            let err = AuthContext::from_headers(&headers(&[("authorization", "Bearer ")]))
                .unwrap_err();
            assert!(matches!(err, ToolError::Authentication(_)));
        }
    }
}
