//! Parameter pieces shared across Vercel tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::upstream::UpstreamRequest;

/// Team scope accepted by most endpoints.
///
/// Either field selects the team the request is performed on behalf of;
/// both are forwarded as query parameters when present.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamScope {
    /// The Team identifier to perform the request on behalf of.
    #[schemars(description = "The Team identifier to perform the request on behalf of")]
    pub team_id: Option<String>,

    /// The Team slug to perform the request on behalf of.
    #[schemars(description = "The Team slug to perform the request on behalf of")]
    pub slug: Option<String>,
}

impl TeamScope {
    /// Append `teamId` / `slug` to a request.
    pub fn apply(self, request: UpstreamRequest) -> UpstreamRequest {
        request
            .query("teamId", self.team_id)
            .query("slug", self.slug)
    }
}
