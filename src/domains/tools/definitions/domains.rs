//! Domain tools: availability, pricing, and the account's domain list.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::TeamScope;
use crate::domains::tools::{
    ToolError, VercelTool, timestamp::opt_epoch_millis, upstream::UpstreamRequest,
};

/// Kind of purchase a price quote is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DomainPriceType {
    New,
    Renewal,
    Transfer,
    Redemption,
}

impl DomainPriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Renewal => "renewal",
            Self::Transfer => "transfer",
            Self::Redemption => "redemption",
        }
    }
}

// ============================================================================
// VERCEL_CHECK_DOMAIN_AVAILABILITY
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckDomainAvailabilityParams {
    #[schemars(description = "The name of the domain to check")]
    pub name: String,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct CheckDomainAvailabilityTool;

impl VercelTool for CheckDomainAvailabilityTool {
    type Params = CheckDomainAvailabilityParams;

    const NAME: &'static str = "VERCEL_CHECK_DOMAIN_AVAILABILITY";
    const DESCRIPTION: &'static str = "Check if a domain name is available for purchase";
    const LABEL: &'static str = "Domain availability";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let request =
            UpstreamRequest::get(["v4", "domains", "status"]).query("name", Some(params.name));
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_GET_DOMAIN_PRICE
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDomainPriceParams {
    #[schemars(description = "The name of the domain to check price for")]
    pub name: String,

    #[serde(rename = "type")]
    #[schemars(description = "Domain status type to check price for")]
    pub price_type: Option<DomainPriceType>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct GetDomainPriceTool;

impl VercelTool for GetDomainPriceTool {
    type Params = GetDomainPriceParams;

    const NAME: &'static str = "VERCEL_GET_DOMAIN_PRICE";
    const DESCRIPTION: &'static str = "Check the price to purchase a domain";
    const LABEL: &'static str = "Domain price";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let request = UpstreamRequest::get(["v4", "domains", "price"])
            .query("name", Some(params.name))
            .query("type", params.price_type.map(|t| t.as_str()));
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_LIST_DOMAINS
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDomainsParams {
    #[schemars(description = "Maximum number of domains to list")]
    pub limit: Option<u32>,

    #[schemars(
        description = "Get domains created after this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub since: Option<String>,

    #[schemars(
        description = "Get domains created before this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub until: Option<String>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct ListDomainsTool;

impl VercelTool for ListDomainsTool {
    type Params = ListDomainsParams;

    const NAME: &'static str = "VERCEL_LIST_DOMAINS";
    const DESCRIPTION: &'static str = "List all domains";
    const LABEL: &'static str = "Domains";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let since = opt_epoch_millis("since", params.since.as_deref())?;
        let until = opt_epoch_millis("until", params.until.as_deref())?;

        let request = UpstreamRequest::get(["v5", "domains"])
            .query("limit", params.limit)
            .query("since", since)
            .query("until", until);
        Ok(params.scope.apply(request))
    }
}
