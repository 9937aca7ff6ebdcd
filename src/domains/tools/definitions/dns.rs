//! DNS record tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::TeamScope;
use crate::domains::tools::{
    ToolError, VercelTool, timestamp::opt_epoch_millis, upstream::UpstreamRequest,
};

/// DNS record types that can be created with a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DnsRecordType {
    A,
    AAAA,
    ALIAS,
    CAA,
    CNAME,
}

// ============================================================================
// VERCEL_CREATE_DNS_RECORD
// ============================================================================

/// Parameters for creating a DNS record.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordParams {
    #[schemars(description = "The domain used to create the DNS record")]
    pub domain: String,

    #[serde(rename = "type")]
    #[schemars(description = "The type of record")]
    pub record_type: DnsRecordType,

    #[schemars(description = "The name of the DNS record")]
    pub name: String,

    #[schemars(description = "The value of the DNS record")]
    pub value: String,

    #[schemars(range(min = 60, max = 2147483647), description = "The Time to live (TTL) value")]
    pub ttl: Option<u32>,

    #[schemars(length(max = 500), description = "A comment to add context")]
    pub comment: Option<String>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

/// Wire body for record creation. Absent optionals are omitted.
#[derive(Debug, Serialize)]
struct CreateDnsRecordBody<'a> {
    domain: &'a str,
    #[serde(rename = "type")]
    record_type: DnsRecordType,
    name: &'a str,
    value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

pub struct CreateDnsRecordTool;

impl VercelTool for CreateDnsRecordTool {
    type Params = CreateDnsRecordParams;

    const NAME: &'static str = "VERCEL_CREATE_DNS_RECORD";
    const DESCRIPTION: &'static str = "Creates a DNS record for a domain";
    const LABEL: &'static str = "DNS record created";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let body = CreateDnsRecordBody {
            domain: &params.domain,
            record_type: params.record_type,
            name: &params.name,
            value: &params.value,
            ttl: params.ttl,
            comment: params.comment.as_deref(),
        };

        let request = UpstreamRequest::post(["v2", "domains", params.domain.as_str(), "records"])
            .json(&body)?;
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_LIST_DNS_RECORDS
// ============================================================================

/// Parameters for listing the DNS records of a domain.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDnsRecordsParams {
    #[schemars(description = "The domain name")]
    pub domain: String,

    #[schemars(description = "Maximum number of records to list")]
    pub limit: Option<String>,

    #[schemars(
        description = "Get records created after this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub since: Option<String>,

    #[schemars(
        description = "Get records created before this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub until: Option<String>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct ListDnsRecordsTool;

impl VercelTool for ListDnsRecordsTool {
    type Params = ListDnsRecordsParams;

    const NAME: &'static str = "VERCEL_LIST_DNS_RECORDS";
    const DESCRIPTION: &'static str = "Retrieves a list of DNS records created for a domain name";
    const LABEL: &'static str = "DNS records";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let since = opt_epoch_millis("since", params.since.as_deref())?;
        let until = opt_epoch_millis("until", params.until.as_deref())?;

        let request = UpstreamRequest::get(["v4", "domains", params.domain.as_str(), "records"])
            .query("limit", params.limit)
            .query("since", since)
            .query("until", until);
        Ok(params.scope.apply(request))
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::testing::{build, failed_fields};
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_create_record_body_has_only_supplied_fields() {
        let request = build::<CreateDnsRecordTool>(json!({
            "domain": "example.com",
            "type": "A",
            "name": "www",
            "value": "1.2.3.4"
        }))
        .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.segments, vec!["v2", "domains", "example.com", "records"]);
        assert!(request.query.is_empty());
        assert_eq!(
            request.body,
            Some(json!({
                "domain": "example.com",
                "type": "A",
                "name": "www",
                "value": "1.2.3.4"
            }))
        );
    }

    #[test]
    fn test_create_record_with_ttl_and_comment() {
        let request = build::<CreateDnsRecordTool>(json!({
            "domain": "example.com",
            "type": "CNAME",
            "name": "docs",
            "value": "cname.vercel-dns.com",
            "ttl": 3600,
            "comment": "docs site",
            "teamId": "team_1"
        }))
        .unwrap();

        let body = request.body.clone().unwrap();
        assert_eq!(body["ttl"], 3600);
        assert_eq!(body["comment"], "docs site");
        assert!(body.get("teamId").is_none());
        assert_eq!(request.query_value("teamId"), Some("team_1"));
    }

    #[test]
    fn test_create_record_ttl_bounds() {
        let err = build::<CreateDnsRecordTool>(json!({
            "domain": "example.com",
            "type": "A",
            "name": "www",
            "value": "1.2.3.4",
            "ttl": 59
        }))
        .unwrap_err();
        assert_eq!(failed_fields(err), vec!["ttl"]);
    }

    #[test]
    fn test_create_record_rejects_unknown_type() {
        let err = build::<CreateDnsRecordTool>(json!({
            "domain": "example.com",
            "type": "MX",
            "name": "@",
            "value": "mail.example.com"
        }))
        .unwrap_err();
        assert_eq!(failed_fields(err), vec!["type"]);
    }

    #[test]
    fn test_create_record_missing_value() {
        let err = build::<CreateDnsRecordTool>(json!({
            "domain": "example.com",
            "type": "A",
            "name": "www"
        }))
        .unwrap_err();
        assert_eq!(failed_fields(err), vec!["value"]);
    }

    #[test]
    fn test_list_records_since_is_epoch_millis() {
        let request = build::<ListDnsRecordsTool>(json!({
            "domain": "example.com",
            "since": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(request.segments, vec!["v4", "domains", "example.com", "records"]);
        assert_eq!(request.query, vec![("since", "1735689600000".to_string())]);
    }

    #[test]
    fn test_list_records_limit_is_passed_as_given() {
        let request = build::<ListDnsRecordsTool>(json!({
            "domain": "example.com",
            "limit": "20"
        }))
        .unwrap();
        assert_eq!(request.query, vec![("limit", "20".to_string())]);
    }
}
