//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, built once at startup
//! - Dispatch of a tool call: lookup, validation, upstream request, formatting
//! - Tool metadata for listing

use std::collections::HashMap;

use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::definitions::{
    CheckDomainAvailabilityTool, CreateDnsRecordTool, GetDeploymentEventsTool,
    GetDeploymentFileContentsTool, GetDeploymentTool, GetDomainPriceTool, GetProjectTool,
    GetTeamTool, GetUserTool, InviteTeamMemberTool, ListDeploymentFilesTool, ListDeploymentsTool,
    ListDnsRecordsTool, ListDomainsTool, ListProjectsTool, ListTeamMembersTool, ListTeamsTool,
    RemoveTeamMemberTool,
};
use super::error::ToolError;
use super::handlers::VercelTool;
use super::output::format_result;
use super::upstream::{Upstream, UpstreamRequest};
use super::validation::ParamValidator;
use crate::core::auth::AuthContext;

// ============================================================================
// Tool Definition
// ============================================================================

type PrepareFn = fn(&ParamValidator, Value) -> Result<UpstreamRequest, ToolError>;

/// A registered tool: metadata, compiled schema, and request builder.
pub struct ToolDefinition {
    name: &'static str,
    label: &'static str,
    tool: Tool,
    validator: ParamValidator,
    prepare: PrepareFn,
}

fn prepare<T: VercelTool>(
    validator: &ParamValidator,
    arguments: Value,
) -> Result<UpstreamRequest, ToolError> {
    let params: T::Params = validator.parse(arguments)?;
    T::build_request(params)
}

impl ToolDefinition {
    /// Register a tool type, compiling its parameter schema.
    pub fn of<T: VercelTool>() -> Result<Self, ToolError> {
        let tool = T::to_tool();
        let schema = Value::Object(tool.input_schema.as_ref().clone());
        let validator = ParamValidator::compile(&schema)?;

        Ok(Self {
            name: T::NAME,
            label: T::LABEL,
            tool,
            validator,
            prepare: prepare::<T>,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tool metadata as published in `tools/list`.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Validate arguments and build the upstream request, without sending it.
    pub fn prepare(&self, arguments: Value) -> Result<UpstreamRequest, ToolError> {
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        (self.prepare)(&self.validator, arguments)
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Per-resource tool lists
// ============================================================================

fn deployment_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![
        ToolDefinition::of::<GetDeploymentTool>()?,
        ToolDefinition::of::<GetDeploymentEventsTool>()?,
        ToolDefinition::of::<ListDeploymentFilesTool>()?,
        ToolDefinition::of::<GetDeploymentFileContentsTool>()?,
        ToolDefinition::of::<ListDeploymentsTool>()?,
    ])
}

fn dns_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![
        ToolDefinition::of::<CreateDnsRecordTool>()?,
        ToolDefinition::of::<ListDnsRecordsTool>()?,
    ])
}

fn domain_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![
        ToolDefinition::of::<CheckDomainAvailabilityTool>()?,
        ToolDefinition::of::<GetDomainPriceTool>()?,
        ToolDefinition::of::<ListDomainsTool>()?,
    ])
}

fn project_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![
        ToolDefinition::of::<ListProjectsTool>()?,
        ToolDefinition::of::<GetProjectTool>()?,
    ])
}

fn team_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![
        ToolDefinition::of::<GetTeamTool>()?,
        ToolDefinition::of::<ListTeamsTool>()?,
        ToolDefinition::of::<ListTeamMembersTool>()?,
        ToolDefinition::of::<InviteTeamMemberTool>()?,
        ToolDefinition::of::<RemoveTeamMemberTool>()?,
    ])
}

fn user_tools() -> Result<Vec<ToolDefinition>, ToolError> {
    Ok(vec![ToolDefinition::of::<GetUserTool>()?])
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - immutable catalog of every available tool.
///
/// Built once at startup and shared behind an `Arc`; there is no runtime
/// registration.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolDefinition>,
    order: Vec<&'static str>,
}

impl ToolRegistry {
    /// Build the registry from all per-resource tool lists.
    pub fn new() -> Result<Self, ToolError> {
        let mut definitions = deployment_tools()?;
        definitions.extend(dns_tools()?);
        definitions.extend(domain_tools()?);
        definitions.extend(project_tools()?);
        definitions.extend(team_tools()?);
        definitions.extend(user_tools()?);
        Self::from_definitions(definitions)
    }

    /// Build a registry from explicit definitions, rejecting duplicate names.
    pub fn from_definitions(definitions: Vec<ToolDefinition>) -> Result<Self, ToolError> {
        let mut tools = HashMap::with_capacity(definitions.len());
        let mut order = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let name = definition.name();
            if tools.insert(name, definition).is_some() {
                return Err(ToolError::internal(format!(
                    "tool '{}' registered twice",
                    name
                )));
            }
            order.push(name);
        }

        Ok(Self { tools, order })
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|definition| definition.tool().clone())
            .collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.tools.get(name).ok_or_else(|| ToolError::not_found(name))
    }

    /// Dispatch a tool call.
    ///
    /// Lookup and validation happen before anything is sent; the upstream is
    /// contacted at most once.
    #[instrument(skip(self, arguments, auth, upstream))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
        auth: &AuthContext,
        upstream: &dyn Upstream,
    ) -> Result<CallToolResult, ToolError> {
        let definition = self.get(name).inspect_err(|_| {
            warn!("Unknown tool requested: {}", name);
        })?;

        let request = definition.prepare(arguments).inspect_err(|e| {
            warn!("Rejected arguments for {}: {}", name, e);
        })?;

        info!("Calling tool {}", name);
        let data = upstream.send(auth, request).await?;
        format_result(definition.label, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::upstream::testing::RecordingUpstream;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new().unwrap()
    }

    fn auth() -> AuthContext {
        AuthContext::new("tok_abc")
    }

    #[test]
    fn test_registry_tool_names() {
        let names = registry().tool_names();
        assert_eq!(names.len(), 18);
        for expected in [
            "VERCEL_GET_DEPLOYMENT",
            "VERCEL_GET_DEPLOYMENT_EVENTS",
            "VERCEL_LIST_DEPLOYMENT_FILES",
            "VERCEL_GET_DEPLOYMENT_FILE_CONTENTS",
            "VERCEL_LIST_DEPLOYMENTS",
            "VERCEL_CREATE_DNS_RECORD",
            "VERCEL_LIST_DNS_RECORDS",
            "VERCEL_CHECK_DOMAIN_AVAILABILITY",
            "VERCEL_GET_DOMAIN_PRICE",
            "VERCEL_LIST_DOMAINS",
            "VERCEL_LIST_PROJECTS",
            "VERCEL_GET_PROJECT",
            "VERCEL_GET_TEAM",
            "VERCEL_LIST_TEAMS",
            "VERCEL_LIST_TEAM_MEMBERS",
            "VERCEL_INVITE_TEAM_MEMBER",
            "VERCEL_REMOVE_TEAM_MEMBER",
            "VERCEL_GET_USER",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_list_tools_carry_schema_and_description() {
        for tool in registry().list_tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let result = ToolRegistry::from_definitions(vec![
            ToolDefinition::of::<GetUserTool>().unwrap(),
            ToolDefinition::of::<GetUserTool>().unwrap(),
        ]);
        assert!(matches!(result, Err(ToolError::Internal(_))));
    }

    #[tokio::test]
    async fn test_call_unknown_tool_makes_no_request() {
        let upstream = RecordingUpstream::new(json!({}));
        let err = registry()
            .call_tool("VERCEL_DELETE_EVERYTHING", json!({}), &auth(), &upstream)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == "VERCEL_DELETE_EVERYTHING"));
        assert_eq!(upstream.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_required_parameter_makes_no_request() {
        let registry = registry();
        let upstream = RecordingUpstream::new(json!({}));
        let mut checked = 0;

        for tool in registry.list_tools() {
            let required: Vec<&str> = tool
                .input_schema
                .get("required")
                .and_then(Value::as_array)
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            if required.is_empty() {
                continue;
            }

            let err = registry
                .call_tool(&tool.name, json!({}), &auth(), &upstream)
                .await
                .unwrap_err();
            let violations = match err {
                ToolError::Validation(violations) => violations,
                other => panic!("{}: expected validation error, got {:?}", tool.name, other),
            };
            for field in required {
                assert!(
                    violations.iter().any(|v| v.field == field),
                    "{} did not report {}",
                    tool.name,
                    field
                );
                checked += 1;
            }
        }

        assert!(checked >= 16, "only {} required fields checked", checked);
        assert_eq!(upstream.call_count(), 0);
    }

    #[tokio::test]
    async fn test_null_optionals_are_omitted() {
        let registry = registry();
        let upstream = RecordingUpstream::new(json!({}));

        registry
            .call_tool(
                "VERCEL_LIST_TEAMS",
                json!({ "limit": null, "since": null }),
                &auth(),
                &upstream,
            )
            .await
            .unwrap();
        let (_, request) = upstream.last().unwrap();
        assert!(request.query.is_empty());

        registry
            .call_tool(
                "VERCEL_GET_DEPLOYMENT_EVENTS",
                json!({ "idOrUrl": "dpl_1", "direction": null, "teamId": null }),
                &auth(),
                &upstream,
            )
            .await
            .unwrap();
        let (_, request) = upstream.last().unwrap();
        assert_eq!(request.query_value("direction"), None);
        assert_eq!(request.query_value("teamId"), None);
        assert_eq!(upstream.call_count(), 2);
    }

    #[tokio::test]
    async fn test_call_sends_one_request_with_token() {
        let upstream = RecordingUpstream::new(json!({ "teams": [] }));
        let result = registry()
            .call_tool("VERCEL_LIST_TEAMS", json!({ "limit": 10 }), &auth(), &upstream)
            .await
            .unwrap();

        assert_eq!(upstream.call_count(), 1);
        let (token, request) = upstream.last().unwrap();
        assert_eq!(token, "tok_abc");
        assert_eq!(request.segments, vec!["v2", "teams"]);
        assert_eq!(request.query, vec![("limit", "10".to_string())]);

        if let RawContent::Text(text) = &result.content[0].raw {
            assert!(text.text.starts_with("Teams:\n"));
        } else {
            panic!("expected text content");
        }
    }

    #[tokio::test]
    async fn test_null_arguments_are_empty_object() {
        let upstream = RecordingUpstream::new(json!({ "user": {} }));
        registry()
            .call_tool("VERCEL_GET_USER", Value::Null, &auth(), &upstream)
            .await
            .unwrap();
        assert_eq!(upstream.call_count(), 1);
    }
}
