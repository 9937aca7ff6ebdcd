//! Project tools.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::TeamScope;
use crate::domains::tools::{ToolError, VercelTool, upstream::UpstreamRequest};

// ============================================================================
// VERCEL_LIST_PROJECTS
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsParams {
    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct ListProjectsTool;

impl VercelTool for ListProjectsTool {
    type Params = ListProjectsParams;

    const NAME: &'static str = "VERCEL_LIST_PROJECTS";
    const DESCRIPTION: &'static str = "List all projects from Vercel. Commands: 'list projects', 'show projects', 'get projects', 'list all projects', 'show my projects', 'list vercel projects'";
    const LABEL: &'static str = "Projects";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        Ok(params.scope.apply(UpstreamRequest::get(["v10", "projects"])))
    }
}

// ============================================================================
// VERCEL_GET_PROJECT
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectParams {
    #[schemars(description = "The unique project identifier or project name")]
    pub id_or_name: String,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct GetProjectTool;

impl VercelTool for GetProjectTool {
    type Params = GetProjectParams;

    const NAME: &'static str = "VERCEL_GET_PROJECT";
    const DESCRIPTION: &'static str = "Get a project from Vercel, using either its id or its name";
    const LABEL: &'static str = "Project";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let request = UpstreamRequest::get(["v9", "projects", params.id_or_name.as_str()]);
        Ok(params.scope.apply(request))
    }
}
