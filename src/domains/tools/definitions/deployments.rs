//! Deployment tools.
//!
//! Inspect deployments, their build events, and the files they contain.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::TeamScope;
use crate::domains::tools::{
    ToolError, VercelTool, timestamp::opt_epoch_millis, upstream::UpstreamRequest,
};

// ============================================================================
// Shared enums
// ============================================================================

/// Deployment lifecycle state used as a list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeploymentState {
    Building,
    Error,
    Initializing,
    Queued,
    Ready,
    Canceled,
}

impl DeploymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "BUILDING",
            Self::Error => "ERROR",
            Self::Initializing => "INITIALIZING",
            Self::Queued => "QUEUED",
            Self::Ready => "READY",
            Self::Canceled => "CANCELED",
        }
    }
}

/// Ordering of deployment events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventDirection {
    Forward,
    Backward,
}

impl EventDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

// ============================================================================
// VERCEL_GET_DEPLOYMENT
// ============================================================================

/// Parameters for fetching a single deployment.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDeploymentParams {
    #[schemars(description = "The unique identifier or hostname of the deployment")]
    pub id_or_url: String,

    #[schemars(description = "Whether to add gitRepo information")]
    pub with_git_repo_info: Option<String>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct GetDeploymentTool;

impl VercelTool for GetDeploymentTool {
    type Params = GetDeploymentParams;

    const NAME: &'static str = "VERCEL_GET_DEPLOYMENT";
    const DESCRIPTION: &'static str = "Retrieve detailed information for a specific deployment including build status, regions, and metadata";
    const LABEL: &'static str = "Deployment";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let request = UpstreamRequest::get(["v13", "deployments", params.id_or_url.as_str()])
            .query("withGitRepoInfo", params.with_git_repo_info);
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_GET_DEPLOYMENT_EVENTS
// ============================================================================

/// Parameters for fetching deployment build events and logs.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDeploymentEventsParams {
    #[schemars(description = "The unique identifier or hostname of the deployment")]
    pub id_or_url: String,

    #[schemars(description = "Order of the returned events based on timestamp")]
    pub direction: Option<EventDirection>,

    #[schemars(description = "Return live events as they happen (1 to enable)")]
    pub follow: Option<u8>,

    #[schemars(description = "Maximum number of events to return (-1 for all)")]
    pub limit: Option<i64>,

    #[schemars(description = "Deployment build ID")]
    pub name: Option<String>,

    #[schemars(
        description = "Timestamp to start pulling logs from (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub since: Option<String>,

    #[schemars(
        description = "Timestamp to pull logs until (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub until: Option<String>,

    #[schemars(description = "HTTP status code range to filter events by (e.g. '5xx')")]
    pub status_code: Option<String>,

    #[schemars(description = "Delimiter option")]
    pub delimiter: Option<u8>,

    #[schemars(description = "Builds option")]
    pub builds: Option<u8>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct GetDeploymentEventsTool;

impl VercelTool for GetDeploymentEventsTool {
    type Params = GetDeploymentEventsParams;

    const NAME: &'static str = "VERCEL_GET_DEPLOYMENT_EVENTS";
    const DESCRIPTION: &'static str =
        "Retrieve build logs and events for a specific deployment to debug issues";
    const LABEL: &'static str = "Deployment events";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let since = opt_epoch_millis("since", params.since.as_deref())?;
        let until = opt_epoch_millis("until", params.until.as_deref())?;

        let path = ["v3", "deployments", params.id_or_url.as_str(), "events"];
        let request = UpstreamRequest::get(path)
            .query("direction", params.direction.map(|d| d.as_str()))
            .query("follow", params.follow)
            .query("limit", params.limit)
            .query("name", params.name)
            .query("since", since)
            .query("until", until)
            .query("statusCode", params.status_code)
            .query("delimiter", params.delimiter)
            .query("builds", params.builds);
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_LIST_DEPLOYMENT_FILES
// ============================================================================

/// Parameters for listing the file tree of a deployment.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDeploymentFilesParams {
    #[schemars(description = "The unique deployment identifier")]
    pub id: String,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct ListDeploymentFilesTool;

impl VercelTool for ListDeploymentFilesTool {
    type Params = ListDeploymentFilesParams;

    const NAME: &'static str = "VERCEL_LIST_DEPLOYMENT_FILES";
    const DESCRIPTION: &'static str = "List all files in a specific deployment to debug issues";
    const LABEL: &'static str = "Deployment files";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let request = UpstreamRequest::get(["v6", "deployments", params.id.as_str(), "files"]);
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_GET_DEPLOYMENT_FILE_CONTENTS
// ============================================================================

/// Parameters for reading one file of a deployment.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDeploymentFileContentsParams {
    #[schemars(description = "The unique deployment identifier")]
    pub id: String,

    #[schemars(description = "The unique file identifier")]
    pub file_id: String,

    #[schemars(description = "Path to the file (only for Git deployments)")]
    pub path: Option<String>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct GetDeploymentFileContentsTool;

impl VercelTool for GetDeploymentFileContentsTool {
    type Params = GetDeploymentFileContentsParams;

    const NAME: &'static str = "VERCEL_GET_DEPLOYMENT_FILE_CONTENTS";
    const DESCRIPTION: &'static str = "Retrieve the contents of a specific file in a deployment";
    const LABEL: &'static str = "Deployment file contents";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let request = UpstreamRequest::get([
            "v7",
            "deployments",
            params.id.as_str(),
            "files",
            params.file_id.as_str(),
        ])
        .query("path", params.path);
        Ok(params.scope.apply(request))
    }
}

// ============================================================================
// VERCEL_LIST_DEPLOYMENTS
// ============================================================================

/// Parameters for listing deployments.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDeploymentsParams {
    #[schemars(description = "Name of the deployment")]
    pub app: Option<String>,

    #[schemars(
        description = "Get deployments created after this timestamp (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub from: Option<String>,

    #[schemars(description = "Maximum number of deployments to list")]
    pub limit: Option<u32>,

    #[schemars(description = "Filter deployments from the given ID or name")]
    pub project_id: Option<String>,

    #[schemars(description = "Filter deployments based on the environment")]
    pub target: Option<String>,

    #[schemars(
        description = "Get deployments created before this timestamp (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub to: Option<String>,

    #[schemars(description = "Filter deployments based on users who created them")]
    pub users: Option<String>,

    #[schemars(
        description = "Get deployments created after this timestamp (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub since: Option<String>,

    #[schemars(
        description = "Get deployments created before this timestamp (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub until: Option<String>,

    #[schemars(
        description = "Filter by state (BUILDING, ERROR, INITIALIZING, QUEUED, READY, CANCELED)"
    )]
    pub state: Option<DeploymentState>,

    #[schemars(description = "Filter deployments based on rollback candidacy")]
    pub rollback_candidate: Option<bool>,

    #[serde(flatten)]
    pub scope: TeamScope,
}

pub struct ListDeploymentsTool;

impl VercelTool for ListDeploymentsTool {
    type Params = ListDeploymentsParams;

    const NAME: &'static str = "VERCEL_LIST_DEPLOYMENTS";
    const DESCRIPTION: &'static str = "List all deployments for a specific project";
    const LABEL: &'static str = "Deployments";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let from = opt_epoch_millis("from", params.from.as_deref())?;
        let to = opt_epoch_millis("to", params.to.as_deref())?;
        let since = opt_epoch_millis("since", params.since.as_deref())?;
        let until = opt_epoch_millis("until", params.until.as_deref())?;

        let request = UpstreamRequest::get(["v6", "deployments"])
            .query("app", params.app)
            .query("from", from)
            .query("limit", params.limit)
            .query("projectId", params.project_id)
            .query("target", params.target)
            .query("to", to)
            .query("users", params.users)
            .query("since", since)
            .query("until", until)
            .query("state", params.state.map(|s| s.as_str()))
            .query("rollbackCandidate", params.rollback_candidate);
        Ok(params.scope.apply(request))
    }
}
