//! Team tools: team lookup and membership management.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::tools::{
    ToolError, VercelTool, timestamp::opt_epoch_millis, upstream::UpstreamRequest,
};

/// Team-level role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamRole {
    Owner,
    Member,
    Developer,
    Security,
    Billing,
    Viewer,
    Contributor,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
            Self::Developer => "DEVELOPER",
            Self::Security => "SECURITY",
            Self::Billing => "BILLING",
            Self::Viewer => "VIEWER",
            Self::Contributor => "CONTRIBUTOR",
        }
    }
}

/// Project-level role granted alongside a team invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectRole {
    Admin,
    Member,
    Viewer,
}

/// One project-role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRoleAssignment {
    #[schemars(description = "The project identifier")]
    pub project_id: String,

    #[schemars(description = "The role on that project")]
    pub role: ProjectRole,
}

// ============================================================================
// VERCEL_GET_TEAM
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTeamParams {
    #[schemars(description = "The Team identifier")]
    pub team_id: String,
}

pub struct GetTeamTool;

impl VercelTool for GetTeamTool {
    type Params = GetTeamParams;

    const NAME: &'static str = "VERCEL_GET_TEAM";
    const DESCRIPTION: &'static str = "Get information for a specific team";
    const LABEL: &'static str = "Team information";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        Ok(UpstreamRequest::get(["v2", "teams", params.team_id.as_str()]))
    }
}

// ============================================================================
// VERCEL_LIST_TEAMS
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsParams {
    #[schemars(description = "Maximum number of teams to return")]
    pub limit: Option<u32>,

    #[schemars(
        description = "Include teams created after this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub since: Option<String>,

    #[schemars(
        description = "Include teams created before this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub until: Option<String>,
}

pub struct ListTeamsTool;

impl VercelTool for ListTeamsTool {
    type Params = ListTeamsParams;

    const NAME: &'static str = "VERCEL_LIST_TEAMS";
    const DESCRIPTION: &'static str =
        "Get a list of all teams the authenticated user is a member of";
    const LABEL: &'static str = "Teams";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let since = opt_epoch_millis("since", params.since.as_deref())?;
        let until = opt_epoch_millis("until", params.until.as_deref())?;

        Ok(UpstreamRequest::get(["v2", "teams"])
            .query("limit", params.limit)
            .query("since", since)
            .query("until", until))
    }
}

// ============================================================================
// VERCEL_LIST_TEAM_MEMBERS
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamMembersParams {
    #[schemars(description = "The Team identifier")]
    pub team_id: String,

    #[schemars(range(min = 1), description = "Maximum number of members to return")]
    pub limit: Option<u32>,

    #[schemars(
        description = "Include members added after this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub since: Option<String>,

    #[schemars(
        description = "Include members added before this date (ISO 8601 format, e.g., \"2025-01-01T00:00:00Z\" or \"2025-01-01\")"
    )]
    pub until: Option<String>,

    #[schemars(description = "Search by name, username, or email")]
    pub search: Option<String>,

    #[schemars(description = "Filter by role")]
    pub role: Option<TeamRole>,

    #[schemars(description = "Exclude members from specific project")]
    pub exclude_project: Option<String>,

    #[schemars(description = "Include members eligible for project")]
    pub eligible_members_for_project_id: Option<String>,
}

pub struct ListTeamMembersTool;

impl VercelTool for ListTeamMembersTool {
    type Params = ListTeamMembersParams;

    const NAME: &'static str = "VERCEL_LIST_TEAM_MEMBERS";
    const DESCRIPTION: &'static str = "Get a list of team members";
    const LABEL: &'static str = "Team members";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        let since = opt_epoch_millis("since", params.since.as_deref())?;
        let until = opt_epoch_millis("until", params.until.as_deref())?;

        Ok(
            UpstreamRequest::get(["v2", "teams", params.team_id.as_str(), "members"])
                .query("limit", params.limit)
                .query("since", since)
                .query("until", until)
                .query("search", params.search)
                .query("role", params.role.map(|r| r.as_str()))
                .query("excludeProject", params.exclude_project)
                .query(
                    "eligibleMembersForProjectId",
                    params.eligible_members_for_project_id,
                ),
        )
    }
}

// ============================================================================
// VERCEL_INVITE_TEAM_MEMBER
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteTeamMemberParams {
    #[schemars(description = "The Team identifier")]
    pub team_id: String,

    #[schemars(description = "The role to assign")]
    pub role: TeamRole,

    #[schemars(email, description = "The email address to invite")]
    pub email: Option<String>,

    #[schemars(description = "The user ID to invite")]
    pub uid: Option<String>,

    #[schemars(description = "Project-specific roles")]
    pub projects: Option<Vec<ProjectRoleAssignment>>,
}

#[derive(Debug, Serialize)]
struct InviteTeamMemberBody<'a> {
    role: TeamRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<&'a [ProjectRoleAssignment]>,
}

pub struct InviteTeamMemberTool;

impl VercelTool for InviteTeamMemberTool {
    type Params = InviteTeamMemberParams;

    const NAME: &'static str = "VERCEL_INVITE_TEAM_MEMBER";
    const DESCRIPTION: &'static str =
        "Invite a user to join a team, by email address or user ID";
    const LABEL: &'static str = "Team member invited";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        if params.email.is_none() && params.uid.is_none() {
            return Err(ToolError::invalid_field(
                "email",
                "either 'email' or 'uid' must be provided",
            ));
        }

        let body = InviteTeamMemberBody {
            role: params.role,
            email: params.email.as_deref(),
            uid: params.uid.as_deref(),
            projects: params.projects.as_deref(),
        };

        UpstreamRequest::post(["v1", "teams", params.team_id.as_str(), "members"]).json(&body)
    }
}

// ============================================================================
// VERCEL_REMOVE_TEAM_MEMBER
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTeamMemberParams {
    #[schemars(description = "The Team identifier")]
    pub team_id: String,

    #[schemars(description = "The user ID to remove")]
    pub uid: String,

    #[schemars(description = "New default team ID for the removed user")]
    pub new_default_team_id: Option<String>,
}

pub struct RemoveTeamMemberTool;

impl VercelTool for RemoveTeamMemberTool {
    type Params = RemoveTeamMemberParams;

    const NAME: &'static str = "VERCEL_REMOVE_TEAM_MEMBER";
    const DESCRIPTION: &'static str = "Remove a member from a team";
    const LABEL: &'static str = "Team member removed";

    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        Ok(UpstreamRequest::delete([
            "v1",
            "teams",
            params.team_id.as_str(),
            "members",
            params.uid.as_str(),
        ])
        .query("newDefaultTeamId", params.new_default_team_id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::testing::{build, failed_fields};
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_list_teams_limit_only() {
        let request = build::<ListTeamsTool>(json!({ "limit": 10 })).unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.segments, vec!["v2", "teams"]);
        assert_eq!(request.query, vec![("limit", "10".to_string())]);
    }

    #[test]
    fn test_list_teams_converts_iso_dates() {
        let request = build::<ListTeamsTool>(json!({
            "since": "2025-01-01T00:00:00Z",
            "until": "2025-01-02"
        }))
        .unwrap();
        assert_eq!(request.query_value("since"), Some("1735689600000"));
        assert_eq!(request.query_value("until"), Some("1735776000000"));
        assert_eq!(request.query_value("limit"), None);
    }

    #[test]
    fn test_get_team_requires_id() {
        let err = build::<GetTeamTool>(json!({})).unwrap_err();
        assert_eq!(failed_fields(err), vec!["teamId"]);
    }

    #[test]
    fn test_list_members_filters() {
        let request = build::<ListTeamMembersTool>(json!({
            "teamId": "team_1",
            "role": "DEVELOPER",
            "search": "ada"
        }))
        .unwrap();
        assert_eq!(request.segments, vec!["v2", "teams", "team_1", "members"]);
        assert_eq!(
            request.query,
            vec![
                ("search", "ada".to_string()),
                ("role", "DEVELOPER".to_string())
            ]
        );
    }

    #[test]
    fn test_list_members_limit_minimum() {
        let err = build::<ListTeamMembersTool>(json!({ "teamId": "team_1", "limit": 0 }))
            .unwrap_err();
        assert_eq!(failed_fields(err), vec!["limit"]);
    }

    #[test]
    fn test_invite_body_with_projects() {
        let request = build::<InviteTeamMemberTool>(json!({
            "teamId": "team_1",
            "role": "MEMBER",
            "email": "ada@example.com",
            "projects": [{ "projectId": "prj_1", "role": "ADMIN" }]
        }))
        .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.segments, vec!["v1", "teams", "team_1", "members"]);
        assert_eq!(
            request.body,
            Some(json!({
                "role": "MEMBER",
                "email": "ada@example.com",
                "projects": [{ "projectId": "prj_1", "role": "ADMIN" }]
            }))
        );
    }

    #[test]
    fn test_invite_rejects_bad_email() {
        let err = build::<InviteTeamMemberTool>(json!({
            "teamId": "team_1",
            "role": "MEMBER",
            "email": "ada-at-example"
        }))
        .unwrap_err();
        assert_eq!(failed_fields(err), vec!["email"]);
    }

    #[test]
    fn test_invite_rejects_bad_project_role() {
        let err = build::<InviteTeamMemberTool>(json!({
            "teamId": "team_1",
            "role": "MEMBER",
            "uid": "usr_1",
            "projects": [{ "projectId": "prj_1", "role": "OWNER" }]
        }))
        .unwrap_err();
        assert_eq!(failed_fields(err), vec!["projects.0.role"]);
    }

    #[test]
    fn test_invite_needs_email_or_uid() {
        let err = build::<InviteTeamMemberTool>(json!({ "teamId": "team_1", "role": "VIEWER" }))
            .unwrap_err();
        assert_eq!(failed_fields(err), vec!["email"]);
    }

    #[test]
    fn test_remove_member() {
        let request = build::<RemoveTeamMemberTool>(json!({
            "teamId": "team_1",
            "uid": "usr_1"
        }))
        .unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.segments,
            vec!["v1", "teams", "team_1", "members", "usr_1"]
        );
        assert!(request.query.is_empty());
        assert!(request.body.is_none());
    }
}
