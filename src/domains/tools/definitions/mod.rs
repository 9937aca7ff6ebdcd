//! Tool definitions module.
//!
//! One file per Vercel resource; each tool is a unit struct implementing
//! [`VercelTool`](super::VercelTool).

pub mod common;
pub mod deployments;
pub mod dns;
pub mod domains;
pub mod projects;
pub mod teams;
pub mod users;

pub use deployments::{
    GetDeploymentEventsTool, GetDeploymentFileContentsTool, GetDeploymentTool,
    ListDeploymentFilesTool, ListDeploymentsTool,
};
pub use dns::{CreateDnsRecordTool, ListDnsRecordsTool};
pub use domains::{CheckDomainAvailabilityTool, GetDomainPriceTool, ListDomainsTool};
pub use projects::{GetProjectTool, ListProjectsTool};
pub use teams::{
    GetTeamTool, InviteTeamMemberTool, ListTeamMembersTool, ListTeamsTool, RemoveTeamMemberTool,
};
pub use users::GetUserTool;
