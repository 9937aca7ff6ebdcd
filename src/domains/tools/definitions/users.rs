//! User tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::{ToolError, VercelTool, upstream::UpstreamRequest};

/// The authenticated-user lookup takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetUserParams {}

pub struct GetUserTool;

impl VercelTool for GetUserTool {
    type Params = GetUserParams;

    const NAME: &'static str = "VERCEL_GET_USER";
    const DESCRIPTION: &'static str =
        "Retrieves information related to the currently authenticated User";
    const LABEL: &'static str = "User";

    fn build_request(_params: Self::Params) -> Result<UpstreamRequest, ToolError> {
        Ok(UpstreamRequest::get(["v2", "user"]))
    }
}
