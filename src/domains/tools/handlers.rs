//! Tool handler contract.
//!
//! Every Vercel tool is a unit struct implementing [`VercelTool`]: a typed
//! parameter struct (which doubles as its schema), the catalog metadata, and
//! a pure function from validated parameters to the one upstream request the
//! tool performs. Sending the request and formatting the answer is shared.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::Tool,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;
use super::upstream::UpstreamRequest;

/// A tool backed by exactly one upstream API operation.
pub trait VercelTool {
    /// Typed parameters; their `JsonSchema` is the published input schema.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Heading placed above the JSON body in the result text.
    const LABEL: &'static str;

    /// Map validated parameters to the upstream request.
    fn build_request(params: Self::Params) -> Result<UpstreamRequest, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
