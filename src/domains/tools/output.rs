//! Output formatting for tool results.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use super::error::ToolError;

/// Wrap an upstream response into a tool result: a label line followed by
/// the pretty-printed JSON body, as a single text item.
pub fn format_result(label: &str, data: &Value) -> Result<CallToolResult, ToolError> {
    let body = serde_json::to_string_pretty(data)
        .map_err(|e| ToolError::internal(format!("failed to serialize response: {}", e)))?;
    Ok(CallToolResult::success(vec![Content::text(format!(
        "{}:\n{}",
        label, body
    ))]))
}

/// Render a tool result as the JSON payload of a `tools/call` response.
pub fn result_to_json(result: &CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let (Some(structured), Some(obj)) = (&result.structured_content, response.as_object_mut()) {
        obj.insert("structuredContent".to_string(), structured.clone());
    }

    response
}
