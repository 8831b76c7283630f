// Tool result envelopes. Failures the caller can act on are returned as
// `isError` text content, prefixed with ❌.

use rmcp::model::{CallToolResult, Content};

use copilot_usage_mcp::error::UsageError;

/// Prefix for failures that happen after the token was found.
const FETCH_FAILED: &str = "Erro ao obter informações de uso do Copilot";

pub fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

pub fn error_result(message: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("❌ {message}"))])
}

/// Map a usage failure to the error text shown to the agent.
pub fn failure_message(err: &UsageError) -> String {
    match err {
        UsageError::MissingToken { .. } => err.to_string(),
        other => format!("{FETCH_FAILED}: {other}"),
    }
}
