// MCP tool dispatch
//
// Tools:
// - get_copilot_usage: raw API payload as pretty JSON
// - get_copilot_usage_formatted: detailed pt-BR report
// - get_copilot_usage_summary: condensed pt-BR summary
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData as McpError, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::json;

use copilot_usage_mcp::config;
use copilot_usage_mcp::core::client::UsageSource;
use copilot_usage_mcp::core::format::{format_summary, format_usage};
use copilot_usage_mcp::core::usage::UsageSnapshot;
use copilot_usage_mcp::error::{Result, UsageError};

use super::format::{error_result, failure_message, text_result};

/// Looks up the credential on each call.
pub type TokenFn = Arc<dyn Fn() -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTool {
    Raw,
    Formatted,
    Summary,
}

impl UsageTool {
    pub const ALL: [UsageTool; 3] = [UsageTool::Raw, UsageTool::Formatted, UsageTool::Summary];

    pub fn name(self) -> &'static str {
        match self {
            UsageTool::Raw => "get_copilot_usage",
            UsageTool::Formatted => "get_copilot_usage_formatted",
            UsageTool::Summary => "get_copilot_usage_summary",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UsageTool::Raw => {
                "Obtém informações de uso atual do GitHub Copilot, incluindo cotas e limites, dados puros da API"
            }
            UsageTool::Formatted => {
                "Obtém informações de uso do GitHub Copilot formatadas de forma legível"
            }
            UsageTool::Summary => {
                "Obtém um resumo conciso do uso do GitHub Copilot com informações principais, como o restante da quota premium (economiza tokens)"
            }
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| UsageError::UnknownTool(name.to_owned()))
    }
}

/// None of the tools take arguments.
fn empty_input_schema() -> JsonObject {
    match json!({ "type": "object", "properties": {}, "required": [] }) {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Static descriptors returned by `list_tools`.
pub fn tool_definitions() -> Vec<Tool> {
    let schema = Arc::new(empty_input_schema());
    UsageTool::ALL
        .into_iter()
        .map(|tool| Tool::new(tool.name(), tool.description(), schema.clone()))
        .collect()
}

/// Dispatch context: where the token comes from and how usage is fetched.
#[derive(Clone)]
pub struct UsageServer {
    source: Arc<dyn UsageSource>,
    token: TokenFn,
    token_env: String,
}

impl UsageServer {
    pub fn new(source: Arc<dyn UsageSource>, token: TokenFn, token_env: impl Into<String>) -> Self {
        Self {
            source,
            token,
            token_env: token_env.into(),
        }
    }

    /// Read the token from the environment variable named `token_env` on
    /// every call.
    pub fn from_env(source: Arc<dyn UsageSource>, token_env: impl Into<String>) -> Self {
        let token_env = token_env.into();
        let var = token_env.clone();
        let token: TokenFn = Arc::new(move || config::token_from_env(&var));
        Self::new(source, token, token_env)
    }

    fn token(&self) -> Result<String> {
        (self.token)()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| UsageError::MissingToken {
                env_var: self.token_env.clone(),
            })
    }

    /// Fetch once and render the projection for `tool`.
    pub async fn render(&self, tool: UsageTool) -> Result<String> {
        let token = self.token()?;
        let value = self.source.fetch_usage(&token).await?;

        match tool {
            UsageTool::Raw => Ok(serde_json::to_string_pretty(&value)?),
            UsageTool::Formatted => Ok(format_usage(&UsageSnapshot::from_value(&value)?)),
            UsageTool::Summary => Ok(format_summary(&UsageSnapshot::from_value(&value)?)),
        }
    }

    /// Run a tool, folding every failure into an `isError` result.
    pub async fn run(&self, tool: UsageTool) -> CallToolResult {
        match self.render(tool).await {
            Ok(text) => text_result(text),
            Err(err) => {
                match &err {
                    UsageError::MissingToken { env_var } => {
                        tracing::warn!(tool = tool.name(), "no token in {env_var}");
                    }
                    other => tracing::error!(tool = tool.name(), "usage fetch failed: {other}"),
                }
                error_result(failure_message(&err))
            }
        }
    }

    /// Resolve a tool by name and run it. Unknown names are an `Err`, never
    /// an `isError` result.
    pub async fn call(&self, name: &str) -> Result<CallToolResult> {
        let tool = UsageTool::from_name(name)?;
        tracing::debug!(tool = name, "tool call");
        Ok(self.run(tool).await)
    }
}

impl ServerHandler for UsageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Consulta as cotas de uso do GitHub Copilot. Use get_copilot_usage_summary para um resumo curto."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.call(&request.name).await.map_err(|err| {
            tracing::error!("rejected tool call: {err}");
            McpError::invalid_params(err.to_string(), None)
        })
    }
}
