use std::io::Write;
use std::sync::Arc;

use copilot_usage_mcp::config::types::UsageConfig;
use copilot_usage_mcp::core::client::CopilotClient;

use crate::mcp::format::failure_message;
use crate::mcp::tools::{UsageServer, UsageTool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    /// Raw API payload as JSON
    Raw,
    /// Detailed report
    Formatted,
    /// Short summary
    Summary,
}

impl From<View> for UsageTool {
    fn from(view: View) -> Self {
        match view {
            View::Raw => UsageTool::Raw,
            View::Formatted => UsageTool::Formatted,
            View::Summary => UsageTool::Summary,
        }
    }
}

#[derive(clap::Args)]
pub struct ShowArgs {
    /// Which projection to print
    #[arg(long, value_enum, default_value = "summary")]
    pub view: View,
}

pub fn run(args: ShowArgs, config: &UsageConfig) -> anyhow::Result<()> {
    let client = CopilotClient::new(&config.api);
    let server = UsageServer::from_env(Arc::new(client), config.auth.token_env.clone());

    let rt = tokio::runtime::Runtime::new()?;
    let text = rt
        .block_on(server.render(args.view.into()))
        .map_err(|err| anyhow::anyhow!(failure_message(&err)))?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}
