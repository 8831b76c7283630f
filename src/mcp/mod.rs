pub mod format;
pub mod tools;

use std::sync::Arc;

use rmcp::ServiceExt;

use copilot_usage_mcp::config::types::UsageConfig;
use copilot_usage_mcp::core::client::CopilotClient;
use tools::UsageServer;

/// Start the MCP server over stdio. Blocks until the connection closes or
/// the process receives SIGINT/SIGTERM.
pub fn serve_stdio(config: &UsageConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = CopilotClient::new(&config.api);
        tracing::debug!(url = client.url(), "usage endpoint");

        let server = UsageServer::from_env(Arc::new(client), config.auth.token_env.clone());
        let service = server.serve(rmcp::transport::stdio()).await?;
        tracing::info!("copilot usage MCP server started");

        tokio::select! {
            res = service.waiting() => {
                res?;
                tracing::info!("client disconnected");
            }
            signal = shutdown_signal() => {
                tracing::info!("received {signal}, shutting down");
                // Requests are single round trips; nothing to drain.
                std::process::exit(0);
            }
        }

        Ok(())
    })
}

/// Resolve when `signal` fires. A handler that fails to install logs and
/// never resolves, so it cannot be mistaken for a delivered signal.
async fn wait_for(name: &str, signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(err) = signal.await {
        tracing::warn!("could not install {name} handler: {err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let terminate = async {
        let mut term = signal(SignalKind::terminate())?;
        term.recv().await;
        Ok::<(), std::io::Error>(())
    };

    tokio::select! {
        _ = wait_for("SIGINT", tokio::signal::ctrl_c()) => "SIGINT",
        _ = wait_for("SIGTERM", terminate) => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    wait_for("SIGINT", tokio::signal::ctrl_c()).await;
    "SIGINT"
}
