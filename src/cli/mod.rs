pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use copilot_usage_mcp::config::{self, types::UsageConfig};

#[derive(Parser)]
#[command(
    name = "copilot-usage-mcp",
    about = "Report GitHub Copilot usage quotas over MCP.",
    version
)]
pub struct Cli {
    /// Config file (defaults to ~/.config/copilot-usage-mcp/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the usage endpoint URL
    #[arg(long, global = true, env = "COPILOT_USAGE_API_URL")]
    pub api_url: Option<String>,

    /// Verbose logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the usage tools over MCP stdio (default)
    Serve,
    /// Fetch usage once and print it
    Show(commands::show::ShowArgs),
}

impl Cli {
    /// Load the config file and apply flag overrides.
    pub fn load_config(&self) -> anyhow::Result<UsageConfig> {
        let mut config = config::load_config(self.config.as_deref())?;
        if let Some(ref url) = self.api_url {
            config.api.url = url.clone();
        }
        Ok(config)
    }
}

/// Dispatch a CLI command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;

    match cli.command {
        None | Some(Commands::Serve) => crate::mcp::serve_stdio(&config),
        Some(Commands::Show(args)) => commands::show::run(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["copilot-usage-mcp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn api_url_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nurl = \"http://from-file/user\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "copilot-usage-mcp",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "http://from-flag/user",
            "show",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.api.url, "http://from-flag/user");
    }

    #[test]
    fn show_defaults_to_summary() {
        let cli = Cli::try_parse_from(["copilot-usage-mcp", "show"]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => assert_eq!(args.view, commands::show::View::Summary),
            _ => panic!("expected show"),
        }
    }
}
