pub mod types;

use std::path::{Path, PathBuf};

use crate::error::{Result, UsageError};
use types::UsageConfig;

/// Load config from an explicit path, or from the XDG path when `path` is
/// `None`. A missing default file yields the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<UsageConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path(), false),
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(UsageConfig::default());
        }
        Err(err) => {
            return Err(UsageError::Config {
                path,
                message: err.to_string(),
            });
        }
    };

    parse_config(&contents).map_err(|message| UsageError::Config { path, message })
}

fn parse_config(contents: &str) -> std::result::Result<UsageConfig, String> {
    toml::from_str(contents).map_err(|e| e.to_string())
}

/// Return XDG config dir (~/.config/copilot-usage-mcp/)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("copilot-usage-mcp")
}

/// Return the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Read the token from the given environment variable. Blank values count as
/// absent.
pub fn token_from_env(var: &str) -> Option<String> {
    normalize_token(std::env::var(var).ok())
}

pub(crate) fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_copilot_endpoint() {
        let config = UsageConfig::default();
        assert_eq!(config.api.url, types::DEFAULT_API_URL);
        assert_eq!(config.auth.token_env, "COPILOT_TOKEN");
        assert_eq!(config.api.headers.api_version, "2025-04-01");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [api]
            url = "http://localhost:8080/user"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.url, "http://localhost:8080/user");
        assert_eq!(config.api.headers.user_agent, "GitHubCopilotChat/0.26.7");
        assert_eq!(config.auth.token_env, "COPILOT_TOKEN");
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(matches!(err, UsageError::Config { .. }));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nurl = ").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, UsageError::Config { .. }));
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[auth]\ntoken_env = \"MY_TOKEN\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.auth.token_env, "MY_TOKEN");
    }

    #[test]
    fn blank_tokens_are_absent() {
        assert_eq!(normalize_token(None), None);
        assert_eq!(normalize_token(Some("   \n".into())), None);
        assert_eq!(normalize_token(Some(" abc \n".into())), Some("abc".into()));
    }
}
