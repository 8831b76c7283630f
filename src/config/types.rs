use serde::{Deserialize, Serialize};

/// Endpoint queried for the current user's Copilot quotas.
pub const DEFAULT_API_URL: &str = "https://api.github.com/copilot_internal/user";

/// Environment variable holding the Copilot credential.
pub const DEFAULT_TOKEN_ENV: &str = "COPILOT_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub headers: HeaderConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.into(),
            headers: HeaderConfig::default(),
        }
    }
}

/// Client identification sent with every request. The endpoint rejects
/// requests that do not look like they come from an editor plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub editor_version: String,
    pub editor_plugin_version: String,
    pub user_agent: String,
    pub api_version: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            editor_version: "vscode/1.98.1".into(),
            editor_plugin_version: "copilot-chat/0.26.7".into(),
            user_agent: "GitHubCopilotChat/0.26.7".into(),
            api_version: "2025-04-01".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Name of the environment variable the token is read from.
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: DEFAULT_TOKEN_ENV.into(),
        }
    }
}
