use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use serde_json::Value;

use crate::config::types::{ApiConfig, HeaderConfig};
use crate::error::{Result, UsageError};

const EDITOR_VERSION: &str = "editor-version";
const EDITOR_PLUGIN_VERSION: &str = "editor-plugin-version";
const GITHUB_API_VERSION: &str = "x-github-api-version";

/// Something that can fetch the raw usage payload for a token.
#[async_trait]
pub trait UsageSource: Send + Sync {
    async fn fetch_usage(&self, token: &str) -> Result<Value>;
}

/// Fetches usage from the Copilot user endpoint. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct CopilotClient {
    client: Client,
    url: String,
    headers: HeaderConfig,
}

impl CopilotClient {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            url: api.url.clone(),
            headers: api.headers.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, header_value(&format!("token {token}"))?);
        headers.insert(
            HeaderName::from_static(EDITOR_VERSION),
            header_value(&self.headers.editor_version)?,
        );
        headers.insert(
            HeaderName::from_static(EDITOR_PLUGIN_VERSION),
            header_value(&self.headers.editor_plugin_version)?,
        );
        headers.insert(USER_AGENT, header_value(&self.headers.user_agent)?);
        headers.insert(
            HeaderName::from_static(GITHUB_API_VERSION),
            header_value(&self.headers.api_version)?,
        );
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| UsageError::Decode(format!("invalid header value: {e}")))
}

/// Only failures to reach the host count as network errors.
fn send_error(err: reqwest::Error) -> UsageError {
    if err.is_connect() || err.is_timeout() {
        UsageError::Network(err)
    } else {
        UsageError::Http(err)
    }
}

#[async_trait]
impl UsageSource for CopilotClient {
    async fn fetch_usage(&self, token: &str) -> Result<Value> {
        let headers = self.request_headers(token)?;

        let response = self
            .client
            .get(&self.url)
            .headers(headers)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "usage request rejected");
            return Err(UsageError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            });
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        tracing::debug!(status = status.as_u16(), "usage fetched");
        Ok(value)
    }
}
