//! GitLab REST API v4 client for project variables.
//!
//! ## Endpoints
//!
//! - `POST {base}projects/{id}/variables`
//! - `GET  {base}projects/{id}/variables/{key}`
//!
//! `{id}` is the numeric project id or the URL-encoded project path
//! (`group/project` is sent as `group%2Fproject`). Requests authenticate
//! with the `PRIVATE-TOKEN` header.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::store::{Connect, NewVariable, StoreResponse, Variable, VariableStore};
use crate::core::config::GitLabConfig;
use crate::core::constants;
use crate::error::{Error, RemoteError, Result};

const PRIVATE_TOKEN: &str = "private-token";

/// Builds blocking HTTP clients for the GitLab API.
#[derive(Debug, Clone)]
pub struct HttpConnect {
    timeout: Duration,
}

impl Default for HttpConnect {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(constants::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl HttpConnect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every request to `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Connect for HttpConnect {
    type Store = HttpStore;

    fn connect(&self, config: &GitLabConfig) -> Result<HttpStore> {
        let base_url = config.base_url()?;

        let mut token = HeaderValue::from_str(config.token())
            .map_err(|_| Error::ClientInit("token contains invalid header characters".to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(PRIVATE_TOKEN), token);

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("keyrelay/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientInit(e.to_string()))?;

        debug!(base_url = %base_url, "gitlab client ready");

        Ok(HttpStore { client, base_url })
    }
}

/// Project variable client over HTTP.
#[derive(Debug)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    fn variables_url(&self, project: &str, key: Option<&str>) -> std::result::Result<Url, RemoteError> {
        let mut path = format!("projects/{}/variables", urlencoding::encode(project));
        if let Some(key) = key {
            path.push('/');
            path.push_str(&urlencoding::encode(key));
        }
        self.base_url
            .join(&path)
            .map_err(|e| RemoteError::Transport(format!("invalid request URL: {}", e)))
    }

    fn send(&self, request: RequestBuilder) -> std::result::Result<StoreResponse<Variable>, RemoteError> {
        let response = request
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        trace!(status, body_len = body.len(), "gitlab response");

        if !(200..300).contains(&status) {
            return Err(RemoteError::Api {
                status,
                message: api_message(status, &body),
            });
        }

        let variable: Variable =
            serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))?;

        Ok(StoreResponse::new(status, body, variable))
    }
}

impl VariableStore for HttpStore {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn create_variable(
        &self,
        project: &str,
        variable: &NewVariable,
    ) -> std::result::Result<StoreResponse<Variable>, RemoteError> {
        let url = self.variables_url(project, None)?;
        debug!(url = %url, key = %variable.key, "creating variable");
        self.send(self.client.post(url).json(variable))
    }

    fn get_variable(
        &self,
        project: &str,
        key: &str,
    ) -> std::result::Result<StoreResponse<Variable>, RemoteError> {
        let url = self.variables_url(project, Some(key))?;
        debug!(url = %url, "fetching variable");
        self.send(self.client.get(url))
    }
}

/// Extract a readable message from a GitLab error body.
///
/// GitLab answers with `{"message": ...}` (a string or a field map) or
/// `{"error": ..., "error_description": ...}`.
fn api_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("message") {
            Some(Value::String(msg)) => return msg.clone(),
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
        if let Some(Value::String(err)) = json.get("error") {
            return match json.get("error_description") {
                Some(Value::String(desc)) => format!("{}: {}", err, desc),
                _ => err.clone(),
            };
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
