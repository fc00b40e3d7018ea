//! Provider configuration.
//!
//! Credentials come from the environment and are resolved once at the start
//! of each provider call. Lookups go through [`Env`] so tests can supply a
//! fixed set of variables instead of mutating the process environment.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{Error, Result};

/// Source of environment variables.
#[derive(Debug, Clone, Default)]
pub enum Env {
    /// The current process environment.
    #[default]
    Process,
    /// A fixed set of variables.
    Fixed(BTreeMap<String, String>),
}

impl Env {
    /// Read from the process environment.
    pub fn process() -> Self {
        Self::Process
    }

    /// Build a fixed environment from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a variable. Empty values count as unset.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let value = match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Resolved GitLab credentials.
#[derive(Clone)]
pub struct GitLabConfig {
    token: Zeroizing<String>,
    host: Option<String>,
}

impl GitLabConfig {
    /// Create a configuration from explicit values.
    pub fn new(token: impl Into<String>, host: Option<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            host,
        }
    }

    /// Resolve credentials from `GITLAB_TOKEN` and `GITLAB_HOST`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialMissing` if the token is not set.
    pub fn resolve(env: &Env) -> Result<Self> {
        let token = env
            .lookup(constants::GITLAB_TOKEN_VAR)
            .ok_or(Error::CredentialMissing {
                variable: constants::GITLAB_TOKEN_VAR,
            })?;
        let host = env.lookup(constants::GITLAB_HOST_VAR);

        debug!(host = host.as_deref().unwrap_or("default"), "resolved gitlab config");

        Ok(Self::new(token, host))
    }

    /// Access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Host override, if any.
    pub fn host_override(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Effective REST API base URL.
    ///
    /// Without an override this is `https://gitlab.com/api/v4/`. An override
    /// gets a trailing slash and the `api/v4/` suffix unless it already
    /// ends with it.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClientInit` if the override is not an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> Result<Url> {
        let raw = match &self.host {
            None => constants::GITLAB_DEFAULT_BASE_URL.to_string(),
            Some(host) if host.ends_with('/') => host.clone(),
            Some(host) => format!("{}/", host),
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| Error::ClientInit(format!("invalid base URL {:?}: {}", raw, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ClientInit(format!(
                "invalid base URL {:?}: unsupported scheme {}",
                raw,
                url.scheme()
            )));
        }

        if !url.path().ends_with(constants::GITLAB_API_PATH) {
            let path = format!("{}{}", url.path(), constants::GITLAB_API_PATH);
            url.set_path(&path);
        }

        Ok(url)
    }
}

impl fmt::Debug for GitLabConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabConfig")
            .field("token", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}
