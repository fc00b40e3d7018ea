//! Variable store capability.
//!
//! The GitLab provider talks to the platform through [`VariableStore`], built
//! per call by a [`Connect`] implementation from the resolved credentials.
//! Production uses the REST client in `http`; tests substitute in-memory
//! stores.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::config::GitLabConfig;
use crate::core::constants;
use crate::core::domain::SecretName;
use crate::error::{RemoteError, Result};

/// A project variable as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub variable_type: String,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub masked: bool,
    #[serde(default)]
    pub environment_scope: Option<String>,
}

/// Options for creating a project variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
    pub variable_type: String,
    pub protected: bool,
    pub masked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_scope: Option<String>,
}

impl NewVariable {
    /// Env-style variable for `name` with that name's policy.
    pub fn new(name: SecretName, value: impl Into<String>) -> Self {
        let policy = name.policy();
        Self {
            key: name.as_str().to_string(),
            value: value.into(),
            variable_type: constants::ENV_VARIABLE_TYPE.to_string(),
            protected: policy.protected,
            masked: policy.masked,
            environment_scope: policy.environment_scope.map(str::to_string),
        }
    }
}

impl From<NewVariable> for Variable {
    fn from(v: NewVariable) -> Self {
        Self {
            key: v.key,
            value: v.value,
            variable_type: v.variable_type,
            protected: v.protected,
            masked: v.masked,
            environment_scope: v.environment_scope,
        }
    }
}

/// Outcome of a store call that reached the platform.
#[derive(Debug, Clone)]
pub struct StoreResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Decoded payload, if any.
    pub value: Option<T>,
}

impl<T> StoreResponse<T> {
    /// Response with a decoded payload.
    pub fn new(status: u16, body: impl Into<String>, value: T) -> Self {
        Self {
            status,
            body: body.into(),
            value: Some(value),
        }
    }

    /// Payload, provided the status is in the 2xx class.
    ///
    /// # Errors
    ///
    /// `RemoteError::Status` carrying the body when the status is outside
    /// 200..=299, `RemoteError::Decode` when a successful response has no
    /// payload.
    pub fn into_success(self) -> std::result::Result<T, RemoteError> {
        if self.status < 200 || self.status >= 300 {
            return Err(RemoteError::Status {
                status: self.status,
                body: self.body,
            });
        }
        self.value
            .ok_or_else(|| RemoteError::Decode("response has no payload".to_string()))
    }
}

/// Project variable operations.
pub trait VariableStore {
    /// Effective REST API base URL.
    fn base_url(&self) -> &Url;

    /// Create a variable under `project`.
    ///
    /// Creating a key that already exists is an error; there is no upsert.
    fn create_variable(
        &self,
        project: &str,
        variable: &NewVariable,
    ) -> std::result::Result<StoreResponse<Variable>, RemoteError>;

    /// Fetch the variable `key` under `project`.
    fn get_variable(
        &self,
        project: &str,
        key: &str,
    ) -> std::result::Result<StoreResponse<Variable>, RemoteError>;
}

/// Builds a [`VariableStore`] bound to resolved credentials.
pub trait Connect: Send + Sync {
    type Store: VariableStore;

    /// Construct a client. Must not touch the network.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClientInit` for local construction failures.
    fn connect(&self, config: &GitLabConfig) -> Result<Self::Store>;
}
