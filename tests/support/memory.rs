//! In-memory variable store.
//!
//! Behaves like GitLab project variables: creation of an existing key fails,
//! reads of a missing key fail with 404. Failures can be injected per key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use keyrelay::core::config::GitLabConfig;
use keyrelay::core::provider::gitlab::{Connect, NewVariable, StoreResponse, Variable, VariableStore};
use keyrelay::error::{RemoteError, Result};
use url::Url;

/// Injected failure for a single key.
#[derive(Debug, Clone)]
pub enum Failure {
    /// The request never reached the platform.
    Transport,
    /// The platform answered with this status and no payload.
    Status(u16),
}

#[derive(Default)]
struct State {
    /// (scope, variable) in creation order.
    variables: Vec<(String, Variable)>,
    create_failures: HashMap<String, Failure>,
    get_failures: HashMap<String, Failure>,
    connects: usize,
}

/// Connector handing out stores that share one state.
#[derive(Clone, Default)]
pub struct MemoryConnect {
    state: Arc<Mutex<State>>,
}

impl MemoryConnect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make creation of `key` fail.
    pub fn fail_create(&self, key: &str, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .create_failures
            .insert(key.to_string(), failure);
    }

    /// Make reads of `key` fail.
    pub fn fail_get(&self, key: &str, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .get_failures
            .insert(key.to_string(), failure);
    }

    /// Variables under `scope`, in creation order.
    pub fn variables(&self, scope: &str) -> Vec<Variable> {
        self.state
            .lock()
            .unwrap()
            .variables
            .iter()
            .filter(|(s, _)| s == scope)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Keys under `scope`, in creation order.
    pub fn keys(&self, scope: &str) -> Vec<String> {
        self.variables(scope).into_iter().map(|v| v.key).collect()
    }

    /// Variable `key` under `scope`.
    pub fn get(&self, scope: &str, key: &str) -> Option<Variable> {
        self.variables(scope).into_iter().find(|v| v.key == key)
    }

    /// Number of clients built so far.
    pub fn connects(&self) -> usize {
        self.state.lock().unwrap().connects
    }
}

impl Connect for MemoryConnect {
    type Store = MemoryStore;

    fn connect(&self, config: &GitLabConfig) -> Result<MemoryStore> {
        let base_url = config.base_url()?;
        self.state.lock().unwrap().connects += 1;
        Ok(MemoryStore {
            state: Arc::clone(&self.state),
            base_url,
        })
    }
}

/// Store bound to one connection.
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    base_url: Url,
}

fn injected<T>(failure: &Failure) -> std::result::Result<StoreResponse<T>, RemoteError> {
    match failure {
        Failure::Transport => Err(RemoteError::Transport("connection reset by peer".to_string())),
        Failure::Status(status) => Ok(StoreResponse {
            status: *status,
            body: format!("{{\"message\":\"injected {}\"}}", status),
            value: None,
        }),
    }
}

impl VariableStore for MemoryStore {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn create_variable(
        &self,
        project: &str,
        variable: &NewVariable,
    ) -> std::result::Result<StoreResponse<Variable>, RemoteError> {
        let mut state = self.state.lock().unwrap();

        if let Some(failure) = state.create_failures.get(&variable.key) {
            return injected(failure);
        }

        let exists = state
            .variables
            .iter()
            .any(|(s, v)| s == project && v.key == variable.key);
        if exists {
            return Err(RemoteError::Api {
                status: 400,
                message: format!(
                    "{{\"key\":[\"({}) has already been taken\"]}}",
                    variable.key
                ),
            });
        }

        let created = Variable::from(variable.clone());
        let body = serde_json::to_string(&created).unwrap();
        state.variables.push((project.to_string(), created.clone()));
        Ok(StoreResponse::new(201, body, created))
    }

    fn get_variable(
        &self,
        project: &str,
        key: &str,
    ) -> std::result::Result<StoreResponse<Variable>, RemoteError> {
        let state = self.state.lock().unwrap();

        if let Some(failure) = state.get_failures.get(key) {
            return injected(failure);
        }

        state
            .variables
            .iter()
            .find(|(s, v)| s == project && v.key == key)
            .map(|(_, v)| {
                let body = serde_json::to_string(v).unwrap();
                StoreResponse::new(200, body, v.clone())
            })
            .ok_or_else(|| RemoteError::Api {
                status: 404,
                message: "404 Variable Not Found".to_string(),
            })
    }
}
