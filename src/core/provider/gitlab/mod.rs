//! GitLab secret provider.
//!
//! Stores the key pair as project CI/CD variables.
//!
//! ## Requirements
//!
//! - `GITLAB_TOKEN`: access token with the `api` scope (required)
//! - `GITLAB_HOST`: base URL of a self-hosted instance (optional, defaults to
//!   gitlab.com)
//!
//! ## Usage
//!
//! ```bash
//! keyrelay generate-key-pair gitlab://group/project
//! keyrelay get-secret gitlab://group/project COSIGN_PUBLIC_KEY
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::core::config::{Env, GitLabConfig};
use crate::core::constants;
use crate::core::domain::SecretName;
use crate::core::keys::{KeyPair, PassFunc};
use crate::core::notify::{Notifier, Silent};
use crate::error::{Error, Result};

use super::SecretProvider;

pub mod http;
pub mod store;

pub use http::{HttpConnect, HttpStore};
pub use store::{Connect, NewVariable, StoreResponse, Variable, VariableStore};

/// GitLab project variable provider.
///
/// Credentials are resolved from `env` at the start of every call and the
/// client is built by `connector`, so neither touches process state
/// mid-operation.
pub struct GitLab<C = HttpConnect> {
    env: Env,
    connector: C,
    notifier: Arc<dyn Notifier>,
    public_key_path: PathBuf,
}

impl GitLab<HttpConnect> {
    /// Provider using the process environment and the HTTP client.
    pub fn new() -> Self {
        Self::with_connector(HttpConnect::default())
    }
}

impl Default for GitLab<HttpConnect> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connect> GitLab<C> {
    /// Provider using a custom client connector.
    pub fn with_connector(connector: C) -> Self {
        Self {
            env: Env::process(),
            connector,
            notifier: Arc::new(Silent),
            public_key_path: PathBuf::from(constants::PUBLIC_KEY_FILE),
        }
    }

    /// Resolve credentials from `env` instead of the process environment.
    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// Send progress notices to `notifier`.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Write the local public key copy to `path` instead of `cosign.pub`.
    pub fn public_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.public_key_path = path.into();
        self
    }

    /// Resolve credentials and build a client.
    ///
    /// # Errors
    ///
    /// `Error::CredentialMissing` before any client is built, or
    /// `Error::ClientInit` from the connector.
    pub fn connect(&self) -> Result<C::Store> {
        let config = GitLabConfig::resolve(&self.env)?;
        self.connector.connect(&config)
    }

    fn create(&self, store: &C::Store, scope: &str, name: SecretName, value: &str) -> Result<()> {
        debug!(scope, variable = %name, "creating variable");

        let variable = NewVariable::new(name, value);
        store
            .create_variable(scope, &variable)
            .and_then(|resp| resp.into_success())
            .map_err(|source| Error::RemoteWrite {
                variable: name,
                source,
            })?;

        self.notifier
            .info(&format!("{} written to \"{}\" variable", name.label(), name));
        Ok(())
    }

    fn write_public_key(&self, public_key: &[u8]) -> Result<()> {
        let path = self.public_key_path.as_path();
        write_owner_only(path, public_key).map_err(|source| Error::LocalPersist {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "public key saved");
        self.notifier
            .info(&format!("Public key also written to {}", path.display()));
        Ok(())
    }

    fn provision(&self, store: &C::Store, scope: &str, keys: &KeyPair) -> Result<()> {
        self.create(store, scope, SecretName::CosignPassword, keys.password_str())?;
        self.create(store, scope, SecretName::CosignPrivateKey, keys.private_str())?;
        self.create(store, scope, SecretName::CosignPublicKey, keys.public_str())?;
        Ok(())
    }
}

impl<C: Connect> SecretProvider for GitLab<C> {
    fn put_secret(&self, scope: &str, pass: &mut dyn PassFunc) -> Result<()> {
        let store = self.connect()?;
        let keys = KeyPair::generate(pass)?;

        if let Err(e) = self.provision(&store, scope, &keys) {
            if matches!(e, Error::RemoteWrite { .. }) {
                self.notifier.warn(&format!(
                    "If you are using a self-hosted GitLab please set {} to your server URL.",
                    constants::GITLAB_HOST_VAR
                ));
            }
            return Err(e);
        }

        self.write_public_key(keys.public_bytes())
    }

    fn get_secret(&self, scope: &str, name: SecretName) -> Result<String> {
        let store = self.connect()?;

        debug!(scope, variable = %name, "fetching variable");
        let variable = store
            .get_variable(scope, name.as_str())
            .and_then(|resp| resp.into_success())
            .map_err(|source| Error::RemoteRead {
                variable: name,
                source,
            })?;

        Ok(variable.value)
    }

    fn scheme(&self) -> &'static str {
        constants::GITLAB_SCHEME
    }
}

/// Create or truncate `path` with owner read/write permissions only.
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(constants::PUBLIC_KEY_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;

    // `mode` only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(constants::PUBLIC_KEY_FILE_MODE))?;
    }

    Ok(())
}
