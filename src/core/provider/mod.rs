//! Secret providers.
//!
//! A provider provisions a signing key pair into a CI platform's variable
//! store and reads variables back. One implementation exists per platform;
//! all of them share the same contract:
//!
//! - `put_secret` writes `COSIGN_PASSWORD`, `COSIGN_PRIVATE_KEY` and
//!   `COSIGN_PUBLIC_KEY` in that order, then the local `cosign.pub`. The
//!   first failure aborts the sequence. Variables already created are left
//!   in place.
//! - `get_secret` returns one variable's value unchanged.
//!
//! ## Adding a New Provider
//!
//! 1. Implement the `SecretProvider` trait in a new module
//! 2. Register its scheme in `provider_for`

use std::sync::Arc;

use crate::core::constants;
use crate::core::domain::SecretName;
use crate::core::keys::PassFunc;
use crate::core::notify::Notifier;
use crate::error::{Error, Result};

pub mod gitlab;

pub use gitlab::GitLab;

/// CI platform secret store.
pub trait SecretProvider: Send + Sync {
    /// Generate a key pair and provision it under `scope`.
    ///
    /// # Errors
    ///
    /// - `Error::CredentialMissing` if the platform token is not set
    /// - `Error::ClientInit` if the platform client cannot be built
    /// - `Error::KeyGeneration` if the key pair cannot be generated
    /// - `Error::RemoteWrite` naming the variable whose creation failed
    /// - `Error::LocalPersist` if the local public key copy cannot be written
    fn put_secret(&self, scope: &str, pass: &mut dyn PassFunc) -> Result<()>;

    /// Fetch the value of `name` under `scope`.
    ///
    /// # Errors
    ///
    /// `Error::CredentialMissing`, `Error::ClientInit`, or
    /// `Error::RemoteRead` naming the variable.
    fn get_secret(&self, scope: &str, name: SecretName) -> Result<String>;

    /// Reference scheme handled by this provider.
    fn scheme(&self) -> &'static str;
}

/// Schemes accepted by `provider_for`.
pub const SUPPORTED_SCHEMES: &[&str] = &[constants::GITLAB_SCHEME];

/// Look up the provider for a reference scheme.
///
/// # Errors
///
/// Returns `Error::UnknownProvider` for unsupported schemes.
pub fn provider_for(scheme: &str, notifier: Arc<dyn Notifier>) -> Result<Box<dyn SecretProvider>> {
    match scheme {
        constants::GITLAB_SCHEME => Ok(Box::new(GitLab::new().notifier(notifier))),
        other => Err(Error::UnknownProvider(other.to_string())),
    }
}
