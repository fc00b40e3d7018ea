//! Error types.
//!
//! Every failure is returned to the caller with the step and variable it
//! belongs to. Nothing in the crate retries.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::domain::SecretName;

/// Top-level error for provider operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not find {variable:?} in the environment")]
    CredentialMissing { variable: &'static str },

    #[error("could not create GitLab client: {0}")]
    ClientInit(String),

    #[error("generating key pair: {0}")]
    KeyGeneration(#[from] KeyError),

    #[error("could not create \"{variable}\" variable: {source}")]
    RemoteWrite {
        variable: SecretName,
        #[source]
        source: RemoteError,
    },

    #[error("could not retrieve \"{variable}\" variable: {source}")]
    RemoteRead {
        variable: SecretName,
        #[source]
        source: RemoteError,
    },

    #[error("could not write public key to {}: {source}", path.display())]
    LocalPersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid provider reference: {0} (expected <scheme>://<project>)")]
    InvalidReference(String),

    #[error("unsupported provider: {0}")]
    UnknownProvider(String),

    #[error("unknown secret name: {0} (expected COSIGN_PASSWORD, COSIGN_PRIVATE_KEY or COSIGN_PUBLIC_KEY)")]
    UnknownSecret(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key generation and key material errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("reading password: {0}")]
    Password(String),

    #[error("encoding key: {0}")]
    Encoding(String),

    #[error("encrypting private key: {0}")]
    Encryption(String),

    #[error("decrypting private key: {0}")]
    Decryption(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Failures talking to the remote variable store.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// HTTP status attached to the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
