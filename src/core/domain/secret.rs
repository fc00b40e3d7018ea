//! Well-known secret names.
//!
//! The three variables written during provisioning, each with a fixed
//! sensitivity policy.

use std::fmt;
use std::str::FromStr;

use crate::core::constants;
use crate::error::Error;

/// A variable written by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretName {
    /// `COSIGN_PASSWORD`
    CosignPassword,
    /// `COSIGN_PRIVATE_KEY`
    CosignPrivateKey,
    /// `COSIGN_PUBLIC_KEY`
    CosignPublicKey,
}

/// Flags a variable is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariablePolicy {
    pub masked: bool,
    pub protected: bool,
    /// `None` leaves the platform default in place.
    pub environment_scope: Option<&'static str>,
}

impl SecretName {
    /// Provisioning order.
    pub const ALL: [SecretName; 3] = [
        SecretName::CosignPassword,
        SecretName::CosignPrivateKey,
        SecretName::CosignPublicKey,
    ];

    /// Variable key on the remote platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CosignPassword => "COSIGN_PASSWORD",
            Self::CosignPrivateKey => "COSIGN_PRIVATE_KEY",
            Self::CosignPublicKey => "COSIGN_PUBLIC_KEY",
        }
    }

    /// Creation flags for this variable.
    ///
    /// Masking is off for all three: masked GitLab variables must be a single
    /// line from a restricted charset, which armored key material is not.
    pub fn policy(&self) -> VariablePolicy {
        match self {
            Self::CosignPassword => VariablePolicy {
                masked: false,
                protected: false,
                environment_scope: Some(constants::ALL_ENVIRONMENTS),
            },
            Self::CosignPrivateKey | Self::CosignPublicKey => VariablePolicy {
                masked: false,
                protected: false,
                environment_scope: None,
            },
        }
    }

    /// Human-readable label used in notices.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CosignPassword => "Password",
            Self::CosignPrivateKey => "Private key",
            Self::CosignPublicKey => "Public key",
        }
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::UnknownSecret(s.to_string()))
    }
}
