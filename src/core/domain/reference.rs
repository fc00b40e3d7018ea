//! Provider references.
//!
//! A reference names a provider and the scope inside it, e.g.
//! `gitlab://group/project` or `gitlab://1234`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Parsed `<scheme>://<scope>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRef {
    scheme: String,
    scope: String,
}

impl ProviderRef {
    /// Provider scheme (e.g. `gitlab`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Platform-defined scope (project id or path).
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl FromStr for ProviderRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, scope) = s
            .split_once("://")
            .ok_or_else(|| Error::InvalidReference(s.to_string()))?;

        if scheme.is_empty() || scope.is_empty() {
            return Err(Error::InvalidReference(s.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            scope: scope.to_string(),
        })
    }
}

impl fmt::Display for ProviderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.scope)
    }
}
