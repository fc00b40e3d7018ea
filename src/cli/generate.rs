//! Generate-key-pair command.

use std::sync::Arc;

use tracing::debug;

use crate::cli::output::Terminal;
use crate::cli::password::PasswordSource;
use crate::core::domain::ProviderRef;
use crate::core::provider::provider_for;
use crate::error::Result;

/// Provision a new key pair into the scope named by `reference`.
pub fn execute(reference: &str) -> Result<()> {
    let reference: ProviderRef = reference.parse()?;
    let provider = provider_for(reference.scheme(), Arc::new(Terminal))?;

    debug!(reference = %reference, "provisioning key pair");

    let source = PasswordSource::detect();
    let mut pass = |confirm: bool| source.read(confirm);
    provider.put_secret(reference.scope(), &mut pass)
}
