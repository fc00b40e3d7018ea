//! Get-secret command.

use std::sync::Arc;

use crate::core::domain::{ProviderRef, SecretName};
use crate::core::notify::Silent;
use crate::core::provider::provider_for;
use crate::error::Result;

/// Print the value of `name` under `reference`.
pub fn execute(reference: &str, name: &str) -> Result<()> {
    let reference: ProviderRef = reference.parse()?;
    let name: SecretName = name.parse()?;
    let provider = provider_for(reference.scheme(), Arc::new(Silent))?;

    let value = provider.get_secret(reference.scope(), name)?;
    println!("{}", value);
    Ok(())
}
