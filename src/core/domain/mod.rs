//! Domain types.

mod reference;
mod secret;

pub use reference::ProviderRef;
pub use secret::{SecretName, VariablePolicy};
