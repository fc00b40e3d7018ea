//! keyrelay - Provision signing key pairs into CI platform secret stores.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── generate      # Provision a key pair into a provider
//! │   ├── get           # Read one variable back
//! │   ├── password      # Password sources (env, prompt, stdin)
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # Private key encryption (age scrypt)
//!     ├── config        # Credentials from the environment
//!     ├── domain/       # Secret names and provider references
//!     ├── keys          # Ed25519 key pair generation
//!     ├── notify        # Operator notification sinks
//!     └── provider/     # SecretProvider trait and backends
//!         └── gitlab/   # GitLab project variables
//! ```
//!
//! # Features
//!
//! - Password-sealed Ed25519 signing keys
//! - GitLab.com and self-hosted GitLab via `GITLAB_HOST`
//! - Strictly ordered, non-retrying provisioning with typed errors
//! - Pluggable variable store for testing and new platforms

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::domain::{ProviderRef, SecretName};
pub use crate::core::keys::{KeyPair, PassFunc};
pub use crate::core::provider::{provider_for, SecretProvider};
pub use crate::error::{Error, Result};
