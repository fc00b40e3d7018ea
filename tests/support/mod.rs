//! Test support utilities for keyrelay integration tests.
//!
//! Provides isolated CLI environments, an in-memory variable store and a
//! loopback HTTP server standing in for GitLab.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod memory;
pub mod server;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use memory::*;
#[allow(unused_imports)]
pub use server::*;

use tempfile::TempDir;

/// Test environment with an isolated working directory.
///
/// No process-global state is mutated: child processes use `.current_dir()`
/// and explicit environment variables, so tests can run in parallel.
pub struct Test {
    /// Temporary working directory (where `cosign.pub` lands)
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Path of the local public key copy.
    pub fn public_key_path(&self) -> std::path::PathBuf {
        self.dir.path().join("cosign.pub")
    }
}
