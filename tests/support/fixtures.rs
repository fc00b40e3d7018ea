//! Test fixtures and constants.

/// Token handed to fake GitLab servers.
pub const TEST_TOKEN: &str = "glpat-test-token";

/// Project path used across tests.
pub const TEST_PROJECT: &str = "group/project";

/// Reference for `TEST_PROJECT`.
pub const TEST_REFERENCE: &str = "gitlab://group/project";

/// Password for generated keys.
pub const TEST_PASSWORD: &str = "correct horse battery staple";
