//! Constants used throughout keyrelay.
//!
//! Centralizes environment variable names, endpoints and file names.

/// Environment variable holding the GitLab access token (required).
pub const GITLAB_TOKEN_VAR: &str = "GITLAB_TOKEN";

/// Environment variable overriding the GitLab host (optional).
pub const GITLAB_HOST_VAR: &str = "GITLAB_HOST";

/// GitLab endpoint used when no host override is set.
pub const GITLAB_DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4/";

/// REST API prefix appended to host overrides.
pub const GITLAB_API_PATH: &str = "api/v4/";

/// GitLab variable type for environment-style variables.
pub const ENV_VARIABLE_TYPE: &str = "env_var";

/// Environment scope matching every environment.
pub const ALL_ENVIRONMENTS: &str = "*";

/// Provider reference scheme for GitLab (`gitlab://group/project`).
pub const GITLAB_SCHEME: &str = "gitlab";

/// Local copy of the public key, relative to the working directory.
pub const PUBLIC_KEY_FILE: &str = "cosign.pub";

/// Permission mode for the local public key file.
pub const PUBLIC_KEY_FILE_MODE: u32 = 0o600;

/// Environment variable the CLI reads the key password from.
pub const PASSWORD_VAR: &str = "COSIGN_PASSWORD";

/// Log filter environment variable.
pub const LOG_VAR: &str = "KEYRELAY_LOG";

/// Default timeout for a single GitLab request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
