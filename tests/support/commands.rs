//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a keyrelay command with a clean environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test directory
    /// - GitLab credentials and password variables removed
    /// - Colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keyrelay").expect("failed to find keyrelay binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("GITLAB_TOKEN");
        cmd.env_remove("GITLAB_HOST");
        cmd.env_remove("COSIGN_PASSWORD");
        cmd.env_remove("KEYRELAY_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `keyrelay generate-key-pair`.
    pub fn generate(&self, reference: &str) -> Output {
        self.cmd()
            .args(["generate-key-pair", reference])
            .write_stdin("")
            .output()
            .expect("failed to run keyrelay generate-key-pair")
    }

    /// Shortcut for `keyrelay get-secret`.
    pub fn get_secret(&self, reference: &str, name: &str) -> Output {
        self.cmd()
            .args(["get-secret", reference, name])
            .output()
            .expect("failed to run keyrelay get-secret")
    }
}
