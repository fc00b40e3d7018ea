/// Skip a test if live GitLab credentials are not configured.
#[macro_export]
macro_rules! skip_without_gitlab {
    () => {
        if std::env::var("GITLAB_TOKEN").is_err() {
            eprintln!("SKIPPED: GITLAB_TOKEN not set");
            return;
        }
        if std::env::var("KEYRELAY_TEST_GITLAB_PROJECT").is_err() {
            eprintln!(
                "SKIPPED: KEYRELAY_TEST_GITLAB_PROJECT not set (set to a project path with no COSIGN_* variables)"
            );
            return;
        }
    };
}
