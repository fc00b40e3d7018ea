//! keyrelay - Provision signing key pairs into CI platform secret stores.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyrelay::cli::output;
use keyrelay::cli::{execute, Cli};
use keyrelay::core::constants;
use keyrelay::error::Error;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_VAR).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keyrelay=debug")
        } else {
            EnvFilter::new("keyrelay=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::CredentialMissing { .. } => {
                Some("set GITLAB_TOKEN to an access token with the api scope")
            }
            Error::ClientInit(_) => Some("check GITLAB_HOST (e.g., https://gitlab.example.com)"),
            Error::InvalidReference(_) => Some("use a reference like gitlab://group/project"),
            Error::UnknownProvider(_) => Some("supported providers: gitlab"),
            Error::RemoteRead { .. } => {
                Some("if you are using a self-hosted GitLab, set GITLAB_HOST to your server URL")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
