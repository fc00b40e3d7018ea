//! Command-line interface.

pub mod completions;
pub mod generate;
pub mod get;
pub mod output;
pub mod password;

use clap::{Parser, Subcommand};

/// keyrelay - Provision signing key pairs into CI platform secret stores.
#[derive(Parser)]
#[command(
    name = "keyrelay",
    about = "Provision signing key pairs into CI platform secret stores",
    version
)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a key pair and store it in a provider's variables
    #[command(name = "generate-key-pair")]
    GenerateKeyPair {
        /// Provider reference (e.g., gitlab://group/project)
        reference: String,
    },

    /// Print one provisioned variable
    #[command(name = "get-secret")]
    GetSecret {
        /// Provider reference (e.g., gitlab://group/project)
        reference: String,
        /// COSIGN_PASSWORD, COSIGN_PRIVATE_KEY or COSIGN_PUBLIC_KEY
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        GenerateKeyPair { reference } => generate::execute(&reference),
        GetSecret { reference, name } => get::execute(&reference, &name),
        Completions { shell } => completions::execute(shell),
    }
}
