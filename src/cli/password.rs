//! Password sources for new private keys.
//!
//! In order of precedence:
//! 1. `COSIGN_PASSWORD` environment variable (may be empty)
//! 2. Interactive prompt when stdin is a terminal
//! 3. First line of stdin

use std::io::BufRead;

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::KeyError;

/// Where the password comes from.
pub enum PasswordSource {
    Fixed(Zeroizing<String>),
    Prompt,
    Stdin,
}

impl PasswordSource {
    /// Pick a source from the environment and the terminal state.
    pub fn detect() -> Self {
        if let Ok(password) = std::env::var(constants::PASSWORD_VAR) {
            return Self::Fixed(Zeroizing::new(password));
        }
        if atty::is(atty::Stream::Stdin) {
            Self::Prompt
        } else {
            Self::Stdin
        }
    }

    /// Read the password, asking twice when prompting with `confirm`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Password` on I/O failure or when the two entries
    /// differ.
    pub fn read(&self, confirm: bool) -> Result<Vec<u8>, KeyError> {
        match self {
            Self::Fixed(password) => Ok(password.as_bytes().to_vec()),
            Self::Prompt => prompt(confirm),
            Self::Stdin => read_line(&mut std::io::stdin().lock()),
        }
    }
}

fn prompt(confirm: bool) -> Result<Vec<u8>, KeyError> {
    let first = ask("Enter password for private key")?;
    if confirm {
        let second = ask("Enter password for private key again")?;
        if *first != *second {
            return Err(KeyError::Password("passwords do not match".to_string()));
        }
    }
    Ok(first.as_bytes().to_vec())
}

fn ask(prompt: &str) -> Result<Zeroizing<String>, KeyError> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| KeyError::Password(e.to_string()))
}

fn read_line(reader: &mut impl BufRead) -> Result<Vec<u8>, KeyError> {
    let mut line = Zeroizing::new(String::new());
    reader
        .read_line(&mut line)
        .map_err(|e| KeyError::Password(e.to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).as_bytes().to_vec())
}
