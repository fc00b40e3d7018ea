//! Passphrase encryption backend.
//!
//! Encrypts with an age scrypt recipient and ASCII armor encoding.

use std::io::{Read, Write};

use age::secrecy::SecretString;
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::error::KeyError;

/// age scrypt backend keyed by a password.
pub struct Passphrase;

impl Passphrase {
    fn secret(password: &[u8]) -> Result<SecretString, KeyError> {
        let text = std::str::from_utf8(password)
            .map_err(|_| KeyError::Password("password is not valid UTF-8".to_string()))?;
        Ok(SecretString::from(text.to_string()))
    }
}

impl Cipher for Passphrase {
    type Key = [u8];

    fn name(&self) -> &'static str {
        "age-scrypt"
    }

    fn encrypt(&self, plaintext: &[u8], password: &[u8]) -> Result<String, KeyError> {
        trace!(plaintext_len = plaintext.len(), "sealing with passphrase");

        let encryptor = age::Encryptor::with_user_passphrase(Self::secret(password)?);

        let mut encrypted = Vec::new();
        let armor = age::armor::ArmoredWriter::wrap_output(
            &mut encrypted,
            age::armor::Format::AsciiArmor,
        )
        .map_err(|e| KeyError::Encryption(format!("{}", e)))?;
        let mut writer = encryptor
            .wrap_output(armor)
            .map_err(|e| KeyError::Encryption(format!("{}", e)))?;

        writer
            .write_all(plaintext)
            .map_err(|e| KeyError::Encryption(format!("{}", e)))?;
        let armored = writer
            .finish()
            .map_err(|e| KeyError::Encryption(format!("{}", e)))?;
        armored
            .finish()
            .map_err(|e| KeyError::Encryption(format!("armor: {}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "sealed");

        String::from_utf8(encrypted).map_err(|e| KeyError::Encryption(format!("UTF-8 error: {}", e)))
    }

    fn decrypt(&self, ciphertext: &str, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, KeyError> {
        trace!(ciphertext_len = ciphertext.len(), "opening with passphrase");

        let reader = age::armor::ArmoredReader::new(ciphertext.as_bytes());
        let decryptor =
            age::Decryptor::new(reader).map_err(|e| KeyError::Decryption(format!("{}", e)))?;

        let identity = age::scrypt::Identity::new(Self::secret(password)?);
        let mut reader = decryptor
            .decrypt(std::iter::once(&identity as &dyn age::Identity))
            .map_err(|e| KeyError::Decryption(format!("{}", e)))?;

        let mut decrypted = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| KeyError::Decryption(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "opened");

        Ok(decrypted)
    }
}
