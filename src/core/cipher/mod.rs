//! Private key encryption.
//!
//! Provides the encryption abstraction used to protect private key material
//! at rest. The default backend is an age scrypt recipient: the key is
//! sealed with the user's password and ASCII-armored so it can be stored in
//! a text-only CI variable.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use zeroize::Zeroizing;

use crate::error::KeyError;

mod passphrase;

pub use passphrase::Passphrase;

/// Symmetric encryption backend for key material.
pub trait Cipher {
    /// Secret the ciphertext is bound to.
    type Key: ?Sized;

    /// Encrypt plaintext.
    ///
    /// # Returns
    ///
    /// Text ciphertext (format depends on the backend).
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encryption` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], key: &Self::Key) -> Result<String, KeyError>;

    /// Decrypt ciphertext produced by `encrypt`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decryption` if the key is wrong or the ciphertext
    /// is malformed.
    fn decrypt(&self, ciphertext: &str, key: &Self::Key) -> Result<Zeroizing<Vec<u8>>, KeyError>;

    /// Backend name for display.
    #[allow(dead_code)]
    fn name(&self) -> &'static str;
}

/// Seal plaintext with a password using the default backend.
///
/// This is a convenience wrapper around `Passphrase::encrypt`.
pub fn seal(plaintext: &[u8], password: &[u8]) -> Result<String, KeyError> {
    Passphrase.encrypt(plaintext, password)
}

/// Open a password-sealed ciphertext using the default backend.
///
/// This is a convenience wrapper around `Passphrase::decrypt`.
pub fn open(ciphertext: &str, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    Passphrase.decrypt(ciphertext, password)
}
