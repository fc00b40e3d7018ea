//! Signing key pair generation.
//!
//! Generates Ed25519 key pairs whose private half is sealed with a password.
//!
//! - Private key: PKCS#8 PEM, sealed with the password (age scrypt, armored)
//! - Public key: SubjectPublicKeyInfo PEM (`PUBLIC KEY`), usable on its own

use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use ed25519_dalek::{SigningKey, VerifyingKey};
use pem::{EncodeConfig, LineEnding, Pem};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::error::KeyError;

const PRIVATE_KEY_TAG: &str = "PRIVATE KEY";
const PUBLIC_KEY_TAG: &str = "PUBLIC KEY";

/// Source of the password protecting a new private key.
///
/// `confirm` is `true` when an interactive source should ask twice.
pub trait PassFunc {
    fn password(&mut self, confirm: bool) -> Result<Zeroizing<Vec<u8>>, KeyError>;
}

impl<F> PassFunc for F
where
    F: FnMut(bool) -> Result<Vec<u8>, KeyError>,
{
    fn password(&mut self, confirm: bool) -> Result<Zeroizing<Vec<u8>>, KeyError> {
        (self)(confirm).map(Zeroizing::new)
    }
}

/// Password callback that always returns `password`.
pub fn fixed_password(password: impl Into<Vec<u8>>) -> impl FnMut(bool) -> Result<Vec<u8>, KeyError> {
    let password = Zeroizing::new(password.into());
    move |_| Ok(password.to_vec())
}

/// A freshly generated signing key pair.
///
/// Lives in memory only; its three parts are written to different stores.
pub struct KeyPair {
    password: Zeroizing<String>,
    private_key: String,
    public_key: String,
}

impl KeyPair {
    /// Generate a new key pair protected by the password from `pass`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Password` if the callback fails or yields a
    /// non-UTF-8 password, `KeyError::Encoding` / `KeyError::Encryption` if
    /// the key cannot be encoded or sealed.
    pub fn generate(pass: &mut dyn PassFunc) -> Result<Self, KeyError> {
        let mut raw = pass.password(true)?;
        let password = Zeroizing::new(
            String::from_utf8(std::mem::take(&mut *raw))
                .map_err(|_| KeyError::Password("password is not valid UTF-8".to_string()))?,
        );

        let signing_key = SigningKey::generate(&mut rand::thread_rng());

        let private_der = signing_key
            .to_pkcs8_der()
            .map_err(|e| KeyError::Encoding(e.to_string()))?;
        let private_pem = Zeroizing::new(encode_pem(PRIVATE_KEY_TAG, private_der.as_bytes()));
        let private_key = cipher::seal(private_pem.as_bytes(), password.as_bytes())?;

        let public_der = signing_key
            .verifying_key()
            .to_public_key_der()
            .map_err(|e| KeyError::Encoding(e.to_string()))?;
        let public_key = encode_pem(PUBLIC_KEY_TAG, public_der.as_bytes());

        let pair = Self {
            password,
            private_key,
            public_key,
        };
        debug!(fingerprint = %pair.fingerprint(), "generated key pair");
        Ok(pair)
    }

    /// Password protecting the private key.
    pub fn password(&self) -> &[u8] {
        self.password.as_bytes()
    }

    /// Sealed private key (armored text).
    pub fn private_bytes(&self) -> &[u8] {
        self.private_key.as_bytes()
    }

    /// PEM-encoded public key.
    pub fn public_bytes(&self) -> &[u8] {
        self.public_key.as_bytes()
    }

    pub(crate) fn password_str(&self) -> &str {
        &self.password
    }

    pub(crate) fn private_str(&self) -> &str {
        &self.private_key
    }

    pub(crate) fn public_str(&self) -> &str {
        &self.public_key
    }

    /// SHA-256 hex digest of the PEM public key.
    pub fn fingerprint(&self) -> String {
        format!("{:x}", Sha256::digest(self.public_key.as_bytes()))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Open a sealed private key with its password.
///
/// # Errors
///
/// Returns `KeyError::Decryption` for a wrong password and
/// `KeyError::InvalidKey` if the opened payload is not a PKCS#8 Ed25519 key.
pub fn load_private_key(private_bytes: &[u8], password: &[u8]) -> Result<SigningKey, KeyError> {
    let sealed = std::str::from_utf8(private_bytes)
        .map_err(|_| KeyError::InvalidKey("sealed private key is not text".to_string()))?;
    let opened = cipher::open(sealed, password)?;

    let block = pem::parse(opened.as_slice()).map_err(|e| KeyError::InvalidKey(e.to_string()))?;
    if block.tag() != PRIVATE_KEY_TAG {
        return Err(KeyError::InvalidKey(format!(
            "unexpected PEM block {:?}",
            block.tag()
        )));
    }

    SigningKey::from_pkcs8_der(block.contents()).map_err(|e| KeyError::InvalidKey(e.to_string()))
}

/// Parse a PEM public key.
///
/// # Errors
///
/// Returns `KeyError::InvalidKey` if the input is not an Ed25519
/// `PUBLIC KEY` block.
pub fn load_public_key(public_bytes: &[u8]) -> Result<VerifyingKey, KeyError> {
    let block = pem::parse(public_bytes).map_err(|e| KeyError::InvalidKey(e.to_string()))?;
    if block.tag() != PUBLIC_KEY_TAG {
        return Err(KeyError::InvalidKey(format!(
            "unexpected PEM block {:?}",
            block.tag()
        )));
    }

    VerifyingKey::from_public_key_der(block.contents())
        .map_err(|e| KeyError::InvalidKey(e.to_string()))
}

fn encode_pem(tag: &str, der: &[u8]) -> String {
    pem::encode_config(
        &Pem::new(tag, der.to_vec()),
        EncodeConfig::new().set_line_ending(LineEnding::LF),
    )
}
