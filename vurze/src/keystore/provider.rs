//! Key pair provider seam.
//!
//! Key generation lives outside this crate. Anything that can hand over a
//! hex-encoded private/public pair implements [`KeyPairProvider`].

use super::KeyStoreError;
use serde::Serialize;

/// A hex-encoded key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPair {
    /// Private key, hex.
    pub private_key_hex: String,
    /// Public key, hex.
    pub public_key_hex: String,
}

/// Source of key pairs.
pub trait KeyPairProvider {
    /// Produces a key pair.
    fn generate(&self) -> Result<KeyPair, KeyStoreError>;
}

impl<F> KeyPairProvider for F
where
    F: Fn() -> Result<KeyPair, KeyStoreError>,
{
    fn generate(&self) -> Result<KeyPair, KeyStoreError> {
        self()
    }
}

/// Provider returning a pair generated elsewhere, e.g. passed on the command line.
#[derive(Debug, Clone)]
pub struct StaticKeyPair {
    private_key_hex: String,
    public_key_hex: String,
}

impl StaticKeyPair {
    /// Wraps an existing pair. Validation happens in [`KeyPairProvider::generate`].
    pub fn new(private_key_hex: impl Into<String>, public_key_hex: impl Into<String>) -> Self {
        Self {
            private_key_hex: private_key_hex.into(),
            public_key_hex: public_key_hex.into(),
        }
    }
}

impl KeyPairProvider for StaticKeyPair {
    fn generate(&self) -> Result<KeyPair, KeyStoreError> {
        validate_hex("private", &self.private_key_hex)?;
        validate_hex("public", &self.public_key_hex)?;
        Ok(KeyPair {
            private_key_hex: self.private_key_hex.to_ascii_lowercase(),
            public_key_hex: self.public_key_hex.to_ascii_lowercase(),
        })
    }
}

fn validate_hex(which: &'static str, value: &str) -> Result<(), KeyStoreError> {
    if value.is_empty() {
        return Err(KeyStoreError::EmptyKey(which));
    }
    hex::decode(value)
        .map(|_| ())
        .map_err(|source| KeyStoreError::InvalidHex { which, source })
}
