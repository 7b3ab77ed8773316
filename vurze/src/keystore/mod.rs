//! Storage of the vurze key pair in a `.env` file.
//!
//! The pair lives under [`PRIVATE_KEY_VAR`] and [`PUBLIC_KEY_VAR`]. Reading
//! before setup is a recoverable "not configured" condition: a missing file
//! or key is reported as an error naming the file and the key.

mod env_file;
mod provider;

pub use env_file::{get_key, set_key, set_keys};
pub use provider::{KeyPair, KeyPairProvider, StaticKeyPair};

use crate::constants::{ENV_FILENAME, PRIVATE_KEY_VAR, PUBLIC_KEY_VAR};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Errors raised by the key store.
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    /// No key file at the expected location.
    #[error("No .env file found at {}. Run `vurze keys import` first.", path.display())]
    EnvFileMissing {
        /// Expected location.
        path: PathBuf,
    },
    /// The key file exists but lacks the key.
    #[error("{key} not found in {}. Run `vurze keys import` first.", path.display())]
    KeyMissing {
        /// Missing entry name.
        key: String,
        /// File that was searched.
        path: PathBuf,
    },
    /// Not a valid `.env` key name.
    #[error("invalid key name `{0}`")]
    InvalidKey(String),
    /// A provider returned an empty key.
    #[error("{0} key is empty")]
    EmptyKey(&'static str),
    /// A provider returned a key that is not hex.
    #[error("{which} key is not valid hex: {source}")]
    InvalidHex {
        /// `"private"` or `"public"`.
        which: &'static str,
        /// Decoder error.
        source: hex::FromHexError,
    },
    /// The key file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        source: dotenvy::Error,
    },
    /// Reading or writing the key file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Resolves the key file location, defaulting to `.env` in the current directory.
pub fn resolve_env_path(env_path: Option<&Path>) -> Result<PathBuf, KeyStoreError> {
    match env_path {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir()
            .map(|cwd| cwd.join(ENV_FILENAME))
            .map_err(|source| KeyStoreError::Io {
                path: PathBuf::from(ENV_FILENAME),
                source,
            }),
    }
}

/// Obtains a pair from `provider` and stores it, creating the file if needed.
pub fn setup_keypair(
    env_path: Option<&Path>,
    provider: &dyn KeyPairProvider,
) -> Result<(PathBuf, KeyPair), KeyStoreError> {
    let path = resolve_env_path(env_path)?;
    let pair = provider.generate()?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| KeyStoreError::Io {
            path: path.clone(),
            source,
        })?;

    set_keys(
        &path,
        &[
            (PRIVATE_KEY_VAR, pair.private_key_hex.as_str()),
            (PUBLIC_KEY_VAR, pair.public_key_hex.as_str()),
        ],
    )?;
    Ok((path, pair))
}

/// Reads the stored public key.
pub fn get_public_key(env_path: Option<&Path>) -> Result<String, KeyStoreError> {
    read_required(env_path, PUBLIC_KEY_VAR)
}

/// Reads the stored private key.
pub fn get_private_key(env_path: Option<&Path>) -> Result<String, KeyStoreError> {
    read_required(env_path, PRIVATE_KEY_VAR)
}

fn read_required(env_path: Option<&Path>, key: &str) -> Result<String, KeyStoreError> {
    let path = resolve_env_path(env_path)?;
    if !path.exists() {
        return Err(KeyStoreError::EnvFileMissing { path });
    }
    get_key(&path, key)?.ok_or_else(|| KeyStoreError::KeyMissing {
        key: key.to_owned(),
        path,
    })
}
