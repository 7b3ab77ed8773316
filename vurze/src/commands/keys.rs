//! Key store commands.

use crate::keystore::{self, KeyStoreError, StaticKeyPair};
use crate::output;
use crate::utils::normalize_display_path;

use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Which stored keys `keys show` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelection {
    /// Public key only
    Public,
    /// Private key only
    Private,
    /// Both, labelled
    Both,
}

/// Prints the stored keys.
///
/// A missing file or key is reported and yields exit code 1.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_show<W: Write>(
    env_path: Option<&Path>,
    selection: KeySelection,
    mut writer: W,
) -> Result<i32> {
    let shown = match selection {
        KeySelection::Public => keystore::get_public_key(env_path).map(|key| vec![key]),
        KeySelection::Private => keystore::get_private_key(env_path).map(|key| vec![key]),
        KeySelection::Both => keystore::get_public_key(env_path).and_then(|public| {
            let private = keystore::get_private_key(env_path)?;
            Ok(vec![format!("public:  {public}"), format!("private: {private}")])
        }),
    };

    match shown {
        Ok(lines) => {
            for line in lines {
                writeln!(writer, "{line}")?;
            }
            Ok(0)
        }
        Err(e) => report_error(&mut writer, &e),
    }
}

/// Stores an externally generated key pair.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_import<W: Write>(
    env_path: Option<&Path>,
    private_key: &str,
    public_key: &str,
    mut writer: W,
) -> Result<i32> {
    let provider = StaticKeyPair::new(private_key, public_key);
    match keystore::setup_keypair(env_path, &provider) {
        Ok((path, _)) => {
            output::print_ok(
                &mut writer,
                &format!("Vurze keypair saved to {}", normalize_display_path(&path)),
            )?;
            output::print_warning(
                &mut writer,
                "Keep your private key secure and never commit it to version control!",
            )?;
            Ok(0)
        }
        Err(e) => report_error(&mut writer, &e),
    }
}

fn report_error<W: Write>(writer: &mut W, error: &KeyStoreError) -> Result<i32> {
    output::print_error(writer, &error.to_string())?;
    Ok(1)
}
