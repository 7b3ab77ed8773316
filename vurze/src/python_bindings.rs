//! Python bindings for vurze.
//!
//! Exposes the stripper, the key store lookups and the CLI to Python.

use crate::keystore::{self, KeyStoreError};
use crate::strip::{AnnotationStripper, StripError};
use pyo3::exceptions::{
    PyFileNotFoundError, PyOSError, PyRuntimeError, PySyntaxError, PyValueError,
};
use pyo3::types::PyModuleMethods;
use pyo3::{pyfunction, types::PyModule, wrap_pyfunction, Bound, PyErr, PyResult, Python};
use std::io::ErrorKind;
use std::path::PathBuf;

fn strip_error(err: StripError) -> PyErr {
    match err {
        StripError::Syntax { .. } => PySyntaxError::new_err(err.to_string()),
        StripError::InvalidNamespace(_) => PyValueError::new_err(err.to_string()),
    }
}

fn keystore_error(err: KeyStoreError) -> PyErr {
    match err {
        KeyStoreError::EnvFileMissing { .. } => PyFileNotFoundError::new_err(err.to_string()),
        KeyStoreError::Io { .. } => PyOSError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn stripper(namespace: &str) -> PyResult<AnnotationStripper> {
    AnnotationStripper::new(namespace).map_err(strip_error)
}

/// Strips namespace decorators from Python source text.
///
/// Returns `(modified_source, found)`.
#[pyfunction]
#[pyo3(signature = (source, namespace = "vurze"))]
fn strip_source(py: Python, source: &str, namespace: &str) -> PyResult<(String, bool)> {
    let stripper = stripper(namespace)?;
    let result = py
        .detach(|| stripper.strip(source))
        .map_err(strip_error)?;
    Ok((result.text, result.found))
}

/// Reads a Python file and strips namespace decorators from it.
///
/// The file is not modified. Returns `(modified_source, found)`.
///
/// # Examples
/// ```python
/// import vurze
/// code, found = vurze.remove_decorators("signed.py")
/// ```
#[pyfunction]
#[pyo3(signature = (file_path, namespace = "vurze"))]
fn remove_decorators(py: Python, file_path: PathBuf, namespace: &str) -> PyResult<(String, bool)> {
    let stripper = stripper(namespace)?;
    let result = py.detach(|| crate::commands::strip_file(&file_path, &stripper, false));
    match result {
        Ok(result) => Ok((result.text, result.found)),
        Err(e) => Err(file_error(&e)),
    }
}

fn file_error(err: &anyhow::Error) -> PyErr {
    if let Some(strip) = err.downcast_ref::<StripError>() {
        return strip_error(strip.clone());
    }
    let message = format!("{err:#}");
    match err.downcast_ref::<std::io::Error>() {
        Some(io) if io.kind() == ErrorKind::NotFound => PyFileNotFoundError::new_err(message),
        _ => PyOSError::new_err(message),
    }
}

/// Returns the stored public key.
#[pyfunction]
#[pyo3(signature = (env_path = None))]
fn get_public_key(env_path: Option<PathBuf>) -> PyResult<String> {
    keystore::get_public_key(env_path.as_deref()).map_err(keystore_error)
}

/// Returns the stored private key.
#[pyfunction]
#[pyo3(signature = (env_path = None))]
fn get_private_key(env_path: Option<PathBuf>) -> PyResult<String> {
    keystore::get_private_key(env_path.as_deref()).map_err(keystore_error)
}

/// Stores an externally generated key pair and returns `(private_hex, public_hex)`.
#[pyfunction]
#[pyo3(signature = (private_key_hex, public_key_hex, env_path = None))]
fn store_keypair(
    private_key_hex: &str,
    public_key_hex: &str,
    env_path: Option<PathBuf>,
) -> PyResult<(String, String)> {
    let provider = keystore::StaticKeyPair::new(private_key_hex, public_key_hex);
    let (_, pair) =
        keystore::setup_keypair(env_path.as_deref(), &provider).map_err(keystore_error)?;
    Ok((pair.private_key_hex, pair.public_key_hex))
}

/// Python-callable wrapper for the CLI.
///
/// Releases the GIL while running.
#[pyfunction]
fn run(py: Python, args: Vec<String>) -> PyResult<i32> {
    py.detach(|| {
        crate::entry_point::run_with_args(args)
            .map_err(|e| PyRuntimeError::new_err(format!("{e}")))
    })
}

/// Registers all Python functions with the module.
pub(crate) fn register_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(strip_source, m)?)?;
    m.add_function(wrap_pyfunction!(remove_decorators, m)?)?;
    m.add_function(wrap_pyfunction!(get_public_key, m)?)?;
    m.add_function(wrap_pyfunction!(get_private_key, m)?)?;
    m.add_function(wrap_pyfunction!(store_keypair, m)?)?;
    m.add_function(wrap_pyfunction!(run, m)?)?;
    Ok(())
}
