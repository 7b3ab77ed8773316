//! Core library for vurze.
//!
//! Strips the decorators of a namespace (by default `vurze`) from Python
//! source, and stores the vurze signing key pair in a `.env` file.

#![allow(clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Decorator shapes and namespace ownership rules.
pub mod annotation;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module defining the entry point logic shared by every binary.
pub mod entry_point;

/// `.env` key store and key pair provider seam.
pub mod keystore;

/// Module for CLI output formatting with colored text and progress bars.
pub mod output;

/// The annotation stripper.
pub mod strip;

/// Module containing utility functions.
pub mod utils;

/// Module containing the definition visitor.
pub mod visitor;

pub use strip::{strip_annotations, AnnotationStripper, StripError, StripResult};

/// Python bindings module (PyO3 integration).
#[cfg(feature = "python-bindings")]
mod python_bindings;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Python module definition for `vurze`.
///
/// The actual implementation is in the `python_bindings` module.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn vurze(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python_bindings::register_functions(m)
}
