//! Shared utilities for command implementations.

use crate::config::Config;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// Finds all Python files under the given roots, excluding specified patterns.
/// Respects .gitignore files in addition to the default exclusions.
/// A file reachable from several roots is listed once.
pub fn find_python_files(roots: &[PathBuf], exclude: &[String], verbose: bool) -> Vec<PathBuf> {
    let mut seen = FxHashSet::default();
    let mut all_files = Vec::new();
    for root in roots {
        for file in crate::utils::collect_python_files_gitignore(root, exclude, verbose) {
            if seen.insert(file.clone()) {
                all_files.push(file);
            }
        }
    }
    all_files
}

/// Picks the key store location: explicit flag, then config, then the default.
///
/// A relative `env_file` from a config file is taken relative to that file's directory.
pub fn resolve_env_path(flag: Option<&Path>, config: &Config) -> Option<PathBuf> {
    if let Some(flag) = flag {
        return Some(flag.to_path_buf());
    }
    let env_file = config.vurze.env_file.as_ref()?;
    let base = config
        .config_file_path
        .as_deref()
        .and_then(Path::parent)
        .filter(|_| env_file.is_relative());
    Some(base.map_or_else(|| env_file.clone(), |dir| dir.join(env_file)))
}
