//! `KEY=value` file access.
//!
//! Reads go through `dotenvy` so quoting and `export` prefixes follow the
//! usual `.env` rules. Writes rewrite only the line of the key being set and
//! keep every other line, comments included, verbatim.

use super::KeyStoreError;
use crate::constants::IDENTIFIER_RE;
use std::fs;
use std::path::Path;

/// Reads `key` from the file at `path`.
///
/// Returns `Ok(None)` when the file or the key does not exist. When a key is
/// assigned more than once, the last assignment wins. Lines that do not parse
/// are skipped, as [`set_key`] keeps them.
pub fn get_key(path: &Path, key: &str) -> Result<Option<String>, KeyStoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let entries = dotenvy::from_path_iter(path).map_err(|source| KeyStoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut found = None;
    for entry in entries {
        match entry {
            Ok((name, value)) if name == key => found = Some(value),
            Ok(_) | Err(dotenvy::Error::LineParse(..)) => {}
            Err(source) => {
                return Err(KeyStoreError::Parse {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
    Ok(found)
}

/// Writes `key=value` into the file at `path`, creating the file if needed.
///
/// An existing assignment of `key` is replaced in place (the first one, any
/// later duplicates are dropped); otherwise the entry is appended.
pub fn set_key(path: &Path, key: &str, value: &str) -> Result<(), KeyStoreError> {
    set_keys(path, &[(key, value)])
}

/// Writes several entries with a single rewrite of the file at `path`.
///
/// Every key is validated before the file is touched, so either all entries
/// land or none do.
pub fn set_keys(path: &Path, entries: &[(&str, &str)]) -> Result<(), KeyStoreError> {
    if let Some((key, _)) = entries.iter().find(|(key, _)| !IDENTIFIER_RE().is_match(key)) {
        return Err(KeyStoreError::InvalidKey((*key).to_owned()));
    }

    let existing = if path.exists() {
        fs::read_to_string(path).map_err(|source| KeyStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        String::new()
    };

    let mut lines: Vec<String> = existing.lines().map(str::to_owned).collect();
    for (key, value) in entries {
        let entry = format!("{key}={}", quote_value(value));
        let mut replaced = false;
        lines.retain_mut(|line| {
            if assigned_key(line) != Some(*key) {
                return true;
            }
            if replaced {
                return false;
            }
            line.clone_from(&entry);
            replaced = true;
            true
        });
        if !replaced {
            lines.push(entry);
        }
    }

    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).map_err(|source| KeyStoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Key assigned on `line`, if the line is an assignment.
fn assigned_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (name, _) = trimmed.split_once('=')?;
    Some(name.trim())
}

/// Leaves plain values bare and double-quotes anything else.
fn quote_value(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '+'));
    if plain {
        return value.to_owned();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('$', "\\$");
    format!("\"{escaped}\"")
}
