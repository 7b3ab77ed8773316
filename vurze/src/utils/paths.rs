//! Path utilities for vurze.
//!
//! Display normalization and Python file discovery with gitignore support.

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;
use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use vurze::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\pkg\\signed.py")), "pkg/signed.py");
/// assert_eq!(normalize_display_path(Path::new("./src/main.py")), "src/main.py");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| {
        if let Some(suffix) = exclude.strip_prefix('*') {
            exclude.starts_with("*.") && name.ends_with(suffix)
        } else {
            name == exclude
        }
    })
}

/// Collects Python files below `root`.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude and the
/// global gitignore in addition to the default exclusions (`.venv`,
/// `__pycache__`, ...). A `root` that is itself a file is returned as-is,
/// whatever its extension.
#[must_use]
pub fn collect_python_files_gitignore(
    root: &Path,
    exclude: &[String],
    verbose: bool,
) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    let root_for_filter = root.to_path_buf();

    // filter_entry prunes excluded directories before descending into them
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !is_excluded(name, &excludes))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && path.extension().is_some_and(|ext| ext == "py")
                {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => {
                if verbose {
                    eprintln!("Walk error: {e}");
                }
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_excluded() {
        let excludes = vec!["build".to_owned(), "*.egg-info".to_owned()];
        assert!(is_excluded("build", &excludes));
        assert!(is_excluded("pkg.egg-info", &excludes));
        assert!(!is_excluded("builder", &excludes));
    }

    #[test]
    fn test_collect_skips_default_excludes() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::create_dir_all(root.join(".venv/lib")).unwrap();
        fs::create_dir_all(root.join("generated")).unwrap();
        fs::write(root.join("pkg/signed.py"), "x = 1\n").unwrap();
        fs::write(root.join("pkg/notes.txt"), "not python").unwrap();
        fs::write(root.join(".venv/lib/site.py"), "x = 1\n").unwrap();
        fs::write(root.join("generated/out.py"), "x = 1\n").unwrap();

        let files = collect_python_files_gitignore(root, &["generated".to_owned()], false);
        assert_eq!(files, vec![root.join("pkg/signed.py")]);
    }

    #[test]
    fn test_collect_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("script");
        fs::write(&file, "x = 1\n").unwrap();
        assert_eq!(collect_python_files_gitignore(&file, &[], false), vec![file]);
    }
}
