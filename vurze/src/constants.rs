use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Namespace whose decorators are stripped when nothing else is configured.
pub const DEFAULT_NAMESPACE: &str = "vurze";

/// Name of the dedicated configuration file.
pub const CONFIG_FILENAME: &str = ".vurze.toml";

/// Name of the Python project file that may carry a `[tool.vurze]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Default key store file, resolved against the current directory.
pub const ENV_FILENAME: &str = ".env";

/// Key store entry holding the private key (hex).
pub const PRIVATE_KEY_VAR: &str = "VURZE_PRIVATE_KEY";

/// Key store entry holding the public key (hex).
pub const PUBLIC_KEY_VAR: &str = "VURZE_PUBLIC_KEY";

/// Regex matching a plain identifier, used for namespaces and `.env` keys.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex"))
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("__pycache__");
        s.insert(".git");
        s.insert(".pytest_cache");
        s.insert(".mypy_cache");
        s.insert(".ruff_cache");
        s.insert(".tox");
        s.insert("build");
        s.insert("dist");
        s.insert("*.egg-info");
        s.insert("node_modules");
        s.insert("venv");
        s.insert(".venv");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_identifier_re as IDENTIFIER_RE;
