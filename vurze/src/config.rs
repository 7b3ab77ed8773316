use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, DEFAULT_NAMESPACE, PYPROJECT_FILENAME};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[vurze]` section.
    pub vurze: VurzeConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for vurze.
pub struct VurzeConfig {
    /// Namespace whose decorators are stripped.
    pub namespace: Option<String>,
    /// Additional folders to skip when walking directories.
    pub exclude_folders: Option<Vec<String>>,
    /// Location of the key store, relative to the directory of the config file.
    pub env_file: Option<PathBuf>,
}

impl VurzeConfig {
    /// Configured namespace, or the default one.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    vurze: VurzeConfig,
}

impl Config {
    /// Loads configuration from default locations (.vurze.toml or pyproject.toml in
    /// the current dir or one of its parents).
    #[must_use]
    pub fn load() -> Self {
        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_path(&cwd),
            Err(_) => Self::load_from_path(Path::new(".")),
        }
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let vurze_toml = current.join(CONFIG_FILENAME);
            if vurze_toml.exists() {
                if let Ok(content) = fs::read_to_string(&vurze_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(vurze_toml);
                        return config;
                    }
                }
            }

            // pyproject.toml only counts when it carries a [tool.vurze] table
            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        return Config {
                            vurze: pyproject.tool.vurze,
                            config_file_path: Some(pyproject_toml),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
