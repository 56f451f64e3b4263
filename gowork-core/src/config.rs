//! Configuration for gowork

use crate::matching::MatchMode;
use crate::GoworkError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# gowork configuration

[workspace]
# Root of the tree; projects live under <root>/src/<distributor>/<author>/<project>.
# GOPATH or --root take precedence over this value.
# root = "/home/me/go"

[search]
# How search terms are compared: "substring" or "exact"
mode = "substring"
"#;

/// gowork configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: MatchMode,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| GoworkError::ConfigParse(e.to_string()))
    }

    /// Pick the root path: an explicit override wins over the config file
    pub fn resolve_root(&self, override_root: Option<PathBuf>) -> crate::Result<PathBuf> {
        override_root
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.workspace.root.clone())
            .ok_or(GoworkError::MissingRoot)
    }
}
