//! Error types for gowork operations

use serde::Serialize;
use std::path::PathBuf;

/// Structured error payload for machine-readable output.
///
/// Printed by the CLI in `--json` mode instead of the plain message.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: String,
}

impl ErrorEnvelope {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: hint.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GoworkError {
    #[error("open {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("open {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Author could not be found")]
    AuthorNotFound,

    #[error("Project could not be found: {0}")]
    ProjectNotFound(String),

    #[error("Search term {term:?} is ambiguous: {}", .candidates.join(", "))]
    Ambiguous {
        term: String,
        candidates: Vec<String>,
    },

    #[error("Malformed {kind} identifier: {value:?}")]
    MalformedIdentifier { kind: &'static str, value: String },

    #[error("No root path configured. Set GOPATH or pass --root.")]
    MissingRoot,

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GoworkError {
    /// Stable short code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::RootUnreadable { .. } => "root_unreadable",
            Self::DirectoryUnreadable { .. } => "directory_unreadable",
            Self::AuthorNotFound => "author_not_found",
            Self::ProjectNotFound(_) => "project_not_found",
            Self::Ambiguous { .. } => "ambiguous",
            Self::MalformedIdentifier { .. } => "malformed_identifier",
            Self::MissingRoot => "missing_root",
            Self::ConfigParse(_) => "config_parse",
            Self::Io(_) => "io",
        }
    }

    /// Convert into the envelope used for JSON output
    pub fn envelope(&self) -> ErrorEnvelope {
        let hint = match self {
            Self::RootUnreadable { .. } => "Check that GOPATH points at an existing directory",
            Self::Ambiguous { .. } => "Use a longer term or pass --exact",
            Self::ProjectNotFound(_) => "Try a shorter term without --exact",
            Self::MissingRoot => "Export GOPATH or set [workspace] root in the config file",
            _ => "",
        };
        ErrorEnvelope::new(self.code(), self.to_string(), hint)
    }
}
