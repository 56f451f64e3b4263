//! gowork core - locate projects in a GOPATH-style tree
//!
//! Projects live under `<root>/src/<distributor>/<author>/<project>`. This
//! library lists the levels of that tree, looks authors up by name and
//! searches every project for a term, classifying each hit by the most
//! specific level it matched.

pub mod config;
pub mod error;
pub mod matching;
pub mod namespace;
pub mod search;
pub mod workspace;

pub use config::Config;
pub use error::{ErrorEnvelope, GoworkError};
pub use matching::{best_match, MatchKind, MatchMode, Matcher, ProjectMatch};
pub use namespace::{Author, Distributor, Project};
pub use search::{most_specific, Search};
pub use workspace::Workspace;

/// Result type alias for gowork operations
pub type Result<T> = std::result::Result<T, GoworkError>;
