//! Term matching and match classification

use crate::namespace::Project;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// How a search term is compared against a level's name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Term is a case-insensitive substring of the name
    #[default]
    Substring,
    /// Term equals the name, ignoring case
    Exact,
}

/// Most specific hierarchy level a term matched for a project.
///
/// Variants are ordered by specificity: `Distro < Author < Project`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Distro,
    Author,
    Project,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distro => "distro",
            Self::Author => "author",
            Self::Project => "project",
        }
    }
}

impl Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project found by a search, tagged with how it matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMatch {
    pub project: Project,
    pub kind: MatchKind,
}

impl ProjectMatch {
    pub fn new(project: Project, kind: MatchKind) -> Self {
        Self { project, kind }
    }
}

/// Pick the most specific level that was hit. Returns `None` when no level
/// matched at all.
pub fn best_match(distro_hit: bool, author_hit: bool, project_hit: bool) -> Option<MatchKind> {
    if project_hit {
        Some(MatchKind::Project)
    } else if author_hit {
        Some(MatchKind::Author)
    } else if distro_hit {
        Some(MatchKind::Distro)
    } else {
        None
    }
}

/// A prepared, case-folded search term
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: String,
    mode: MatchMode,
}

impl Matcher {
    pub fn new(term: &str, mode: MatchMode) -> Self {
        Self {
            needle: term.to_lowercase(),
            mode,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether the term hits a single level's name
    pub fn hits(&self, name: &str) -> bool {
        match self.mode {
            MatchMode::Substring => name.to_lowercase().contains(&self.needle),
            // An empty term never equals a real directory name
            MatchMode::Exact => !self.needle.is_empty() && name.to_lowercase() == self.needle,
        }
    }

    /// Evaluate every level of a project and classify the result
    pub fn classify(&self, project: &Project) -> Option<MatchKind> {
        let (distro, author, name) = project.split();
        best_match(
            self.hits(distro.name()),
            self.hits(author.name()),
            self.hits(name),
        )
    }
}
