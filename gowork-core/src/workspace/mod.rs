//! The on-disk `<root>/src/<distributor>/<author>/<project>` tree

mod enumerate;
mod lookup;

pub use enumerate::is_eligible;

use crate::config::Config;
use crate::namespace::{Author, Distributor, Project};
use std::path::{Path, PathBuf};

/// Directory under the root that holds every distributor
const SRC_DIR: &str = "src";

/// A root path plus the operations that read the tree beneath it.
///
/// The root is always supplied by the caller; nothing here consults the
/// process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build a workspace from config, letting `override_root` (typically
    /// `GOPATH` or `--root`) take precedence.
    pub fn from_config(config: &Config, override_root: Option<PathBuf>) -> crate::Result<Self> {
        Ok(Self::new(config.resolve_root(override_root)?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/src`
    pub fn src_path(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    pub fn distributor_path(&self, distributor: &Distributor) -> PathBuf {
        self.src_path().join(distributor.name())
    }

    pub fn author_path(&self, author: &Author) -> PathBuf {
        self.distributor_path(author.distributor()).join(author.name())
    }

    pub fn project_path(&self, project: &Project) -> PathBuf {
        project
            .name_segments()
            .fold(self.author_path(project.author()), |path, segment| {
                path.join(segment)
            })
    }
}
