//! Listing distributors, authors and projects

use super::Workspace;
use crate::error::GoworkError;
use crate::namespace::{Author, Distributor, Project};
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whether a directory entry is a visible hierarchy node.
///
/// Only directories count, and names starting with `.` are hidden.
pub fn is_eligible(name: &str, file_type: FileType) -> bool {
    if !file_type.is_dir() {
        debug!(name, "Not a directory, skipping");
        return false;
    }

    if name.starts_with('.') {
        debug!(name, "Invisible directory, skipping");
        return false;
    }

    true
}

/// Read one level of the tree and return the names of eligible entries in
/// the order the filesystem reports them.
fn read_level(
    dir: &Path,
    unreadable: fn(PathBuf, io::Error) -> GoworkError,
) -> crate::Result<Vec<String>> {
    let fail = |e| unreadable(dir.to_path_buf(), e);
    let mut names = Vec::new();

    for entry in fs::read_dir(dir).map_err(fail)? {
        let entry = entry.map_err(fail)?;
        let file_type = entry.file_type().map_err(fail)?;

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!(name = ?raw, "Name is not valid UTF-8, skipping");
                continue;
            }
        };

        if is_eligible(&name, file_type) {
            names.push(name);
        }
    }

    Ok(names)
}

fn root_unreadable(path: PathBuf, source: io::Error) -> GoworkError {
    GoworkError::RootUnreadable { path, source }
}

fn directory_unreadable(path: PathBuf, source: io::Error) -> GoworkError {
    GoworkError::DirectoryUnreadable { path, source }
}

impl Workspace {
    /// All distributors under `<root>/src`
    pub fn distributors(&self) -> crate::Result<Vec<Distributor>> {
        let names = read_level(&self.src_path(), root_unreadable)?;
        Ok(names.into_iter().map(Distributor::new).collect())
    }

    /// All authors hosting code on `distributor`
    pub fn authors(&self, distributor: &Distributor) -> crate::Result<Vec<Author>> {
        let names = read_level(&self.distributor_path(distributor), directory_unreadable)?;
        Ok(names
            .into_iter()
            .map(|name| Author::new(distributor.clone(), name))
            .collect())
    }

    /// All projects of `author`
    pub fn projects(&self, author: &Author) -> crate::Result<Vec<Project>> {
        let names = read_level(&self.author_path(author), directory_unreadable)?;
        Ok(names
            .into_iter()
            .map(|name| Project::new(author.clone(), name))
            .collect())
    }
}
