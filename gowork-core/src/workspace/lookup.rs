//! Exact author lookup

use super::Workspace;
use crate::error::GoworkError;
use crate::namespace::{Author, Distributor, Project};
use tracing::{debug, warn};

impl Workspace {
    /// Find the author called `name` (ignoring case) on `distributor`.
    pub fn find_author_in(&self, name: &str, distributor: &Distributor) -> crate::Result<Author> {
        let needle = name.to_lowercase();
        self.authors(distributor)?
            .into_iter()
            .find(|author| author.name().to_lowercase() == needle)
            .ok_or(GoworkError::AuthorNotFound)
    }

    /// Find the author called `name` on any distributor.
    ///
    /// Distributors are tried in the order the filesystem lists them, so an
    /// author present on several distributors resolves to whichever comes
    /// first; callers should not rely on a particular one. Use
    /// [`Workspace::find_author_in`] when the distributor is known.
    pub fn find_author(&self, name: &str) -> crate::Result<Author> {
        for distributor in self.distributors()? {
            match self.find_author_in(name, &distributor) {
                Ok(author) => return Ok(author),
                Err(GoworkError::AuthorNotFound) => {
                    debug!(%distributor, name, "Author not on distributor");
                }
                Err(e) => {
                    warn!(%distributor, error = %e, "Skipping unreadable distributor");
                }
            }
        }

        Err(GoworkError::AuthorNotFound)
    }

    /// All projects of the author called `name`, wherever they are hosted
    pub fn projects_of_author(&self, name: &str) -> crate::Result<Vec<Project>> {
        let author = self.find_author(name)?;
        self.projects(&author)
    }
}
