//! Distributor, author and project identifiers
//!
//! Every identifier has a canonical slash-joined form (`github.com`,
//! `github.com/alice`, `github.com/alice/tool`) produced by `Display` and
//! decomposed again by `FromStr`. Project names may themselves contain `/`;
//! only the first two separators of a project identifier are structural.

use crate::GoworkError;
use serde::Serialize;
use std::fmt::{self, Display};
use std::str::FromStr;

const SEPARATOR: char = '/';

/// A hosting root such as `github.com` or `bitbucket.org`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distributor(String);

impl Distributor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Directory name of the distributor (e.g. `github.com`)
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Distributor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Distributor {
    type Err = GoworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.contains(SEPARATOR) {
            return Err(malformed("distributor", s));
        }
        Ok(Self::new(s))
    }
}

/// Someone hosting code on a distributor. An author with projects on two
/// distributors is two distinct `Author` values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Author {
    distributor: Distributor,
    name: String,
}

impl Author {
    pub fn new(distributor: Distributor, name: impl Into<String>) -> Self {
        Self {
            distributor,
            name: name.into(),
        }
    }

    pub fn distributor(&self) -> &Distributor {
        &self.distributor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split into the distributor and the author's own name
    pub fn split(&self) -> (&Distributor, &str) {
        (&self.distributor, &self.name)
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.distributor, SEPARATOR, self.name)
    }
}

impl FromStr for Author {
    type Err = GoworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (distributor, name) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| malformed("author", s))?;
        if distributor.is_empty() || name.is_empty() || name.contains(SEPARATOR) {
            return Err(malformed("author", s));
        }
        Ok(Self::new(Distributor::new(distributor), name))
    }
}

/// A project owned by an author. The name may span several path segments
/// (`github.com/alice/tools/cli` has the name `tools/cli`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Project {
    author: Author,
    name: String,
}

impl Project {
    pub fn new(author: Author, name: impl Into<String>) -> Self {
        Self {
            author,
            name: name.into(),
        }
    }

    pub fn distributor(&self) -> &Distributor {
        self.author.distributor()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split into distributor, author and project name
    pub fn split(&self) -> (&Distributor, &Author, &str) {
        (self.author.distributor(), &self.author, &self.name)
    }

    /// Project name broken into its path segments
    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split(SEPARATOR).filter(|s| !s.is_empty())
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.author, SEPARATOR, self.name)
    }
}

impl FromStr for Project {
    type Err = GoworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(distributor), Some(author), Some(name))
                if !distributor.is_empty() && !author.is_empty() && !name.is_empty() =>
            {
                let author = Author::new(Distributor::new(distributor), author);
                Ok(Self::new(author, name))
            }
            _ => Err(malformed("project", s)),
        }
    }
}

fn malformed(kind: &'static str, value: &str) -> GoworkError {
    GoworkError::MalformedIdentifier {
        kind,
        value: value.to_string(),
    }
}

// Identifiers serialize as their canonical string
macro_rules! serialize_canonical {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_canonical!(Distributor, Author, Project);
