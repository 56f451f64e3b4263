//! Streaming project search
//!
//! A search walks the whole tree on a background thread and hands each
//! classified match to the caller through a channel as soon as it is found.
//! The stream ends either when the walk is exhausted or right after the
//! first error; no match is ever delivered after an error.

use crate::error::GoworkError;
use crate::matching::{MatchMode, Matcher, ProjectMatch};
use crate::namespace::Project;
use crate::workspace::Workspace;
use crossbeam_channel::{Receiver, Sender};
use std::iter::FusedIterator;
use std::thread;
use tracing::debug;

type SearchItem = crate::Result<ProjectMatch>;

/// Incoming results of a running search.
///
/// Yields `Ok` matches in traversal order, then either nothing more or a
/// single `Err` after which the iterator is exhausted. Dropping a `Search`
/// before the end stops the producer at its next send.
#[derive(Debug)]
pub struct Search {
    rx: Receiver<SearchItem>,
    done: bool,
}

impl Search {
    pub(crate) fn from_receiver(rx: Receiver<SearchItem>) -> Self {
        Self { rx, done: false }
    }

    /// Drain every match. If the walk failed, the error is returned and any
    /// matches received before it are discarded.
    pub fn collect_matches(self) -> crate::Result<Vec<ProjectMatch>> {
        self.collect()
    }
}

impl Iterator for Search {
    type Item = SearchItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.rx.recv() {
            Ok(Ok(found)) => Some(Ok(found)),
            Ok(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            // Producer finished and dropped its sender
            Err(_) => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for Search {}

/// Keep only the matches of the most specific kind present, in order
pub fn most_specific(matches: Vec<ProjectMatch>) -> Vec<ProjectMatch> {
    let Some(best) = matches.iter().map(|m| m.kind).max() else {
        return matches;
    };
    matches.into_iter().filter(|m| m.kind == best).collect()
}

impl Workspace {
    /// Start searching every project for `term`.
    ///
    /// Each project is checked at the distributor, author and project level
    /// and reported with the most specific level that matched. Projects with
    /// no hit at any level are skipped.
    pub fn search(&self, term: &str, mode: MatchMode) -> crate::Result<Search> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let workspace = self.clone();
        let matcher = Matcher::new(term, mode);

        thread::Builder::new()
            .name("gowork-search".to_string())
            .spawn(move || {
                if let Err(e) = workspace.walk(&matcher, &tx) {
                    debug!(error = %e, "Search aborted");
                    // The consumer may already be gone; nothing left to do then
                    let _ = tx.send(Err(e));
                }
            })?;

        Ok(Search::from_receiver(rx))
    }

    /// Resolve `term` to a single project.
    ///
    /// Only the most specific tier of matches is considered. More than one
    /// project in that tier is reported as ambiguous.
    pub fn locate(&self, term: &str, mode: MatchMode) -> crate::Result<Project> {
        let matches = most_specific(self.search(term, mode)?.collect_matches()?);

        let mut projects: Vec<Project> = matches.into_iter().map(|m| m.project).collect();
        match projects.len() {
            0 => Err(GoworkError::ProjectNotFound(term.to_string())),
            1 => Ok(projects.remove(0)),
            _ => Err(GoworkError::Ambiguous {
                term: term.to_string(),
                candidates: projects.iter().map(|p| p.to_string()).collect(),
            }),
        }
    }

    /// Depth-first walk sending every match. Returns early without error
    /// once the receiving side has hung up.
    fn walk(&self, matcher: &Matcher, tx: &Sender<SearchItem>) -> crate::Result<()> {
        for distributor in self.distributors()? {
            for author in self.authors(&distributor)? {
                for project in self.projects(&author)? {
                    let Some(kind) = matcher.classify(&project) else {
                        continue;
                    };

                    if tx.send(Ok(ProjectMatch::new(project, kind))).is_err() {
                        debug!("Search receiver dropped, stopping walk");
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchKind;
    use crate::workspace::fixture;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn m(project: &str, kind: MatchKind) -> ProjectMatch {
        ProjectMatch::new(project.parse().unwrap(), kind)
    }

    fn find(workspace: &Workspace, term: &str, mode: MatchMode) -> Vec<ProjectMatch> {
        let mut matches = workspace.search(term, mode).unwrap().collect_matches().unwrap();
        matches.sort_by(|a, b| a.project.cmp(&b.project));
        matches
    }

    #[test]
    fn test_stream_drains_until_sender_dropped() {
        let (tx, rx) = crossbeam_channel::unbounded();
        for name in ["a/b/test", "a/b/test2", "a/b/test3"] {
            tx.send(Ok(m(name, MatchKind::Project))).unwrap();
        }
        drop(tx);

        let found = Search::from_receiver(rx).collect_matches().unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[2].project.to_string(), "a/b/test3");
    }

    #[test]
    fn test_stream_stops_at_first_error() {
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(Ok(m("a/b/test", MatchKind::Project))).unwrap();
        tx.send(Err(GoworkError::Io(io::Error::other("test... "))))
            .unwrap();
        tx.send(Ok(m("a/b/test3", MatchKind::Project))).unwrap();
        drop(tx);

        let mut search = Search::from_receiver(rx);
        assert!(matches!(search.next(), Some(Ok(_))));
        assert!(matches!(search.next(), Some(Err(_))));
        assert!(search.next().is_none());
        assert!(search.next().is_none());
    }

    #[test]
    fn test_collect_discards_matches_before_error() {
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(Ok(m("a/b/test", MatchKind::Project))).unwrap();
        tx.send(Err(GoworkError::Io(io::Error::other("test... "))))
            .unwrap();
        drop(tx);

        let err = Search::from_receiver(rx).collect_matches().unwrap_err();
        assert_eq!(err.to_string(), "IO error: test... ");
    }

    #[test]
    fn test_find_all_with_empty_term() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        let found = find(&workspace, "", MatchMode::Substring);
        let expected: Vec<ProjectMatch> = fixture::PROJECTS
            .iter()
            .map(|p| m(p, MatchKind::Project))
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_exact_without_hits() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        assert!(find(&workspace, "proj", MatchMode::Exact).is_empty());
        assert!(find(&workspace, "", MatchMode::Exact).is_empty());
    }

    #[test]
    fn test_substring_project_hits() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        assert_eq!(
            find(&workspace, "proj", MatchMode::Substring),
            vec![
                m("aaa/user/project", MatchKind::Project),
                m("bbb/user/project", MatchKind::Project),
                m("ccc/user/project", MatchKind::Project),
            ]
        );
    }

    #[test]
    fn test_distro_hits() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        assert_eq!(
            find(&workspace, "github.com", MatchMode::Substring),
            vec![
                m("github.com/matt3o12/gowork", MatchKind::Distro),
                m("github.com/matt3o12/termui-widgets", MatchKind::Distro),
                m("github.com/stretchr/testify", MatchKind::Distro),
            ]
        );
    }

    #[test]
    fn test_exact_author_hits() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        assert_eq!(
            find(&workspace, "MATT3O12", MatchMode::Exact),
            vec![
                m("github.com/matt3o12/gowork", MatchKind::Author),
                m("github.com/matt3o12/termui-widgets", MatchKind::Author),
            ]
        );
    }

    #[test]
    fn test_term_hitting_all_levels_is_project_match() {
        let dir = fixture::tree_with(&["github.com/gitter/git"]);
        let workspace = Workspace::new(dir.path());

        assert_eq!(
            find(&workspace, "git", MatchMode::Substring),
            vec![m("github.com/gitter/git", MatchKind::Project)]
        );
    }

    #[test]
    fn test_hidden_entries_never_searched() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        assert!(find(&workspace, "ghost", MatchMode::Substring).is_empty());
    }

    #[test]
    fn test_missing_root_yields_single_error() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().join("not-exist"));

        let mut search = workspace.search("tool", MatchMode::Substring).unwrap();
        match search.next() {
            Some(Err(GoworkError::RootUnreadable { path, .. })) => {
                assert_eq!(path, dir.path().join("not-exist").join("src"));
            }
            other => panic!("expected root error, got {other:?}"),
        }
        assert!(search.next().is_none());
    }

    #[test]
    fn test_dropping_search_early_does_not_hang() {
        let names: Vec<String> = (0..200).map(|i| format!("dist/author/project-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let dir = fixture::tree_with(&refs);
        let workspace = Workspace::new(dir.path());

        let mut search = workspace.search("project", MatchMode::Substring).unwrap();
        assert!(matches!(search.next(), Some(Ok(_))));
        drop(search);

        // A fresh search over the same tree still completes
        let all = workspace
            .search("project", MatchMode::Substring)
            .unwrap()
            .collect_matches()
            .unwrap();
        assert_eq!(all.len(), 200);
    }

    #[test]
    fn test_most_specific_keeps_top_tier_in_order() {
        let matches = vec![
            m("github.com/tool/a", MatchKind::Author),
            m("github.com/alice/tool", MatchKind::Project),
            m("tool.io/bob/x", MatchKind::Distro),
            m("bitbucket.org/bob/tool", MatchKind::Project),
        ];
        let best = most_specific(matches);
        let names: Vec<String> = best.iter().map(|m| m.project.to_string()).collect();
        assert_eq!(names, ["github.com/alice/tool", "bitbucket.org/bob/tool"]);
        assert!(most_specific(Vec::new()).is_empty());
    }

    #[test]
    fn test_locate_unique_project() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        let project = workspace.locate("testify", MatchMode::Substring).unwrap();
        assert_eq!(
            workspace.project_path(&project),
            PathBuf::from(dir.path()).join("src/github.com/stretchr/testify")
        );
    }

    #[test]
    fn test_locate_prefers_project_over_author_hits() {
        let dir = fixture::tree_with(&["github.com/gowork/other", "github.com/matt3o12/gowork"]);
        let workspace = Workspace::new(dir.path());

        let project = workspace.locate("gowork", MatchMode::Exact).unwrap();
        assert_eq!(project.to_string(), "github.com/matt3o12/gowork");
    }

    #[test]
    fn test_locate_ambiguous_and_missing() {
        let dir = fixture::project_tree();
        let workspace = Workspace::new(dir.path());

        match workspace.locate("project", MatchMode::Exact) {
            Err(GoworkError::Ambiguous { candidates, .. }) => assert_eq!(candidates.len(), 3),
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(matches!(
            workspace.locate("nothing-here", MatchMode::Substring),
            Err(GoworkError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_nested_stray_file_is_ignored() {
        let dir = fixture::project_tree();
        fs::write(dir.path().join("src/github.com/stretchr/README"), "").unwrap();
        let workspace = Workspace::new(dir.path());

        assert!(find(&workspace, "readme", MatchMode::Substring).is_empty());
    }
}
