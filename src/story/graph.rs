//! Chapter unlock graph
//!
//! A chapter is unlocked once every chapter it depends on is completed.
//! The shipped story is a straight chain, but any DAG works. Cycles are not
//! rejected: chapters on a cycle simply never unlock.

use std::collections::{BTreeMap, BTreeSet};

use super::ids::Chapter;

/// Static dependency graph over chapters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Chapter -> chapters that must be completed first.
    /// A chapter without an entry has no dependencies.
    dependencies: BTreeMap<Chapter, BTreeSet<Chapter>>,
}

impl DependencyGraph {
    /// Empty graph: every chapter starts unlocked
    pub fn new() -> Self {
        Self::default()
    }

    /// The storybook's reading order, each chapter gated on the previous one
    pub fn storybook() -> Self {
        let mut graph = Self::new().with_dependencies(Chapter::ALL[0], []);
        for pair in Chapter::ALL.windows(2) {
            graph = graph.with_dependencies(pair[1], [pair[0]]);
        }
        graph
    }

    /// Replace the dependency set of `chapter`
    pub fn with_dependencies(
        mut self,
        chapter: Chapter,
        deps: impl IntoIterator<Item = Chapter>,
    ) -> Self {
        self.dependencies
            .insert(chapter, deps.into_iter().collect());
        self
    }

    /// Chapters `chapter` waits on (empty if none)
    pub fn dependencies(&self, chapter: Chapter) -> impl Iterator<Item = Chapter> + '_ {
        self.dependencies
            .get(&chapter)
            .into_iter()
            .flat_map(|deps| deps.iter().copied())
    }

    /// Whether every dependency of `chapter` is in `completed`
    pub fn is_unlocked(&self, chapter: Chapter, completed: &[Chapter]) -> bool {
        self.dependencies(chapter).all(|dep| completed.contains(&dep))
    }

    /// Chapters that are open to play: unlocked and not yet completed.
    ///
    /// Stateless; callers diff against what they showed before.
    pub fn compute_newly_unlocked(&self, completed: &[Chapter]) -> BTreeSet<Chapter> {
        Chapter::ALL
            .into_iter()
            .filter(|c| !completed.contains(c))
            .filter(|c| self.is_unlocked(*c, completed))
            .collect()
    }
}
