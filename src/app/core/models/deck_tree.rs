// SPDX-License-Identifier: GPL-3.0

use std::collections::HashMap;

use super::deck_counts::DeckCounts;

/// Identifies a [`DeckNode`] inside the [`DeckTree`] that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A single deck of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Only set on decks that terminate at least one [`DeckEntry`] path
    pub counts: Option<DeckCounts>,
    pub expanded: bool,
}

/// A deck given by its full path (root name first) and its counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub path: Vec<String>,
    pub counts: DeckCounts,
}

impl DeckEntry {
    pub fn new<I, S>(path: I, counts: impl Into<DeckCounts>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            counts: counts.into(),
        }
    }
}

/// One line of the rendered tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckRow {
    pub id: NodeId,
    pub depth: usize,
}

/// Deck hierarchy where decks sharing a path prefix share their ancestor nodes.
///
/// Siblings keep insertion order and are looked up by `(parent, name)`, names
/// compared exactly. Sibling names are therefore unique under a given parent.
#[derive(Debug, Default, Clone)]
pub struct DeckTree {
    nodes: Vec<DeckNode>,
    roots: Vec<NodeId>,
    index: HashMap<(Option<NodeId>, String), NodeId>,
}

impl DeckTree {
    /// Builds the tree of the given entries, in order
    pub fn build(entries: &[DeckEntry]) -> Self {
        let mut tree = Self::default();
        for entry in entries {
            tree.insert(&entry.path, entry.counts);
        }
        tree
    }

    /// Same hierarchy with every count removed
    pub fn without_counts(&self) -> Self {
        let mut tree = self.clone();
        for node in &mut tree.nodes {
            node.counts = None;
        }
        tree
    }

    /// Inserts the path, reusing existing ancestors, and sets the counts of its last deck.
    ///
    /// A path inserted twice ends on the same deck, which then holds the sum of both counts.
    /// Returns the terminal node, or `None` for an empty path.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], counts: DeckCounts) -> Option<NodeId> {
        let mut parent = None;
        for name in path {
            parent = Some(self.child_or_insert(parent, name.as_ref()));
        }

        let terminal = parent?;
        let node = &mut self.nodes[terminal.0];
        let total = match node.counts {
            Some(existing) => existing + counts,
            None => counts,
        };
        node.counts = Some(total);
        let names: Vec<&str> = path.iter().map(|name| name.as_ref()).collect();
        tracing::debug!(path = ?names, counts = ?total, "deck counts set");
        Some(terminal)
    }

    fn child_or_insert(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        if let Some(existing) = self.child(parent, name) {
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(DeckNode {
            id,
            name: name.to_string(),
            parent,
            children: Vec::new(),
            counts: None,
            expanded: true,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        self.index.insert((parent, name.to_string()), id);

        id
    }

    /// Child of `parent` (or root when `None`) with exactly this name
    pub fn child(&self, parent: Option<NodeId>, name: &str) -> Option<NodeId> {
        self.index.get(&(parent, name.to_string())).copied()
    }

    /// Walks the tree from the roots, matching one name per depth
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }

        path.iter()
            .try_fold(None, |parent, name| {
                self.child(parent, name.as_ref()).map(Some)
            })
            .flatten()
    }

    /// Names from the root down to the given node
    pub fn path_of(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            path.push(node.name.clone());
            current = node.parent.and_then(|parent| self.get(parent));
        }
        path.reverse();
        path
    }

    pub fn get(&self, id: NodeId) -> Option<&DeckNode> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn toggle_expanded(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.expanded = !node.expanded;
        }
    }

    /// Expands every ancestor of the given node so it becomes visible
    pub fn reveal(&mut self, id: NodeId) {
        let mut parent = self.get(id).and_then(|node| node.parent);
        while let Some(ancestor) = parent {
            let node = &mut self.nodes[ancestor.0];
            node.expanded = true;
            parent = node.parent;
        }
    }

    /// Depth-first rows to display, hiding the descendants of collapsed decks
    pub fn visible_rows(&self) -> Vec<DeckRow> {
        let mut rows = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<DeckRow> = self
            .roots
            .iter()
            .rev()
            .map(|&id| DeckRow { id, depth: 0 })
            .collect();

        while let Some(row) = stack.pop() {
            rows.push(row);
            let node = &self.nodes[row.id.0];
            if node.expanded {
                stack.extend(node.children.iter().rev().map(|&id| DeckRow {
                    id,
                    depth: row.depth + 1,
                }));
            }
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tree: &DeckTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| tree.get(id).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn shared_prefix_reuses_ancestors() {
        let tree = DeckTree::build(&[
            DeckEntry::new(["Math", "Calculus", "Derivatives"], (1, 0, 0)),
            DeckEntry::new(["Math", "Calculus", "Integrals"], (0, 0, 4)),
        ]);

        assert_eq!(tree.len(), 4);
        assert_eq!(names(&tree, tree.roots()), ["Math"]);

        let math = tree.find(&["Math"]).unwrap();
        let calculus = tree.find(&["Math", "Calculus"]).unwrap();
        assert_eq!(tree.children(math), [calculus]);
        assert_eq!(
            names(&tree, tree.children(calculus)),
            ["Derivatives", "Integrals"]
        );

        for leaf in tree.children(calculus) {
            let node = tree.get(*leaf).unwrap();
            assert_eq!(node.parent, Some(calculus));
            assert_eq!(tree.get(calculus).unwrap().parent, Some(math));
        }
    }

    #[test]
    fn prefix_nodes_are_identical_at_each_depth() {
        let a = ["Languages", "Japanese", "Kanji", "N5"];
        let b = ["Languages", "Japanese", "Kanji", "N4"];
        let mut tree = DeckTree::default();
        let leaf_a = tree.insert(&a, DeckCounts::default()).unwrap();
        let leaf_b = tree.insert(&b, DeckCounts::default()).unwrap();

        let ancestors = |mut id: NodeId| {
            let mut chain = Vec::new();
            while let Some(parent) = tree.get(id).unwrap().parent {
                chain.push(parent);
                id = parent;
            }
            chain.reverse();
            chain
        };

        assert_ne!(leaf_a, leaf_b);
        assert_eq!(ancestors(leaf_a), ancestors(leaf_b));
        assert_eq!(ancestors(leaf_a).len(), 3);
    }

    #[test]
    fn only_terminal_nodes_get_counts() {
        let tree = DeckTree::build(&[
            DeckEntry::new(["Dictionaries", "1 - Basic"], (10, 1, 2)),
            DeckEntry::new(["Dictionaries", "2 - Intermediate"], (30, 1, 2)),
        ]);

        let parent = tree.find(&["Dictionaries"]).unwrap();
        assert_eq!(tree.get(parent).unwrap().counts, None);

        let basic = tree.find(&["Dictionaries", "1 - Basic"]).unwrap();
        assert_eq!(
            tree.get(basic).unwrap().counts,
            Some(DeckCounts::new(10, 1, 2))
        );
    }

    #[test]
    fn ancestor_that_is_also_terminal_keeps_its_counts() {
        let tree = DeckTree::build(&[
            DeckEntry::new(["Misc"], (5, 4, 2)),
            DeckEntry::new(["Misc", "Extra"], (1, 0, 0)),
        ]);

        let misc = tree.find(&["Misc"]).unwrap();
        assert_eq!(tree.get(misc).unwrap().counts, Some(DeckCounts::new(5, 4, 2)));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn repeated_path_sums_the_counts() {
        let tree = DeckTree::build(&[
            DeckEntry::new(["Japanese"], (5, 0, 0)),
            DeckEntry::new(["Japanese"], (0, 0, 7)),
        ]);

        assert_eq!(tree.visible_rows().len(), 1);
        let japanese = tree.find(&["Japanese"]).unwrap();
        assert_eq!(
            tree.get(japanese).unwrap().counts,
            Some(DeckCounts::new(5, 0, 7))
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let tree = DeckTree::build(&[
            DeckEntry::new(["Math"], (1, 0, 0)),
            DeckEntry::new(["math"], (2, 0, 0)),
        ]);

        assert_eq!(names(&tree, tree.roots()), ["Math", "math"]);
    }

    #[test]
    fn same_name_under_different_parents_is_not_merged() {
        let tree = DeckTree::build(&[
            DeckEntry::new(["Japanese", "Vocab"], (1, 0, 0)),
            DeckEntry::new(["Spanish", "Vocab"], (2, 0, 0)),
        ]);

        let japanese = tree.find(&["Japanese", "Vocab"]).unwrap();
        let spanish = tree.find(&["Spanish", "Vocab"]).unwrap();
        assert_ne!(japanese, spanish);
    }

    #[test]
    fn empty_path_is_ignored() {
        let mut tree = DeckTree::default();
        let empty: [&str; 0] = [];

        assert_eq!(tree.insert(&empty, DeckCounts::new(1, 1, 1)), None);
        assert!(tree.is_empty());
        assert_eq!(tree.find(&empty), None);
    }

    #[test]
    fn find_fails_on_first_missing_segment() {
        let tree = DeckTree::build(&[DeckEntry::new(["Languages", "Japanese"], (0, 0, 0))]);

        assert!(tree.find(&["Languages", "Japanese"]).is_some());
        assert_eq!(tree.find(&["Languages", "Korean"]), None);
        assert_eq!(tree.find(&["Japanese"]), None);
        assert_eq!(tree.find(&["Languages", "Japanese", "Kana"]), None);
    }

    #[test]
    fn path_of_walks_back_to_the_root() {
        let tree = DeckTree::build(&[DeckEntry::new(["A", "B", "C"], (0, 0, 0))]);
        let c = tree.find(&["A", "B", "C"]).unwrap();

        assert_eq!(tree.path_of(c), ["A", "B", "C"]);
    }

    #[test]
    fn visible_rows_are_depth_first_and_respect_collapse() {
        let mut tree = DeckTree::build(&[
            DeckEntry::new(["Core 6000"], (0, 0, 0)),
            DeckEntry::new(["Grammar", "Basic"], (10, 1, 2)),
            DeckEntry::new(["Grammar", "Advanced"], (30, 0, 0)),
            DeckEntry::new(["Misc"], (5, 4, 2)),
        ]);

        let rows: Vec<(String, usize)> = tree
            .visible_rows()
            .iter()
            .map(|row| (tree.get(row.id).unwrap().name.clone(), row.depth))
            .collect();
        assert_eq!(
            rows,
            [
                ("Core 6000".to_string(), 0),
                ("Grammar".to_string(), 0),
                ("Basic".to_string(), 1),
                ("Advanced".to_string(), 1),
                ("Misc".to_string(), 0),
            ]
        );

        let grammar = tree.find(&["Grammar"]).unwrap();
        tree.toggle_expanded(grammar);
        assert_eq!(tree.visible_rows().len(), 3);

        tree.toggle_expanded(grammar);
        assert_eq!(tree.visible_rows().len(), 5);
    }

    #[test]
    fn reveal_expands_collapsed_ancestors() {
        let mut tree = DeckTree::build(&[DeckEntry::new(["A", "B", "C"], (0, 0, 0))]);
        let a = tree.find(&["A"]).unwrap();
        let b = tree.find(&["A", "B"]).unwrap();
        let c = tree.find(&["A", "B", "C"]).unwrap();
        tree.toggle_expanded(a);
        tree.toggle_expanded(b);
        assert_eq!(tree.visible_rows().len(), 1);

        tree.reveal(c);
        assert_eq!(tree.visible_rows().len(), 3);
    }

    #[test]
    fn without_counts_keeps_the_structure() {
        let tree = DeckTree::build(&[DeckEntry::new(["A", "B"], (3, 2, 1))]);
        let bare = tree.without_counts();

        assert_eq!(bare.len(), tree.len());
        let b = bare.find(&["A", "B"]).unwrap();
        assert_eq!(bare.get(b).unwrap().counts, None);
    }
}
