/*
termtree::Tree is a foreign type, so the conversion lives in a local trait
implemented for our own tree instead of an inherent impl on theirs.
 */
use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::Tree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<V: Display> TreeNodeConvert for Tree<V> {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        // Recursively construct the children
        let leaves: Vec<_> = self.children().map(|c| c.to_tree_string()).collect();

        TermTree::new(self.value().to_string()).with_leaves(leaves)
    }
}
