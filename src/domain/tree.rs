//! Generic ordered n-ary tree.
//!
//! Each node owns its children outright. Children are passed in by value,
//! so a node can never be inserted below itself or one of its descendants:
//!
//! ```compile_fail
//! use arbor::domain::Tree;
//!
//! let mut root = Tree::new("a");
//! root.append_child(root);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;
use std::slice;

use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// A node holding one value and an ordered list of owned child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<V> {
    value: V,
    children: Vec<Tree<V>>,
}

impl<V> Tree<V> {
    /// Creates a leaf.
    pub fn new(value: V) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given immediate children, in order.
    pub fn with_children(value: V, children: impl IntoIterator<Item = Tree<V>>) -> Self {
        Self {
            value,
            children: children.into_iter().collect(),
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Inserts `child` as the `index`'th child, shifting later children right.
    ///
    /// Fails without touching the tree if `index` exceeds the number of children.
    pub fn insert_child(&mut self, index: usize, child: Tree<V>) -> DomainResult<()> {
        if index > self.children.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, child);
        Ok(())
    }

    pub fn append_child(&mut self, child: Tree<V>) {
        self.children.push(child);
    }

    pub fn append_children(&mut self, children: impl IntoIterator<Item = Tree<V>>) {
        self.children.extend(children);
    }

    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_at(&self, index: usize) -> DomainResult<&Tree<V>> {
        self.children
            .get(index)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.children.len(),
            })
    }

    pub fn child_at_mut(&mut self, index: usize) -> DomainResult<&mut Tree<V>> {
        let len = self.children.len();
        self.children
            .get_mut(index)
            .ok_or(DomainError::IndexOutOfRange { index, len })
    }

    /// Iterates over the immediate children, left to right.
    pub fn children(&self) -> slice::Iter<'_, Tree<V>> {
        self.children.iter()
    }

    /// Preorder depth-first iterator over this node and all its descendants.
    pub fn iter(&self) -> TreeIterator<'_, V> {
        TreeIterator::new(self)
    }

    /// True iff `node` is this very node or one of its descendants.
    ///
    /// Identity is by reference, not by value: a structurally equal copy
    /// living elsewhere is not contained.
    pub fn contains(&self, node: &Tree<V>) -> bool {
        self.iter().any(|n| ptr::eq(n, node))
    }
}

impl<V: fmt::Display> Tree<V> {
    /// Renders one value per line, indented by one space per level of depth.
    pub fn to_indented_string(&self) -> String {
        self.to_indented_string_by(1)
    }

    /// Like [`to_indented_string`](Self::to_indented_string) with `width`
    /// spaces per level.
    pub fn to_indented_string_by(&self, width: usize) -> String {
        let mut out = String::new();
        self.write_indented(&mut out, 0, width);
        out
    }

    fn write_indented(&self, out: &mut String, depth: usize, width: usize) {
        out.push_str(&" ".repeat(depth * width));
        out.push_str(&self.value.to_string());
        out.push('\n');
        for child in &self.children {
            child.write_indented(out, depth + 1, width);
        }
    }
}

impl<V: Eq + fmt::Display> Tree<V> {
    /// Deterministic hash of this tree, consistent with `==`.
    ///
    /// Values that compare equal must display the same way. Types with only
    /// partial equality are rejected:
    ///
    /// ```compile_fail
    /// use arbor::domain::Tree;
    ///
    /// Tree::new(0.0_f64).hash_code();
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Canonical one-line form: `value` for a leaf, `value (c1 c2 ... cN)` otherwise.
impl<V: fmt::Display> fmt::Display for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some((first, rest)) = self.children.split_first() {
            write!(f, " ({}", first)?;
            for child in rest {
                write!(f, " {}", child)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Hashes the canonical string form, then every child in order.
impl<V: Eq + fmt::Display> Hash for Tree<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
        for child in &self.children {
            child.hash(state);
        }
    }
}

impl<'a, V> IntoIterator for &'a Tree<V> {
    type Item = &'a Tree<V>;
    type IntoIter = slice::Iter<'a, Tree<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.children()
    }
}

pub struct TreeIterator<'a, V> {
    stack: Vec<&'a Tree<V>>,
}

impl<'a, V> TreeIterator<'a, V> {
    fn new(root: &'a Tree<V>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, V> Iterator for TreeIterator<'a, V> {
    type Item = &'a Tree<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.children.iter().rev());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      1
    //     / \
    //    2   3
    //    |
    //    4
    fn sample() -> Tree<i32> {
        Tree::with_children(
            1,
            [Tree::with_children(2, [Tree::new(4)]), Tree::new(3)],
        )
    }

    #[test]
    fn test_new_is_leaf() {
        let tree = Tree::new("A");
        assert_eq!(*tree.value(), "A");
        assert_eq!(tree.number_of_children(), 0);
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_with_children_keeps_order() {
        let tree = Tree::with_children("G", [Tree::new("C"), Tree::new("D"), Tree::new("E")]);
        assert_eq!(tree.number_of_children(), 3);
        let values: Vec<_> = tree.children().map(|c| *c.value()).collect();
        assert_eq!(values, vec!["C", "D", "E"]);
    }

    #[test]
    fn test_set_value() {
        let mut tree = Tree::new(true);
        tree.set_value(false);
        assert!(!*tree.value());

        let mut tree = Tree::with_children(3, [Tree::new(4)]);
        tree.set_value(100);
        assert_eq!(*tree.value(), 100);
        assert_eq!(tree.number_of_children(), 1);
    }

    #[test]
    fn test_insert_child_shifts_later_children() {
        let mut tree = Tree::new('d');
        tree.append_child(Tree::new('a'));
        tree.append_child(Tree::new('b'));
        tree.insert_child(0, Tree::new('c')).unwrap();
        tree.insert_child(3, Tree::new('e')).unwrap();

        let values: Vec<_> = tree.children().map(|c| *c.value()).collect();
        assert_eq!(values, vec!['c', 'a', 'b', 'e']);
    }

    #[test]
    fn test_insert_child_past_end_fails_without_change() {
        let mut tree = Tree::new("A");
        let err = tree.insert_child(5, Tree::new("B")).unwrap_err();
        assert_eq!(err, DomainError::IndexOutOfRange { index: 5, len: 0 });
        assert_eq!(tree, Tree::new("A"));
    }

    #[test]
    fn test_append_children() {
        let mut tree = Tree::new('d');
        tree.append_children([Tree::new('a'), Tree::new('b'), Tree::new('c')]);
        assert_eq!(*tree.value(), 'd');
        assert_eq!(*tree.child_at(0).unwrap().value(), 'a');
        assert_eq!(*tree.child_at(1).unwrap().value(), 'b');
        assert_eq!(*tree.child_at(2).unwrap().value(), 'c');
    }

    #[test]
    fn test_child_at_out_of_range() {
        let tree = sample();
        assert!(tree.child_at(1).is_ok());
        assert_eq!(
            tree.child_at(2).unwrap_err(),
            DomainError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_child_at_mut_edits_in_place() {
        let mut tree = sample();
        tree.child_at_mut(1).unwrap().set_value(30);
        assert_eq!(tree.to_string(), "1 (2 (4) 30)");
        assert!(tree.child_at_mut(7).is_err());
    }

    #[test]
    fn test_children_is_fresh_per_call() {
        let tree = sample();
        let mut first = tree.children();
        assert_eq!(*first.next().unwrap().value(), 2);
        assert_eq!(*first.next().unwrap().value(), 3);
        assert!(first.next().is_none());

        let again: Vec<_> = (&tree).into_iter().map(|c| *c.value()).collect();
        assert_eq!(again, vec![2, 3]);
    }

    #[test]
    fn test_iter_is_preorder() {
        let values: Vec<_> = sample().iter().map(|n| *n.value()).collect();
        assert_eq!(values, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_contains_uses_identity() {
        let tree = sample();
        let grandchild = tree.child_at(0).unwrap().child_at(0).unwrap();
        assert!(tree.contains(&tree));
        assert!(tree.contains(grandchild));
        assert!(!grandchild.contains(&tree));

        let lookalike = Tree::new(4);
        assert_eq!(&lookalike, grandchild);
        assert!(!tree.contains(&lookalike));
    }

    #[test]
    fn test_display_canonical_form() {
        assert_eq!(Tree::new("x").to_string(), "x");
        assert_eq!(sample().to_string(), "1 (2 (4) 3)");
    }

    #[test]
    fn test_to_indented_string() {
        assert_eq!(sample().to_indented_string(), "1\n 2\n  4\n 3\n");
        assert_eq!(sample().to_indented_string_by(2), "1\n  2\n    4\n  3\n");
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(sample(), sample());

        let flat = Tree::with_children(1, [Tree::new(2), Tree::new(3), Tree::new(4)]);
        assert_ne!(sample(), flat);

        let reordered = Tree::with_children(
            1,
            [Tree::new(3), Tree::with_children(2, [Tree::new(4)])],
        );
        assert_ne!(sample(), reordered);
    }

    #[test]
    fn test_equality_with_optional_values() {
        let a: Tree<Option<i32>> = Tree::with_children(None, [Tree::new(Some(1))]);
        let b: Tree<Option<i32>> = Tree::with_children(None, [Tree::new(Some(1))]);
        let c: Tree<Option<i32>> = Tree::with_children(Some(0), [Tree::new(Some(1))]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_code_consistent_with_equality() {
        assert_eq!(sample().hash_code(), sample().hash_code());

        let flat = Tree::with_children(1, [Tree::new(2), Tree::new(3), Tree::new(4)]);
        assert_ne!(sample().hash_code(), flat.hash_code());
    }

    /// Name compared and printed without regard to ASCII case.
    #[derive(Debug, Clone)]
    struct Label(&'static str);

    impl PartialEq for Label {
        fn eq(&self, other: &Self) -> bool {
            self.0.eq_ignore_ascii_case(other.0)
        }
    }

    impl Eq for Label {}

    impl fmt::Display for Label {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0.to_ascii_lowercase())
        }
    }

    #[test]
    fn test_hash_code_follows_value_equality() {
        let upper = Tree::with_children(Label("ROOT"), [Tree::new(Label("Leaf"))]);
        let lower = Tree::with_children(Label("root"), [Tree::new(Label("leaf"))]);
        assert_eq!(upper, lower);
        assert_eq!(upper.hash_code(), lower.hash_code());

        let other = Tree::with_children(Label("root"), [Tree::new(Label("twig"))]);
        assert_ne!(upper, other);
        assert_ne!(upper.hash_code(), other.hash_code());
    }
}
