//! Binary search tree state
//!
//! Nodes are owned by their parent through `Option<Box<TreeNode>>`. Values are
//! unique: inserting a value already in the tree leaves it unchanged, so a
//! value doubles as the node's identity in steps.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

/// Values of the sample tree, in insertion order
pub const SAMPLE_TREE: [i64; 7] = [50, 30, 70, 20, 40, 60, 80];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
    pub highlighted: bool,
}

impl TreeNode {
    pub fn new(value: i64) -> Self {
        TreeNode {
            value,
            left: None,
            right: None,
            highlighted: false,
        }
    }
}

/// Traversal orders supported by the tree steppers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
    Bfs,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::Inorder,
        TraversalOrder::Preorder,
        TraversalOrder::Postorder,
        TraversalOrder::Bfs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraversalOrder::Inorder => "In-order (LNR)",
            TraversalOrder::Preorder => "Pre-order (NLR)",
            TraversalOrder::Postorder => "Post-order (LRN)",
            TraversalOrder::Bfs => "Breadth-First Search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bst {
    root: Option<Box<TreeNode>>,
    visited: Vec<i64>,
}

impl Bst {
    pub fn new() -> Self {
        Bst::default()
    }

    pub fn from_values<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let mut tree = Bst::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    pub fn sample() -> Self {
        Bst::from_values(SAMPLE_TREE)
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Values visited by the current traversal, in visit order
    pub fn visited(&self) -> &[i64] {
        &self.visited
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        fn count(node: Option<&TreeNode>) -> usize {
            node.map_or(0, |n| 1 + count(n.left.as_deref()) + count(n.right.as_deref()))
        }
        count(self.root())
    }

    pub fn height(&self) -> usize {
        fn depth(node: Option<&TreeNode>) -> usize {
            node.map_or(0, |n| {
                1 + depth(n.left.as_deref()).max(depth(n.right.as_deref()))
            })
        }
        depth(self.root())
    }

    /// Insert a value, returning `false` when it was already present
    pub fn insert(&mut self, value: i64) -> bool {
        fn insert_into(slot: &mut Option<Box<TreeNode>>, value: i64) -> bool {
            match slot {
                None => {
                    *slot = Some(Box::new(TreeNode::new(value)));
                    true
                }
                Some(node) => match value.cmp(&node.value) {
                    Ordering::Less => insert_into(&mut node.left, value),
                    Ordering::Greater => insert_into(&mut node.right, value),
                    Ordering::Equal => false,
                },
            }
        }
        insert_into(&mut self.root, value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    /// Values compared on the way down when searching for `value`, and
    /// whether the search ended on a node holding it
    pub fn search_path(&self, value: i64) -> (Vec<i64>, bool) {
        let mut path = Vec::new();
        let mut current = self.root();
        while let Some(node) = current {
            path.push(node.value);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return (path, true),
            };
        }
        (path, false)
    }

    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    fn find_mut(&mut self, value: i64) -> Option<&mut TreeNode> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn set_highlight(&mut self, value: i64, highlighted: bool) {
        if let Some(node) = self.find_mut(value) {
            node.highlighted = highlighted;
        }
    }

    pub fn clear_highlights(&mut self) {
        fn clear(node: Option<&mut TreeNode>) {
            if let Some(node) = node {
                node.highlighted = false;
                clear(node.left.as_deref_mut());
                clear(node.right.as_deref_mut());
            }
        }
        clear(self.root.as_deref_mut());
    }

    /// Clear highlights and the traversal record
    pub fn reset(&mut self) {
        self.clear_highlights();
        self.visited.clear();
    }

    /// Single active node: every other highlight is cleared
    pub fn record_visit(&mut self, value: i64) {
        self.clear_highlights();
        self.set_highlight(value, true);
        self.visited.push(value);
    }

    pub fn highlighted_values(&self) -> Vec<i64> {
        self.preorder()
            .into_iter()
            .filter(|&v| self.find(v).is_some_and(|n| n.highlighted))
            .collect()
    }

    pub fn traversal(&self, order: TraversalOrder) -> Vec<i64> {
        match order {
            TraversalOrder::Inorder => self.inorder(),
            TraversalOrder::Preorder => self.preorder(),
            TraversalOrder::Postorder => self.postorder(),
            TraversalOrder::Bfs => self.level_order(),
        }
    }

    pub fn inorder(&self) -> Vec<i64> {
        fn walk(node: Option<&TreeNode>, out: &mut Vec<i64>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                out.push(node.value);
                walk(node.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root(), &mut out);
        out
    }

    pub fn preorder(&self) -> Vec<i64> {
        fn walk(node: Option<&TreeNode>, out: &mut Vec<i64>) {
            if let Some(node) = node {
                out.push(node.value);
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root(), &mut out);
        out
    }

    pub fn postorder(&self) -> Vec<i64> {
        fn walk(node: Option<&TreeNode>, out: &mut Vec<i64>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
                out.push(node.value);
            }
        }
        let mut out = Vec::new();
        walk(self.root(), &mut out);
        out
    }

    /// FIFO queue seeded with the root
    pub fn level_order(&self) -> Vec<i64> {
        let mut out = Vec::new();
        let mut queue: VecDeque<&TreeNode> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            out.push(node.value);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        out
    }

    /// Nodes grouped by depth, `None` marking an absent child slot
    pub fn levels(&self) -> Vec<Vec<Option<&TreeNode>>> {
        let height = self.height();
        let mut levels = Vec::with_capacity(height);
        let mut current: Vec<Option<&TreeNode>> = vec![self.root()];
        for _ in 0..height {
            let next = current
                .iter()
                .flat_map(|slot| match *slot {
                    Some(node) => [node.left.as_deref(), node.right.as_deref()],
                    None => [None, None],
                })
                .collect();
            levels.push(current);
            current = next;
        }
        levels
    }
}

impl fmt::Display for Bst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(
            f: &mut fmt::Formatter<'_>,
            node: Option<&TreeNode>,
            prefix: &str,
            label: &str,
        ) -> fmt::Result {
            if let Some(node) = node {
                let marker = if node.highlighted { "*" } else { "" };
                writeln!(f, "{}{}{}{}", prefix, label, node.value, marker)?;
                let child_prefix = format!("{}    ", prefix);
                write_node(f, node.left.as_deref(), &child_prefix, "L: ")?;
                write_node(f, node.right.as_deref(), &child_prefix, "R: ")?;
            }
            Ok(())
        }
        if self.is_empty() {
            return writeln!(f, "(empty tree)");
        }
        write_node(f, self.root(), "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let tree = Bst::sample();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.preorder(), vec![50, 30, 20, 40, 70, 60, 80]);
        assert_eq!(tree.postorder(), vec![20, 40, 30, 60, 80, 70, 50]);
        assert_eq!(tree.level_order(), vec![50, 30, 70, 20, 40, 60, 80]);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut tree = Bst::sample();
        let before = tree.clone();
        assert!(!tree.insert(40));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_search_path() {
        let tree = Bst::sample();
        assert_eq!(tree.search_path(45), (vec![50, 30, 40], false));
        assert_eq!(tree.search_path(60), (vec![50, 70, 60], true));
    }

    #[test]
    fn test_record_visit_keeps_single_highlight() {
        let mut tree = Bst::sample();
        tree.record_visit(20);
        tree.record_visit(30);
        assert_eq!(tree.highlighted_values(), vec![30]);
        assert_eq!(tree.visited(), &[20, 30]);
        tree.reset();
        assert!(tree.highlighted_values().is_empty());
        assert!(tree.visited().is_empty());
    }

    #[test]
    fn test_levels_pad_missing_children() {
        let tree = Bst::from_values([10, 5]);
        let levels = tree.levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].len(), 2);
        assert_eq!(levels[1][0].map(|n| n.value), Some(5));
        assert!(levels[1][1].is_none());
    }
}
