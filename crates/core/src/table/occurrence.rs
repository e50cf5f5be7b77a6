//! Occurrence nodes and the min-priority queue used to merge them.
//!
//! During construction every distinct token starts as a leaf node carrying its
//! frequency. The two lowest-ranked nodes are merged repeatedly until a single
//! root remains; flattening that root yields the token -> code mapping.

use compact_str::CompactString;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// Merge tree built bottom-up during construction.
///
/// Only lives until the root is flattened into codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeTree {
    /// A single token
    Leaf(CompactString),
    /// Two merged subtrees: the first gets bit `0`, the second bit `1`
    Merge(Box<MergeTree>, Box<MergeTree>),
}

impl MergeTree {
    /// Flatten the tree into `(token, code)` pairs.
    ///
    /// A tree made of a single leaf yields that token with the empty code.
    pub fn flatten(self) -> Vec<(CompactString, String)> {
        let mut codes = Vec::new();
        // Explicit stack: a skewed frequency distribution produces a tree as
        // deep as the number of tokens.
        let mut stack = vec![(self, String::new())];

        while let Some((node, prefix)) = stack.pop() {
            match node {
                MergeTree::Leaf(token) => codes.push((token, prefix)),
                MergeTree::Merge(first, second) => {
                    let mut second_prefix = prefix.clone();
                    second_prefix.push('1');
                    stack.push((*second, second_prefix));

                    let mut first_prefix = prefix;
                    first_prefix.push('0');
                    stack.push((*first, first_prefix));
                }
            }
        }

        codes
    }
}

/// A node waiting in the merge queue.
#[derive(Debug, Clone)]
pub struct OccurrenceNode {
    /// Total frequency of every token below this node
    pub count: u64,
    /// Height of the subtree; breaks count ties (shallower ranks lower)
    pub depth: u32,
    /// Insertion sequence; breaks the remaining ties (older ranks lower)
    pub seq: u64,
    /// The subtree itself
    pub tree: MergeTree,
}

impl OccurrenceNode {
    /// Create a leaf node for a token.
    pub fn leaf(token: CompactString, count: u64, seq: u64) -> Self {
        Self {
            count,
            depth: 0,
            seq,
            tree: MergeTree::Leaf(token),
        }
    }

    /// Merge two nodes. `first` ends up under bit `0`.
    pub fn merge(first: OccurrenceNode, second: OccurrenceNode, seq: u64) -> Self {
        Self {
            count: first.count + second.count,
            depth: first.depth.max(second.depth) + 1,
            seq,
            tree: MergeTree::Merge(Box::new(first.tree), Box::new(second.tree)),
        }
    }

    #[inline]
    fn rank(&self) -> (u64, u32, u64) {
        (self.count, self.depth, self.seq)
    }
}

impl PartialEq for OccurrenceNode {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for OccurrenceNode {}

// Lower (count, depth, seq) = higher priority, so the max-heap pops the
// lowest-ranked node first.
impl Ord for OccurrenceNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.rank().cmp(&self.rank())
    }
}

impl PartialOrd for OccurrenceNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of occurrence nodes.
///
/// Uses an 8-ary heap for better cache locality than a binary heap.
/// Popping by `(count, depth, seq)` gives the same order as stably re-sorting
/// the node list by `(count, depth)` after every append.
pub struct OccurrenceQueue {
    heap: OctonaryHeap<OccurrenceNode>,
    next_seq: u64,
}

impl OccurrenceQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create a new queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert a leaf for `token`. Leaves must be pushed in a fixed order for
    /// the result to be reproducible.
    pub fn push_leaf(&mut self, token: CompactString, count: u64) {
        let seq = self.take_seq();
        self.heap.push(OccurrenceNode::leaf(token, count, seq));
    }

    /// Pop the lowest-ranked node.
    pub fn pop(&mut self) -> Option<OccurrenceNode> {
        self.heap.pop()
    }

    /// Merge the two lowest-ranked nodes and push the result.
    ///
    /// Returns false when fewer than two nodes are queued.
    pub fn merge_lowest(&mut self) -> bool {
        if self.heap.len() < 2 {
            return false;
        }

        let (Some(first), Some(second)) = (self.heap.pop(), self.heap.pop()) else {
            return false;
        };

        let seq = self.take_seq();
        self.heap.push(OccurrenceNode::merge(first, second, seq));
        true
    }

    /// Merge until one node remains and return it.
    pub fn into_root(mut self) -> Option<OccurrenceNode> {
        while self.merge_lowest() {}
        self.heap.pop()
    }

    /// Number of queued nodes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl Default for OccurrenceQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: &str) -> MergeTree {
        MergeTree::Leaf(CompactString::new(token))
    }

    #[test]
    fn test_pop_order() {
        let mut queue = OccurrenceQueue::new();
        queue.push_leaf("a".into(), 3);
        queue.push_leaf("b".into(), 2);
        queue.push_leaf("c".into(), 2);

        // Count first, then insertion order
        assert_eq!(queue.pop().unwrap().tree, leaf("b"));
        assert_eq!(queue.pop().unwrap().tree, leaf("c"));
        assert_eq!(queue.pop().unwrap().tree, leaf("a"));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_depth_breaks_count_ties() {
        let mut queue = OccurrenceQueue::new();
        queue.push_leaf("a".into(), 1);
        queue.push_leaf("b".into(), 1);
        queue.push_leaf("c".into(), 2);

        assert!(queue.merge_lowest());
        // Merged (a, b) has count 2 and depth 1, so the leaf "c" ranks lower
        let first = queue.pop().unwrap();
        assert_eq!(first.tree, leaf("c"));
        let second = queue.pop().unwrap();
        assert_eq!(second.count, 2);
        assert_eq!(second.depth, 1);
    }

    #[test]
    fn test_into_root() {
        let mut queue = OccurrenceQueue::with_capacity(3);
        queue.push_leaf("a".into(), 3);
        queue.push_leaf("b".into(), 2);
        queue.push_leaf("c".into(), 2);

        let root = queue.into_root().unwrap();
        assert_eq!(root.count, 7);
        assert_eq!(root.depth, 2);
        assert_eq!(
            root.tree,
            MergeTree::Merge(
                Box::new(leaf("a")),
                Box::new(MergeTree::Merge(Box::new(leaf("b")), Box::new(leaf("c"))))
            )
        );
    }

    #[test]
    fn test_flatten() {
        let tree = MergeTree::Merge(
            Box::new(leaf("a")),
            Box::new(MergeTree::Merge(Box::new(leaf("b")), Box::new(leaf("c")))),
        );

        let codes = tree.flatten();
        assert_eq!(
            codes,
            vec![
                ("a".into(), "0".to_string()),
                ("b".into(), "10".to_string()),
                ("c".into(), "11".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_leaf_has_empty_code() {
        let codes = leaf("only").flatten();
        assert_eq!(codes, vec![("only".into(), String::new())]);
    }

    #[test]
    fn test_merge_lowest_needs_two_nodes() {
        let mut queue = OccurrenceQueue::new();
        assert!(!queue.merge_lowest());
        queue.push_leaf("a".into(), 1);
        assert!(!queue.merge_lowest());
        assert_eq!(queue.len(), 1);
    }
}
