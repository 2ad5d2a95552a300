//! Height-balanced ordered set.
//!
//! Every player keeps the roots of their areas in one of these, keyed by the
//! `(x, y)` coordinates of the root cell. Insert, remove and lookup are all
//! `O(log n)`; the in-order walk enumerates the roots sorted by `x`, then `y`.

use std::cmp::Ordering;

type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    height: u32,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }
}

/// An AVL tree holding unique keys.
#[derive(Clone, Debug)]
pub struct AvlSet<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for AvlSet<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord> AvlSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (0 when empty).
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cur = &self.root;
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = &node.left,
                Ordering::Greater => cur = &node.right,
                Ordering::Equal => return true,
            }
        }
        false
    }

    /// Adds `key`. Returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let (root, added) = insert(self.root.take(), key);
        self.root = Some(root);
        if added {
            self.len += 1;
        }
        added
    }

    /// Removes `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(&self.root);
        iter
    }
}

/// In-order iterator over an [`AvlSet`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn push_left(&mut self, mut link: &'a Link<K>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some(&node.key)
    }
}

impl<'a, K: Ord> IntoIterator for &'a AvlSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tree surgery
// =============================================================================

fn height<K>(link: &Link<K>) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

fn update_height<K>(node: &mut Node<K>) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

/// Left height minus right height.
fn balance_factor<K>(node: &Node<K>) -> i64 {
    i64::from(height(&node.left)) - i64::from(height(&node.right))
}

fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update_height(&mut node);
    pivot.right = Some(node);
    update_height(&mut pivot);
    pivot
}

fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update_height(&mut node);
    pivot.left = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Restores the AVL property at `node`, assuming both subtrees satisfy it.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    update_height(&mut node);
    let bf = balance_factor(&node);
    if bf > 1 {
        if node.left.as_deref().is_some_and(|l| balance_factor(l) < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if bf < -1 {
        if node.right.as_deref().is_some_and(|r| balance_factor(r) > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert<K: Ord>(link: Link<K>, key: K) -> (Box<Node<K>>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(key), true);
    };
    let added = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, added) = insert(node.left.take(), key);
            node.left = Some(child);
            added
        }
        Ordering::Greater => {
            let (child, added) = insert(node.right.take(), key);
            node.right = Some(child);
            added
        }
        Ordering::Equal => false,
    };
    if added {
        (rebalance(node), true)
    } else {
        (node, false)
    }
}

/// Detaches the minimum of a non-empty subtree, returning what is left of the
/// subtree and the detached node.
fn take_min<K>(mut node: Box<Node<K>>) -> (Link<K>, Box<Node<K>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn remove<K: Ord>(link: Link<K>, key: &K) -> (Link<K>, bool) {
    let Some(mut node) = link else {
        return (None, false);
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), key);
            node.left = child;
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), key);
            node.right = child;
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => {
            let spliced = match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    // Two children: the in-order successor takes this node's place.
                    let (rest, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(rebalance(successor))
                }
            };
            (spliced, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_balanced<K: Ord>(link: &Link<K>) -> bool {
        match link {
            None => true,
            Some(n) => {
                balance_factor(n).abs() <= 1
                    && n.height == 1 + height(&n.left).max(height(&n.right))
                    && is_balanced(&n.left)
                    && is_balanced(&n.right)
            }
        }
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = AvlSet::new();
        assert!(set.insert((1u32, 2u32)));
        assert!(set.insert((0, 5)));
        assert!(!set.insert((1, 2)));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&(0, 5)));
        assert!(!set.contains(&(5, 0)));
    }

    #[test]
    fn test_iter_orders_by_x_then_y() {
        let mut set = AvlSet::new();
        for key in [(2u32, 0u32), (0, 3), (1, 1), (0, 1), (2, 2)] {
            set.insert(key);
        }
        let keys: Vec<_> = set.iter().copied().collect();
        assert_eq!(keys, vec![(0, 1), (0, 3), (1, 1), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_sorted_inserts_stay_logarithmic() {
        let mut set = AvlSet::new();
        for i in 0..1024u32 {
            set.insert(i);
        }
        assert!(is_balanced(&set.root));
        assert_eq!(set.height(), 11);
    }

    #[test]
    fn test_remove_node_with_two_children() {
        let mut set = AvlSet::new();
        for i in [50u32, 30, 70, 20, 40, 60, 80] {
            set.insert(i);
        }
        assert!(set.remove(&50));
        assert!(!set.contains(&50));
        assert!(!set.remove(&50));
        assert!(is_balanced(&set.root));
        let keys: Vec<_> = set.iter().copied().collect();
        assert_eq!(keys, vec![20, 30, 40, 60, 70, 80]);
    }

    #[test]
    fn test_random_workload_matches_btreeset() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut set = AvlSet::new();
        let mut model = std::collections::BTreeSet::new();
        for _ in 0..5000 {
            let key = rng.u32(0..200);
            if rng.bool() {
                assert_eq!(set.insert(key), model.insert(key));
            } else {
                assert_eq!(set.remove(&key), model.remove(&key));
            }
            assert_eq!(set.len(), model.len());
        }
        assert!(is_balanced(&set.root));
        assert!(set.iter().eq(model.iter()));
    }
}
