//! Disjoint-set forest over board cells.
//!
//! Every cell of the board is a node, addressed by its flat index. The forest
//! knows nothing about owners: callers only union cells of the same player
//! and reset cells back to singletons when an area has to be re-derived.

/// Parent pointers and ranks for `len` nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Builds the forest from vectors the caller already reserved, so that
    /// allocation failure can be reported instead of aborting.
    pub(crate) fn from_parts(parent: Vec<usize>, rank: Vec<u32>) -> Self {
        debug_assert_eq!(parent.len(), rank.len());
        Self { parent, rank }
    }

    /// Root of the set containing `x`, compressing the path behind it.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Root of the set containing `x` without touching the forest.
    ///
    /// Used by read-only probes; it costs the same walk as `find` but leaves
    /// the path uncompressed.
    pub fn root(&self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Merges the sets of `a` and `b` by rank and returns the surviving root.
    ///
    /// On a rank tie the root of `a` survives.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (winner, loser) = if self.rank[ra] < self.rank[rb] {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.parent[loser] = winner;
        if self.rank[winner] == self.rank[loser] {
            self.rank[winner] += 1;
        }
        winner
    }

    /// Turns `x` back into a singleton root of rank 0.
    ///
    /// Only sound when every node pointing at `x` is reset as well, which is
    /// how whole areas are shattered.
    pub fn reset(&mut self, x: usize) {
        self.parent[x] = x;
        self.rank[x] = 0;
    }

    pub fn is_root(&self, x: usize) -> bool {
        self.parent[x] == x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut sets = DisjointSets::new(4);
        for i in 0..4 {
            assert_eq!(sets.find(i), i);
            assert!(sets.is_root(i));
        }
    }

    #[test]
    fn test_union_prefers_first_on_tie() {
        let mut sets = DisjointSets::new(3);
        assert_eq!(sets.union(1, 2), 1);
        assert_eq!(sets.find(2), 1);
        // Rank of 1 is now higher, so it wins even as the second argument.
        assert_eq!(sets.union(0, 2), 1);
        assert_eq!(sets.find(0), 1);
    }

    #[test]
    fn test_union_same_set_is_noop() {
        let mut sets = DisjointSets::new(2);
        let r = sets.union(0, 1);
        let before = sets.clone();
        assert_eq!(sets.union(1, 0), r);
        assert_eq!(sets, before);
    }

    #[test]
    fn test_find_compresses_path() {
        let mut sets = DisjointSets::new(4);
        sets.union(0, 1);
        sets.union(2, 3);
        let root = sets.union(0, 2);
        let deep = if root == 0 { 3 } else { 1 };
        assert_eq!(sets.root(deep), root);
        sets.find(deep);
        assert_eq!(sets.parent[deep], root);
    }

    #[test]
    fn test_reset_restores_singleton() {
        let mut sets = DisjointSets::new(3);
        sets.union(0, 1);
        sets.union(0, 2);
        for i in 0..3 {
            sets.reset(i);
        }
        assert_eq!(sets, DisjointSets::new(3));
    }
}
