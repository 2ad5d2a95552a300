//! Per-player counters and the index of area roots.

use crate::avl::AvlSet;
use crate::board::Point;
use crate::gamma::PlayerId;

/// State of one player.
///
/// `areas` always equals the size of `roots`; the engine keeps the two in
/// step on every merge, shatter and rebuild.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    /// Number of fields owned
    pub(crate) owned: u64,
    /// Number of distinct areas owned
    pub(crate) areas: u32,
    /// Golden moves already made
    pub(crate) golden_used: u32,
    /// Empty fields adjacent to at least one owned field
    pub(crate) liberties: u64,
    /// Root fields of the areas, keyed by coordinates
    pub(crate) roots: AvlSet<Point>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            owned: 0,
            areas: 0,
            golden_used: 0,
            liberties: 0,
            roots: AvlSet::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn owned(&self) -> u64 {
        self.owned
    }

    pub fn areas(&self) -> u32 {
        self.areas
    }

    pub fn golden_used(&self) -> u32 {
        self.golden_used
    }

    pub fn liberties(&self) -> u64 {
        self.liberties
    }

    /// Roots of the player's areas, ordered by `x`, then `y`.
    pub fn roots(&self) -> impl Iterator<Item = Point> + '_ {
        self.roots.iter().copied()
    }

    pub(crate) fn add_root(&mut self, root: Point) {
        if self.roots.insert(root) {
            self.areas += 1;
        }
    }

    pub(crate) fn remove_root(&mut self, root: Point) {
        if self.roots.remove(&root) {
            self.areas -= 1;
        }
    }
}
