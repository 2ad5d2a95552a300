use crate::dsu::DisjointSets;
use crate::gamma::{PlayerId, SetupError};

/// Board coordinates `(x, y)`: column first, row second.
pub type Point = (u32, u32);

/// A `width` x `height` grid of fields.
///
/// Each field stores its owner and doubles as a node of the disjoint-set
/// forest whose sets are the areas of the board. Fields are addressed by a
/// flat index `y * width + x`.
#[derive(Clone, Debug)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Option<PlayerId>>,
    sets: DisjointSets,
}

impl Board {
    /// Allocates an empty board, reporting allocation failure instead of
    /// aborting.
    pub fn new(width: u32, height: u32) -> Result<Self, SetupError> {
        let len = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| SetupError::TooLarge)?;

        let mut cells = Vec::new();
        let mut parent = Vec::new();
        let mut rank = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SetupError::OutOfMemory)?;
        parent
            .try_reserve_exact(len)
            .map_err(|_| SetupError::OutOfMemory)?;
        rank.try_reserve_exact(len)
            .map_err(|_| SetupError::OutOfMemory)?;
        cells.resize(len, None);
        parent.extend(0..len);
        rank.resize(len, 0);

        Ok(Self {
            width,
            height,
            cells,
            sets: DisjointSets::from_parts(parent, rank),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Flat index of an in-bounds point.
    pub fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn point(&self, i: usize) -> Point {
        let w = self.width as usize;
        ((i % w) as u32, (i / w) as u32)
    }

    /// Owner of `(x, y)`; `None` for empty or out-of-bounds fields.
    pub fn get(&self, x: u32, y: u32) -> Option<PlayerId> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    pub fn owner(&self, i: usize) -> Option<PlayerId> {
        self.cells[i]
    }

    pub fn is_owned_by(&self, i: usize, player: PlayerId) -> bool {
        self.cells[i] == Some(player)
    }

    pub(crate) fn set_owner(&mut self, i: usize, owner: Option<PlayerId>) {
        self.cells[i] = owner;
    }

    /// Orthogonal neighbours of field `i` in the order left, up, right, down.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + use<> {
        let w = self.width as usize;
        let len = self.cells.len();
        let x = i % w;
        let left = (x > 0).then(|| i - 1);
        let up = (i + w < len).then(|| i + w);
        let right = (x + 1 < w).then(|| i + 1);
        let down = (i >= w).then(|| i - w);
        [left, up, right, down].into_iter().flatten()
    }

    /// Number of neighbours of `i` owned by `player`.
    pub fn count_owned_around(&self, i: usize, player: PlayerId) -> usize {
        self.neighbors(i)
            .filter(|&n| self.is_owned_by(n, player))
            .count()
    }

    /// Whether `i` has a neighbour owned by `player`, ignoring field `skip`.
    pub fn touches(&self, i: usize, player: PlayerId, skip: usize) -> bool {
        self.neighbors(i)
            .any(|n| n != skip && self.is_owned_by(n, player))
    }

    /// Distinct owners of the neighbours of `i`, at most four.
    pub fn owners_around(&self, i: usize) -> Vec<PlayerId> {
        let mut owners = Vec::with_capacity(4);
        for n in self.neighbors(i) {
            if let Some(p) = self.cells[n] {
                if !owners.contains(&p) {
                    owners.push(p);
                }
            }
        }
        owners
    }

    // -------------------------------------------------------------------------
    // Disjoint-set forest
    // -------------------------------------------------------------------------

    pub fn find(&mut self, i: usize) -> usize {
        self.sets.find(i)
    }

    pub fn root(&self, i: usize) -> usize {
        self.sets.root(i)
    }

    pub fn union(&mut self, a: usize, b: usize) -> usize {
        self.sets.union(a, b)
    }

    pub(crate) fn reset_set(&mut self, i: usize) {
        self.sets.reset(i);
    }

    pub fn is_root(&self, i: usize) -> bool {
        self.sets.is_root(i)
    }

    /// Visits the area of `player` containing `start` without entering
    /// `blocked`, marking every field in `seen`. Returns the fields visited.
    ///
    /// Iterative so that large areas cannot overflow the stack.
    pub fn collect_area(
        &self,
        start: usize,
        player: PlayerId,
        blocked: Option<usize>,
        seen: &mut VisitSet,
    ) -> Vec<usize> {
        let mut out = Vec::new();
        if Some(start) == blocked || !self.is_owned_by(start, player) || !seen.insert(start) {
            return out;
        }
        let mut stack = vec![start];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            for n in self.neighbors(cur) {
                if Some(n) != blocked && self.is_owned_by(n, player) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        out
    }
}

/// Scratch "visited" marks for one walk over the board.
///
/// Marks are generation stamps, so [`VisitSet::clear`] is `O(1)` and one set
/// can serve many walks inside the same call.
#[derive(Clone, Debug)]
pub struct VisitSet {
    stamps: Vec<u32>,
    epoch: u32,
}

impl VisitSet {
    pub fn new(len: usize) -> Self {
        Self {
            stamps: vec![0; len],
            epoch: 1,
        }
    }

    /// Marks `i`; returns `false` if it was already marked.
    pub fn insert(&mut self, i: usize) -> bool {
        if self.stamps[i] == self.epoch {
            return false;
        }
        self.stamps[i] = self.epoch;
        true
    }

    pub fn contains(&self, i: usize) -> bool {
        self.stamps[i] == self.epoch
    }

    pub fn clear(&mut self) {
        if self.epoch == u32::MAX {
            self.stamps.fill(0);
            self.epoch = 1;
        } else {
            self.epoch += 1;
        }
    }
}
