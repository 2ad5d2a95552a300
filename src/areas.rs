//! Incremental area bookkeeping.
//!
//! Placing a stone can only merge areas, so it is handled with unions on the
//! disjoint-set forest. Vacating a field (the first half of a golden move)
//! can split an area into up to four fragments; the affected area is
//! shattered back into singletons and rebuilt from the vacated field's
//! neighbours.
//!
//! The liberties cache of every player is kept exact: the number of empty
//! fields with at least one orthogonal neighbour owned by that player.
//!
//! These routines assume their preconditions were validated by the facade.

use tracing::trace;

use crate::board::VisitSet;
use crate::gamma::{Game, MoveError, PlayerId};

impl Game {
    /// Gives the empty field `i` to `player`, merging it with the player's
    /// neighbouring areas.
    pub(crate) fn claim(&mut self, player: PlayerId, i: usize) {
        debug_assert!(self.board.owner(i).is_none());

        // `i` stops being a liberty of everyone next to it.
        for owner in self.board.owners_around(i) {
            self.player_mut(owner).liberties -= 1;
        }
        let gained = self
            .board
            .neighbors(i)
            .filter(|&n| self.board.owner(n).is_none() && !self.board.touches(n, player, i))
            .count() as u64;

        self.board.set_owner(i, Some(player));
        self.empty -= 1;
        let p = self.player_mut(player);
        p.owned += 1;
        p.liberties += gained;

        let roots = self.neighbor_roots(player, i);
        for &r in &roots {
            let root = self.board.point(r);
            self.player_mut(player).remove_root(root);
        }
        let mut survivor = i;
        for &r in &roots {
            survivor = self.board.union(r, survivor);
        }
        debug_assert!(self.board.is_root(survivor));
        let root = self.board.point(survivor);
        self.player_mut(player).add_root(root);

        trace!(
            player,
            field = ?self.board.point(i),
            merged = roots.len(),
            ?root,
            "claimed field"
        );
    }

    /// Empties the owned field `i`, splitting its area if needed.
    ///
    /// Returns the previous owner.
    pub(crate) fn vacate(&mut self, i: usize) -> PlayerId {
        let Some(victim) = self.board.owner(i) else {
            unreachable!("vacate called on an empty field");
        };

        let old_root = self.board.find(i);
        let old_root = self.board.point(old_root);
        self.player_mut(victim).remove_root(old_root);

        // Shatter the whole area; its new shape is only known after a walk.
        let mut seen = VisitSet::new(self.board.len());
        let area = self.board.collect_area(i, victim, None, &mut seen);
        for &f in &area {
            self.board.reset_set(f);
        }

        self.board.set_owner(i, None);
        self.empty += 1;
        let lost = self
            .board
            .neighbors(i)
            .filter(|&n| self.board.owner(n).is_none() && !self.board.touches(n, victim, i))
            .count() as u64;
        let p = self.player_mut(victim);
        p.owned -= 1;
        p.liberties -= lost;
        for owner in self.board.owners_around(i) {
            self.player_mut(owner).liberties += 1;
        }

        // Rebuild one area per surviving fragment.
        seen.clear();
        let mut fragments = 0;
        for n in self.board.neighbors(i) {
            let fragment = self.board.collect_area(n, victim, None, &mut seen);
            let Some((&first, rest)) = fragment.split_first() else {
                continue;
            };
            let mut root = first;
            for &f in rest {
                root = self.board.union(root, f);
            }
            let root = self.board.point(root);
            self.player_mut(victim).add_root(root);
            fragments += 1;
        }

        trace!(
            victim,
            field = ?self.board.point(i),
            shattered = area.len(),
            fragments,
            "vacated field"
        );
        victim
    }

    /// Checks, without changing anything, that `player` may take the field
    /// `i` from its owner with a golden move: neither side may end up with
    /// more areas than the cap.
    pub(crate) fn probe_golden(
        &self,
        player: PlayerId,
        i: usize,
        seen: &mut VisitSet,
    ) -> Result<(), MoveError> {
        let Some(victim) = self.board.owner(i) else {
            return Err(MoveError::NotOccupied);
        };
        if victim == player {
            return Err(MoveError::OwnField);
        }

        // The new field joins `joined` areas into one, or starts a new one.
        let joined = self.distinct_roots(player, i) as u32;
        let attacker = self.player_ref(player).areas + 1 - joined;
        if attacker > self.area_cap {
            return Err(MoveError::AreaLimit);
        }

        let neighbors: Vec<usize> = self
            .board
            .neighbors(i)
            .filter(|&n| self.board.is_owned_by(n, victim))
            .collect();
        let fragments = if neighbors.len() <= 1 {
            neighbors.len()
        } else {
            seen.clear();
            neighbors
                .iter()
                .filter(|&&n| !self.board.collect_area(n, victim, Some(i), seen).is_empty())
                .count()
        };
        let defender = self.player_ref(victim).areas - 1 + fragments as u32;
        if defender > self.area_cap {
            return Err(MoveError::DefenderAreaLimit);
        }
        Ok(())
    }

    /// Distinct area roots among the neighbours of `i` owned by `player`,
    /// compressing paths on the way.
    fn neighbor_roots(&mut self, player: PlayerId, i: usize) -> Vec<usize> {
        let mut roots = Vec::with_capacity(4);
        for n in self.board.neighbors(i) {
            if self.board.is_owned_by(n, player) {
                let r = self.board.find(n);
                if !roots.contains(&r) {
                    roots.push(r);
                }
            }
        }
        roots
    }

    /// Read-only count of the distinct areas of `player` touching `i`.
    fn distinct_roots(&self, player: PlayerId, i: usize) -> usize {
        let mut roots = Vec::with_capacity(4);
        for n in self.board.neighbors(i) {
            if self.board.is_owned_by(n, player) {
                let r = self.board.root(n);
                if !roots.contains(&r) {
                    roots.push(r);
                }
            }
        }
        roots.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::gamma::Game;

    /// Brute-force liberties of `player`.
    fn liberties(game: &Game, player: u32) -> u64 {
        let b = &game.board;
        (0..b.len())
            .filter(|&i| b.owner(i).is_none() && b.count_owned_around(i, player) > 0)
            .count() as u64
    }

    #[test]
    fn test_merge_reduces_areas() {
        let mut game = Game::new(5, 5, 1, 5).unwrap();
        assert!(game.play(1, 0, 2));
        assert!(game.play(1, 2, 2));
        assert!(game.play(1, 1, 1));
        assert!(game.play(1, 1, 3));
        assert_eq!(game.areas(1), 4);
        assert!(game.play(1, 1, 2));
        assert_eq!(game.areas(1), 1);
        assert_eq!(game.area_roots(1).len(), 1);
        let root = game.area_root(1, 2).unwrap();
        for (x, y) in [(0, 2), (2, 2), (1, 1), (1, 3)] {
            assert_eq!(game.area_root(x, y), Some(root));
        }
    }

    #[test]
    fn test_liberties_follow_placements() {
        let mut game = Game::new(4, 4, 2, 4).unwrap();
        for (p, x, y) in [(1, 1, 1), (2, 2, 1), (1, 1, 2), (2, 0, 1), (1, 3, 3)] {
            assert!(game.play(p, x, y));
            for q in 1..=2 {
                assert_eq!(game.player_ref(q).liberties, liberties(&game, q));
            }
        }
    }

    #[test]
    fn test_vacate_splits_into_fragments() {
        // A plus shape; removing the centre leaves four arms.
        let mut game = Game::new(3, 3, 2, 5).unwrap();
        for (x, y) in [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)] {
            assert!(game.play(2, x, y));
        }
        assert_eq!(game.areas(2), 1);
        let centre = game.board.idx(1, 1);
        assert_eq!(game.vacate(centre), 2);
        assert_eq!(game.areas(2), 4);
        assert_eq!(game.busy_fields(2), 4);
        assert_eq!(game.player_ref(2).liberties, liberties(&game, 2));
        let mut roots = game.area_roots(2);
        roots.sort();
        assert_eq!(roots, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_vacate_keeps_ring_connected() {
        let mut game = Game::new(3, 3, 1, 1).unwrap();
        for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)] {
            assert!(game.play(1, x, y));
        }
        let i = game.board.idx(1, 0);
        game.vacate(i);
        assert_eq!(game.areas(1), 1);
        assert_eq!(game.player_ref(1).liberties, liberties(&game, 1));
    }

    #[test]
    fn test_probe_counts_defender_fragments() {
        let mut game = Game::new(3, 3, 2, 2).unwrap();
        for (x, y) in [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)] {
            assert!(game.play(2, x, y));
        }
        assert!(game.play(1, 0, 0));
        let mut seen = crate::board::VisitSet::new(game.board.len());
        let centre = game.board.idx(1, 1);
        let arm = game.board.idx(1, 0);
        assert_eq!(
            game.probe_golden(1, centre, &mut seen),
            Err(crate::gamma::MoveError::DefenderAreaLimit)
        );
        assert_eq!(game.probe_golden(1, arm, &mut seen), Ok(()));
    }
}
