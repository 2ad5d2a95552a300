//! Brute-force checks shared by the integration and property tests.
//!
//! Everything here recomputes the game state from the owner grid alone, so
//! it is independent of the incremental bookkeeping it checks.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use gamma_rust::board::Point;
use gamma_rust::gamma::Game;

/// Everything observable about a game, for before/after comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    owners: Vec<Option<u32>>,
    roots: Vec<Option<Point>>,
    players: Vec<(u64, u32, u64, u32, Vec<Point>)>,
    empty: u64,
}

pub fn snapshot(game: &Game) -> Snapshot {
    let mut owners = Vec::new();
    let mut roots = Vec::new();
    for y in 0..game.height() {
        for x in 0..game.width() {
            owners.push(game.owner(x, y));
            roots.push(game.area_root(x, y));
        }
    }
    let players = (1..=game.players())
        .map(|p| {
            let player = game.player(p).unwrap();
            (
                player.owned(),
                player.areas(),
                player.liberties(),
                player.golden_used(),
                game.area_roots(p),
            )
        })
        .collect();
    Snapshot {
        owners,
        roots,
        players,
        empty: game.empty_fields(),
    }
}

/// Owners of every field, indexed by `y * width + x`.
fn owner_grid(game: &Game) -> Vec<Option<u32>> {
    let mut grid = Vec::new();
    for y in 0..game.height() {
        for x in 0..game.width() {
            grid.push(game.owner(x, y));
        }
    }
    grid
}

fn neighbors(width: u32, height: u32, (x, y): Point) -> Vec<Point> {
    let mut out = Vec::new();
    if x > 0 {
        out.push((x - 1, y));
    }
    if x + 1 < width {
        out.push((x + 1, y));
    }
    if y > 0 {
        out.push((x, y - 1));
    }
    if y + 1 < height {
        out.push((x, y + 1));
    }
    out
}

/// Connected components of `player`'s fields in an owner grid, by flood fill.
fn grid_components(
    width: u32,
    height: u32,
    grid: &[Option<u32>],
    player: u32,
) -> Vec<BTreeSet<Point>> {
    let owner = |(x, y): Point| grid[y as usize * width as usize + x as usize];
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if owner((x, y)) != Some(player) || seen.contains(&(x, y)) {
                continue;
            }
            let mut comp = BTreeSet::new();
            let mut stack = vec![(x, y)];
            seen.insert((x, y));
            while let Some(pt) = stack.pop() {
                comp.insert(pt);
                for n in neighbors(width, height, pt) {
                    if owner(n) == Some(player) && seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
            out.push(comp);
        }
    }
    out
}

/// Connected components of `player`'s fields.
pub fn components(game: &Game, player: u32) -> Vec<BTreeSet<Point>> {
    grid_components(game.width(), game.height(), &owner_grid(game), player)
}

/// Empty fields next to at least one field of `player`.
pub fn liberties(game: &Game, player: u32) -> u64 {
    let mut count = 0;
    for y in 0..game.height() {
        for x in 0..game.width() {
            if game.owner(x, y).is_none()
                && neighbors(game.width(), game.height(), (x, y))
                    .iter()
                    .any(|n| game.owner(n.0, n.1) == Some(player))
            {
                count += 1;
            }
        }
    }
    count
}

/// Checks every invariant of the game against a full recomputation.
pub fn audit(game: &Game) -> Result<(), String> {
    let total = u64::from(game.width()) * u64::from(game.height());
    let busy: u64 = (1..=game.players()).map(|p| game.busy_fields(p)).sum();
    if game.empty_fields() + busy != total {
        return Err(format!(
            "conservation: {} empty + {busy} busy != {total}",
            game.empty_fields()
        ));
    }

    for p in 1..=game.players() {
        let comps = components(game, p);
        let owned: usize = comps.iter().map(BTreeSet::len).sum();
        if owned as u64 != game.busy_fields(p) {
            return Err(format!("player {p}: owns {owned}, counter says {}", game.busy_fields(p)));
        }
        if comps.len() as u32 != game.areas(p) {
            return Err(format!(
                "player {p}: {} components, counter says {}",
                comps.len(),
                game.areas(p)
            ));
        }
        if comps.len() as u32 > game.area_cap() {
            return Err(format!("player {p}: {} areas over the cap", comps.len()));
        }

        // Each component has exactly one root, distinct across components,
        // and the root index holds exactly those roots.
        let mut roots = BTreeMap::new();
        for (k, comp) in comps.iter().enumerate() {
            let found: BTreeSet<_> = comp
                .iter()
                .map(|&(x, y)| game.area_root(x, y).unwrap())
                .collect();
            if found.len() != 1 {
                return Err(format!("player {p}: component {k} has roots {found:?}"));
            }
            let root = *found.iter().next().unwrap();
            if !comp.contains(&root) {
                return Err(format!("player {p}: root {root:?} outside its component"));
            }
            if roots.insert(root, k).is_some() {
                return Err(format!("player {p}: root {root:?} shared by two components"));
            }
        }
        let index = game.area_roots(p);
        let expected: Vec<_> = roots.keys().copied().collect();
        if index != expected {
            return Err(format!("player {p}: root index {index:?}, expected {expected:?}"));
        }

        let libs = liberties(game, p);
        let cached = game.player(p).unwrap().liberties();
        if libs != cached {
            return Err(format!("player {p}: liberties {cached}, expected {libs}"));
        }
        if game.areas(p) >= game.area_cap() && game.free_fields(p) != libs {
            return Err(format!("player {p}: free fields {} at the cap", game.free_fields(p)));
        }
    }
    Ok(())
}

/// Whether `player` may take `(x, y)` with a golden move, decided on a copy
/// of the owner grid: both players' areas are recounted from scratch after
/// the field changes hands.
pub fn golden_move_allowed(game: &Game, player: u32, x: u32, y: u32) -> bool {
    if game.player(player).is_none() || game.golden_used(player) >= 1 {
        return false;
    }
    let victim = match game.owner(x, y) {
        Some(q) if q != player => q,
        _ => return false,
    };
    let (width, height) = (game.width(), game.height());
    let mut grid = owner_grid(game);
    grid[y as usize * width as usize + x as usize] = Some(player);
    let cap = game.area_cap() as usize;
    grid_components(width, height, &grid, player).len() <= cap
        && grid_components(width, height, &grid, victim).len() <= cap
}

/// Golden-move feasibility by recounting areas for every candidate field.
pub fn golden_possible_by_search(game: &Game, player: u32) -> bool {
    (0..game.height())
        .any(|y| (0..game.width()).any(|x| golden_move_allowed(game, player, x, y)))
}
