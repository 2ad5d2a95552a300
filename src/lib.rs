//! Gamma-Rust: the rules engine of the territory game gamma.
//!
//! Players take turns claiming empty fields of a rectangular board. Each
//! player may own at most a fixed number of *areas* (maximal groups of
//! orthogonally connected fields), and once per game may make a *golden
//! move*: take a field from another player, provided neither of them ends up
//! with too many areas.
//!
//! Areas are tracked incrementally with a disjoint-set forest over the
//! fields, plus a balanced tree of area roots per player, so a move costs
//! far less than a rescan of the board.
//!
//! ## Modules
//!
//! - [`constants`] - Rules constants and glyphs
//! - [`dsu`] - Disjoint-set forest
//! - [`avl`] - Ordered set of area roots
//! - [`board`] - Fields, neighbours and area walks
//! - [`player`] - Per-player counters
//! - [`gamma`] - The game: moves and queries
//! - [`areas`] - Merging, splitting and liberties bookkeeping
//! - [`render`] - Text form of the board
//! - [`batch`] - Line-oriented front end
//! - [`interactive`] - Terminal front end
//!
//! ## Example
//!
//! ```
//! use gamma_rust::gamma::Game;
//!
//! let mut game = Game::new(10, 10, 2, 3).unwrap();
//! assert!(game.play(1, 0, 0));
//! assert_eq!(game.busy_fields(1), 1);
//! assert_eq!(game.free_fields(1), 99);
//! assert!(!game.golden_possible(1));
//! print!("{game}");
//! ```

pub mod areas;
pub mod avl;
pub mod batch;
pub mod board;
pub mod constants;
pub mod dsu;
pub mod gamma;
pub mod interactive;
pub mod player;
pub mod render;
