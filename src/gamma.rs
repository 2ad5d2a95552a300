//! The game facade: construction, moves and queries.
//!
//! All public operations validate their input before touching any state,
//! so a rejected call never changes the board, the counters or the root
//! indices. The boolean and counting operations mirror the rules of the
//! game ("this move cannot be made" is just `false`); the `try_*` variants
//! carry the reason for callers that want to log or display it.

use std::fmt;

use tracing::debug;

use crate::board::{Board, Point, VisitSet};
use crate::constants::GOLDEN_MOVES;
use crate::player::Player;

/// Player ids run from 1 to the number of players.
pub type PlayerId = u32;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Player id is 0 or above the number of players
    InvalidPlayer,
    /// Coordinates are outside the board
    OutOfBounds,
    /// Field is already taken
    Occupied,
    /// Golden move aimed at an empty field
    NotOccupied,
    /// Golden move aimed at the player's own field
    OwnField,
    /// Move would give the player more areas than allowed
    AreaLimit,
    /// Golden move budget is used up
    NoGoldenMove,
    /// Golden move would split the attacked player into too many areas
    DefenderAreaLimit,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidPlayer => write!(f, "no such player"),
            MoveError::OutOfBounds => write!(f, "field outside the board"),
            MoveError::Occupied => write!(f, "field is not empty"),
            MoveError::NotOccupied => write!(f, "field is empty"),
            MoveError::OwnField => write!(f, "field already belongs to the player"),
            MoveError::AreaLimit => write!(f, "too many areas"),
            MoveError::NoGoldenMove => write!(f, "golden move already used"),
            MoveError::DefenderAreaLimit => write!(f, "attacked player would own too many areas"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Why a game could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Width or height is zero
    ZeroDimension,
    /// Number of players is zero
    ZeroPlayers,
    /// Board does not fit in the address space
    TooLarge,
    /// Allocation of the board or the players failed
    OutOfMemory,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::ZeroDimension => write!(f, "board dimensions must be positive"),
            SetupError::ZeroPlayers => write!(f, "at least one player is required"),
            SetupError::TooLarge => write!(f, "board is too large"),
            SetupError::OutOfMemory => write!(f, "not enough memory for the game"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Parameters of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub players: u32,
    /// Maximum number of areas a player may own at once
    pub areas: u32,
}

/// A game of gamma.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    pub(crate) area_cap: u32,
    pub(crate) empty: u64,
}

impl Game {
    /// Creates a game on an empty `width` x `height` board.
    pub fn new(width: u32, height: u32, players: u32, areas: u32) -> Result<Self, SetupError> {
        Self::with_config(&GameConfig {
            width,
            height,
            players,
            areas,
        })
    }

    pub fn with_config(config: &GameConfig) -> Result<Self, SetupError> {
        if config.width == 0 || config.height == 0 {
            return Err(SetupError::ZeroDimension);
        }
        if config.players == 0 {
            return Err(SetupError::ZeroPlayers);
        }

        let board = Board::new(config.width, config.height)?;
        let count = usize::try_from(config.players).map_err(|_| SetupError::TooLarge)?;
        let mut players = Vec::new();
        players
            .try_reserve_exact(count)
            .map_err(|_| SetupError::OutOfMemory)?;
        players.extend((1..=config.players).map(Player::new));

        debug!(?config, "new game");
        Ok(Self {
            board,
            players,
            area_cap: config.areas,
            empty: u64::from(config.width) * u64::from(config.height),
        })
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Places a stone of `player` on the empty field `(x, y)`.
    pub fn play(&mut self, player: PlayerId, x: u32, y: u32) -> bool {
        self.try_play(player, x, y).is_ok()
    }

    pub fn try_play(&mut self, player: PlayerId, x: u32, y: u32) -> Result<(), MoveError> {
        let result = self.check_play(player, x, y);
        match result {
            Ok(i) => {
                self.claim(player, i);
                debug!(player, x, y, "move");
                Ok(())
            }
            Err(err) => {
                debug!(player, x, y, %err, "move rejected");
                Err(err)
            }
        }
    }

    fn check_play(&self, player: PlayerId, x: u32, y: u32) -> Result<usize, MoveError> {
        self.check_player(player)?;
        let i = self.check_field(x, y)?;
        if self.board.owner(i).is_some() {
            return Err(MoveError::Occupied);
        }
        if self.board.count_owned_around(i, player) == 0
            && self.player_ref(player).areas >= self.area_cap
        {
            return Err(MoveError::AreaLimit);
        }
        Ok(i)
    }

    /// Takes the field `(x, y)` from another player, once per game.
    ///
    /// Legal only when afterwards neither `player` nor the previous owner
    /// has more areas than allowed. A rejected golden move changes nothing.
    pub fn golden_move(&mut self, player: PlayerId, x: u32, y: u32) -> bool {
        self.try_golden_move(player, x, y).is_ok()
    }

    pub fn try_golden_move(&mut self, player: PlayerId, x: u32, y: u32) -> Result<(), MoveError> {
        let result = self.check_golden_move(player, x, y);
        match result {
            Ok(i) => {
                let victim = self.vacate(i);
                self.claim(player, i);
                self.player_mut(player).golden_used += 1;
                debug!(player, victim, x, y, "golden move");
                Ok(())
            }
            Err(err) => {
                debug!(player, x, y, %err, "golden move rejected");
                Err(err)
            }
        }
    }

    fn check_golden_move(&self, player: PlayerId, x: u32, y: u32) -> Result<usize, MoveError> {
        self.check_player(player)?;
        let i = self.check_field(x, y)?;
        match self.board.owner(i) {
            None => return Err(MoveError::NotOccupied),
            Some(owner) if owner == player => return Err(MoveError::OwnField),
            Some(_) => {}
        }
        if self.player_ref(player).golden_used >= GOLDEN_MOVES {
            return Err(MoveError::NoGoldenMove);
        }
        let mut seen = VisitSet::new(self.board.len());
        self.probe_golden(player, i, &mut seen)?;
        Ok(i)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of fields owned by `player`; 0 for an invalid player.
    pub fn busy_fields(&self, player: PlayerId) -> u64 {
        self.player(player).map_or(0, Player::owned)
    }

    /// Number of fields `player` could take with a regular move.
    ///
    /// Below the area cap that is every empty field; at the cap only empty
    /// fields next to the player's own count.
    pub fn free_fields(&self, player: PlayerId) -> u64 {
        match self.player(player) {
            None => 0,
            Some(p) if p.areas >= self.area_cap => p.liberties,
            Some(_) => self.empty,
        }
    }

    /// Whether `player` can make a golden move right now.
    ///
    /// Exact: every candidate field is probed the same way
    /// [`Game::golden_move`] checks it, without changing the game.
    pub fn golden_possible(&self, player: PlayerId) -> bool {
        let Some(p) = self.player(player) else {
            return false;
        };
        if p.golden_used >= GOLDEN_MOVES {
            return false;
        }
        let others: u64 = self.players.iter().map(Player::owned).sum::<u64>() - p.owned;
        if others == 0 {
            return false;
        }
        let mut seen = VisitSet::new(self.board.len());
        let mut candidate = |i: usize| {
            matches!(self.board.owner(i), Some(owner) if owner != player)
                && self.probe_golden(player, i, &mut seen).is_ok()
        };
        if p.areas < self.area_cap {
            return (0..self.board.len()).any(candidate);
        }
        // At the cap only fields next to the player's own areas can be taken.
        let mut walk = VisitSet::new(self.board.len());
        p.roots().any(|(x, y)| {
            self.board
                .collect_area(self.board.idx(x, y), player, None, &mut walk)
                .into_iter()
                .any(|f| self.board.neighbors(f).any(&mut candidate))
        })
    }

    /// Whether `player` has any legal move, regular or golden.
    pub fn can_move(&self, player: PlayerId) -> bool {
        self.free_fields(player) > 0 || self.golden_possible(player)
    }

    /// The next player after `last`, in cyclic order, who can still move.
    ///
    /// `last` itself is considered last. Returns `None` when nobody can move.
    pub fn next_player(&self, last: PlayerId) -> Option<PlayerId> {
        let n = self.players();
        let start = if (1..=n).contains(&last) { last } else { 0 };
        (1..=n)
            .map(|step| ((u64::from(start) + u64::from(step) - 1) % u64::from(n)) as u32 + 1)
            .find(|&p| self.can_move(p))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.board.width()
    }

    pub fn height(&self) -> u32 {
        self.board.height()
    }

    /// Number of players.
    pub fn players(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn area_cap(&self) -> u32 {
        self.area_cap
    }

    pub fn empty_fields(&self) -> u64 {
        self.empty
    }

    /// Owner of `(x, y)`; `None` if the field is empty or off the board.
    pub fn owner(&self, x: u32, y: u32) -> Option<PlayerId> {
        self.board.get(x, y)
    }

    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        let i = usize::try_from(player).ok()?.checked_sub(1)?;
        self.players.get(i)
    }

    pub fn areas(&self, player: PlayerId) -> u32 {
        self.player(player).map_or(0, Player::areas)
    }

    pub fn golden_used(&self, player: PlayerId) -> u32 {
        self.player(player).map_or(0, Player::golden_used)
    }

    /// Root fields of the areas of `player`, ordered by `x`, then `y`.
    pub fn area_roots(&self, player: PlayerId) -> Vec<Point> {
        self.player(player)
            .map(|p| p.roots().collect())
            .unwrap_or_default()
    }

    /// Root field of the area containing `(x, y)`, if the field is owned.
    pub fn area_root(&self, x: u32, y: u32) -> Option<Point> {
        self.board.get(x, y)?;
        let i = self.board.idx(x, y);
        Some(self.board.point(self.board.root(i)))
    }

    /// One-line status of `player`: id, busy fields, free fields and a
    /// trailing `G` while a golden move is possible.
    pub fn player_summary(&self, player: PlayerId) -> Option<String> {
        let p = self.player(player)?;
        let golden = if self.golden_possible(player) { " G" } else { "" };
        Some(format!(
            "PLAYER {} {} {}{golden}",
            p.id(),
            p.owned(),
            self.free_fields(player)
        ))
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn check_player(&self, player: PlayerId) -> Result<(), MoveError> {
        self.player(player).map(|_| ()).ok_or(MoveError::InvalidPlayer)
    }

    fn check_field(&self, x: u32, y: u32) -> Result<usize, MoveError> {
        if self.board.contains(x, y) {
            Ok(self.board.idx(x, y))
        } else {
            Err(MoveError::OutOfBounds)
        }
    }

    /// Player by a validated id.
    pub(crate) fn player_ref(&self, player: PlayerId) -> &Player {
        &self.players[player as usize - 1]
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player as usize - 1]
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}
