//! Interactive terminal mode.
//!
//! The board is drawn in the alternate screen and the terminal cursor marks
//! the selected field. Arrow keys move the cursor, space places a stone, `g`
//! makes a golden move, `c` skips the turn and `Ctrl-D` ends the game. The
//! turn passes to the next player able to move; when nobody can, the game is
//! over and the final board and scores are printed.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};
use tracing::{debug, info};

use crate::gamma::{Game, PlayerId};
use crate::render::{field_width, render_field};

/// Cursor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Place,
    Golden,
    Skip,
    Quit,
    Ignore,
}

/// Maps a key press to an action.
pub fn decode_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') | KeyCode::Char('D') => Action::Quit,
            _ => Action::Ignore,
        };
    }
    match key.code {
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
        KeyCode::Left => Action::Move(Direction::Left),
        KeyCode::Right => Action::Move(Direction::Right),
        KeyCode::Char(' ') => Action::Place,
        KeyCode::Char('g') | KeyCode::Char('G') => Action::Golden,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::Skip,
        _ => Action::Ignore,
    }
}

/// Selected field. `y` grows upwards, like the board's rows on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
}

impl Cursor {
    /// Centre of a `width` x `height` board.
    pub fn centered(width: u32, height: u32) -> Self {
        Self {
            x: (width - 1) / 2,
            y: (height - 1) / 2,
        }
    }

    /// Moves one field, staying on the board.
    pub fn step(self, direction: Direction, width: u32, height: u32) -> Self {
        let Cursor { x, y } = self;
        match direction {
            Direction::Up => Cursor {
                x,
                y: (y + 1).min(height - 1),
            },
            Direction::Down => Cursor {
                x,
                y: y.saturating_sub(1),
            },
            Direction::Left => Cursor {
                x: x.saturating_sub(1),
                y,
            },
            Direction::Right => Cursor {
                x: (x + 1).min(width - 1),
                y,
            },
        }
    }
}

/// Interactive game state.
pub struct Interactive {
    game: Game,
    cursor: Cursor,
    /// Player to move; `None` once the game is over
    current: Option<PlayerId>,
}

impl Interactive {
    pub fn new(game: Game) -> Self {
        let cursor = Cursor::centered(game.width(), game.height());
        let current = game.next_player(game.players());
        Self {
            game,
            cursor,
            current,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn current(&self) -> Option<PlayerId> {
        self.current
    }

    /// Applies one action. Returns `false` once the game is over.
    pub fn apply(&mut self, action: Action) -> bool {
        let Some(player) = self.current else {
            return false;
        };
        let Cursor { x, y } = self.cursor;
        match action {
            Action::Move(direction) => {
                self.cursor = self
                    .cursor
                    .step(direction, self.game.width(), self.game.height());
            }
            Action::Place => {
                if self.game.play(player, x, y) {
                    self.pass_turn(player);
                }
            }
            Action::Golden => {
                if self.game.golden_move(player, x, y) {
                    self.pass_turn(player);
                }
            }
            Action::Skip => self.pass_turn(player),
            Action::Quit => self.current = None,
            Action::Ignore => {}
        }
        self.current.is_some()
    }

    fn pass_turn(&mut self, player: PlayerId) {
        self.current = self.game.next_player(player);
        debug!(from = player, to = ?self.current, "turn passed");
    }

    /// Final scores, one `PLAYER <id> <busy fields>` line per player.
    pub fn summary(&self) -> String {
        (1..=self.game.players())
            .map(|p| format!("PLAYER {p} {}\n", self.game.busy_fields(p)))
            .collect()
    }

    /// Plays the game on the terminal until it ends, then prints the final
    /// board and scores to stdout.
    pub fn run(&mut self) -> Result<()> {
        let fw = field_width(self.game.players());
        let (cols, rows) = terminal::size().context("cannot read terminal size")?;
        let needed_cols = u64::from(self.game.width()) * fw as u64;
        let needed_rows = u64::from(self.game.height()) + 1;
        if needed_cols > u64::from(cols) || needed_rows > u64::from(rows) {
            bail!(
                "board needs {needed_cols}x{needed_rows} characters, terminal has {cols}x{rows}"
            );
        }

        info!(
            width = self.game.width(),
            height = self.game.height(),
            players = self.game.players(),
            "interactive game started"
        );
        {
            let _guard = RawScreen::enter()?;
            let mut stdout = io::stdout();
            self.draw(&mut stdout)?;
            while self.current.is_some() {
                let Event::Key(key) = event::read().context("cannot read key")? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                self.apply(decode_key(key));
                self.draw(&mut stdout)?;
            }
        }

        let mut stdout = io::stdout();
        write!(stdout, "{}{}", self.game, self.summary())?;
        stdout.flush()?;
        info!("interactive game finished");
        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> Result<()> {
        let fw = field_width(self.game.players());
        let height = self.game.height();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for y in (0..height).rev() {
            for x in 0..self.game.width() {
                write!(out, "{}", render_field(self.game.owner(x, y), fw))?;
            }
            write!(out, "\r\n")?;
        }
        if let Some(player) = self.current {
            if let Some(status) = self.game.player_summary(player) {
                write!(out, "{status}")?;
            }
        }
        // The sizes were checked against the terminal, so they fit in u16.
        let row = (height - 1 - self.cursor.y) as u16;
        let col = (self.cursor.x as usize * fw + fw - 1) as u16;
        queue!(out, cursor::MoveTo(col, row))?;
        out.flush()?;
        Ok(())
    }
}

/// Raw mode plus the alternate screen, restored on drop.
struct RawScreen;

impl RawScreen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("cannot enable raw mode")?;
        let guard = RawScreen;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Show)
            .context("cannot enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
