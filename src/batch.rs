//! Line-oriented front end.
//!
//! The first meaningful line of the input picks the mode and the game:
//!
//! - `B width height players areas` - batch mode
//! - `I width height players areas` - interactive mode
//!
//! In batch mode every further line is one command:
//!
//! - `m player x y` - move, prints `1` or `0`
//! - `g player x y` - golden move, prints `1` or `0`
//! - `b player` - busy fields
//! - `f player` - free fields
//! - `q player` - whether a golden move is possible, `1` or `0`
//! - `p` - the board
//!
//! Lines starting with `#` and empty lines are skipped. A line that cannot be
//! parsed, or a mode line for which no game can be created, is answered with
//! `ERROR <line number>` on the error stream. A created game is acknowledged
//! with `OK <line number>`.
//!
//! ## Example
//!
//! ```
//! use gamma_rust::batch::{Command, parse_command};
//!
//! assert_eq!(parse_command("m 1 0 0"), Some(Command::Move { player: 1, x: 0, y: 0 }));
//! assert_eq!(parse_command("m1 0 0"), None);
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::constants::{BATCH_MODE, COMMENT, INTERACTIVE_MODE};
use crate::gamma::{Game, GameConfig, PlayerId};

/// One batch command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { player: PlayerId, x: u32, y: u32 },
    GoldenMove { player: PlayerId, x: u32, y: u32 },
    BusyFields(PlayerId),
    FreeFields(PlayerId),
    GoldenPossible(PlayerId),
    Print,
}

/// Mode requested by the first line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Batch(GameConfig),
    Interactive(GameConfig),
}

/// Parses a mode line such as `B 10 10 2 3`.
pub fn parse_mode(line: &str) -> Option<Mode> {
    let (letter, args) = split_letter(line)?;
    let [width, height, players, areas] = parse_numbers::<4>(args)?;
    let config = GameConfig {
        width,
        height,
        players,
        areas,
    };
    match letter {
        BATCH_MODE => Some(Mode::Batch(config)),
        INTERACTIVE_MODE => Some(Mode::Interactive(config)),
        _ => None,
    }
}

/// Parses one batch command line (without its newline).
pub fn parse_command(line: &str) -> Option<Command> {
    let (letter, args) = split_letter(line)?;
    let command = match letter {
        'm' => {
            let [player, x, y] = parse_numbers::<3>(args)?;
            Command::Move { player, x, y }
        }
        'g' => {
            let [player, x, y] = parse_numbers::<3>(args)?;
            Command::GoldenMove { player, x, y }
        }
        'b' => Command::BusyFields(parse_numbers::<1>(args)?[0]),
        'f' => Command::FreeFields(parse_numbers::<1>(args)?[0]),
        'q' => Command::GoldenPossible(parse_numbers::<1>(args)?[0]),
        'p' => {
            parse_numbers::<0>(args)?;
            Command::Print
        }
        _ => return None,
    };
    Some(command)
}

/// Splits the command letter off; it must be followed by whitespace or
/// nothing at all.
fn split_letter(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let letter = chars.next()?;
    let rest = chars.as_str();
    match rest.chars().next() {
        Some(c) if !c.is_whitespace() => None,
        _ => Some((letter, rest)),
    }
}

/// Exactly `N` whitespace-separated unsigned decimal numbers fitting `u32`.
fn parse_numbers<const N: usize>(args: &str) -> Option<[u32; N]> {
    let mut out = [0; N];
    let mut words = args.split_whitespace();
    for slot in &mut out {
        let word = words.next()?;
        if !word.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = word.parse().ok()?;
    }
    match words.next() {
        Some(_) => None,
        None => Some(out),
    }
}

/// Whether a line carries nothing to execute.
pub fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT)
}

// =============================================================================
// Numbered input
// =============================================================================

/// Input lines together with their 1-based numbers.
pub struct NumberedLines<R> {
    input: R,
    number: u64,
    buf: Vec<u8>,
}

impl<R: BufRead> NumberedLines<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            number: 0,
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    ///
    /// Lines that are not valid UTF-8 come back as `Some((n, None))`.
    pub fn next_line(&mut self) -> io::Result<Option<(u64, Option<String>)>> {
        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        let line = String::from_utf8(std::mem::take(&mut self.buf)).ok();
        Ok(Some((self.number, line)))
    }
}

/// Reads up to the first valid mode line, creating its game.
///
/// Invalid lines are reported on `err`; `None` means the input ended first.
pub fn select_mode<R: BufRead, E: Write>(
    lines: &mut NumberedLines<R>,
    err: &mut E,
) -> io::Result<Option<(Mode, Game, u64)>> {
    while let Some((number, line)) = lines.next_line()? {
        let Some(line) = line else {
            writeln!(err, "ERROR {number}")?;
            continue;
        };
        if is_skipped(&line) {
            continue;
        }
        let Some(mode) = parse_mode(&line) else {
            writeln!(err, "ERROR {number}")?;
            continue;
        };
        let config = match mode {
            Mode::Batch(c) | Mode::Interactive(c) => c,
        };
        match Game::with_config(&config) {
            Ok(game) => return Ok(Some((mode, game, number))),
            Err(e) => {
                warn!(line = number, error = %e, "cannot create game");
                writeln!(err, "ERROR {number}")?;
            }
        }
    }
    Ok(None)
}

// =============================================================================
// Batch engine
// =============================================================================

/// Batch mode state: the game being played.
pub struct BatchEngine {
    game: Game,
}

impl BatchEngine {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    /// Executes a command and returns what it prints, newline included.
    pub fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Move { player, x, y } => flag(self.game.play(player, x, y)),
            Command::GoldenMove { player, x, y } => flag(self.game.golden_move(player, x, y)),
            Command::BusyFields(player) => format!("{}\n", self.game.busy_fields(player)),
            Command::FreeFields(player) => format!("{}\n", self.game.free_fields(player)),
            Command::GoldenPossible(player) => flag(self.game.golden_possible(player)),
            Command::Print => self.game.to_string(),
        }
    }

    /// Runs commands until the input ends.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        lines: &mut NumberedLines<R>,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        while let Some((number, line)) = lines.next_line()? {
            let command = match line.as_deref() {
                Some(l) if is_skipped(l) => continue,
                Some(l) => parse_command(l),
                None => None,
            };
            match command {
                Some(command) => {
                    debug!(line = number, ?command, "batch command");
                    out.write_all(self.execute(command).as_bytes())?;
                    out.flush()?;
                }
                None => writeln!(err, "ERROR {number}")?,
            }
        }
        Ok(())
    }
}

fn flag(value: bool) -> String {
    String::from(if value { "1\n" } else { "0\n" })
}
