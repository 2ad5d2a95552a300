//! Text rendering of the board.
//!
//! Rows are printed from the top (`y = height - 1`) to the bottom (`y = 0`),
//! each terminated by a newline. Empty fields are `.`, owned fields show the
//! owner's id. With ten or more players every field is right-aligned in
//! `digits + 1` columns so that ids stay separated; otherwise fields take
//! one column each.
//!
//! Wide ids are never wrapped in brackets. The padding column is the only
//! separator, and a `digits + 1` field would have no room for two brackets.

use crate::constants::{EMPTY_GLYPH, WIDE_IDS_FROM};
use crate::gamma::{Game, PlayerId};

/// Columns taken by one field when there are `players` players.
pub fn field_width(players: u32) -> usize {
    if players < WIDE_IDS_FROM {
        1
    } else {
        players.to_string().len() + 1
    }
}

/// One field, padded to the board's field width.
pub fn render_field(owner: Option<PlayerId>, width: usize) -> String {
    match owner {
        Some(p) => format!("{p:>width$}"),
        None => format!("{EMPTY_GLYPH:>width$}"),
    }
}

/// The whole board as text.
pub fn render(game: &Game) -> String {
    let width = field_width(game.players());
    let cells = game.width() as usize * game.height() as usize;
    let mut out = String::with_capacity((cells * width) + game.height() as usize);
    for y in (0..game.height()).rev() {
        for x in 0..game.width() {
            out.push_str(&render_field(game.owner(x, y), width));
        }
        out.push('\n');
    }
    out
}

/// Reads rendered text back into rows of owners, top row first.
///
/// `None` if a field is neither the empty glyph nor a player id.
pub fn parse(text: &str, players: u32) -> Option<Vec<Vec<Option<PlayerId>>>> {
    let wide = field_width(players) > 1;
    text.lines()
        .map(|line| {
            if wide {
                line.split_whitespace().map(parse_field).collect()
            } else {
                line.chars()
                    .map(|c| parse_field(c.encode_utf8(&mut [0; 4])))
                    .collect()
            }
        })
        .collect()
}

fn parse_field(field: &str) -> Option<Option<PlayerId>> {
    let mut chars = field.chars();
    if chars.next() == Some(EMPTY_GLYPH) && chars.next().is_none() {
        return Some(None);
    }
    field.parse().ok().filter(|&p| p != 0).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_width() {
        assert_eq!(field_width(1), 1);
        assert_eq!(field_width(9), 1);
        assert_eq!(field_width(10), 3);
        assert_eq!(field_width(99), 3);
        assert_eq!(field_width(100), 4);
    }

    #[test]
    fn test_render_bottom_row_last() {
        let mut game = Game::new(3, 2, 2, 2).unwrap();
        assert!(game.play(1, 0, 0));
        assert!(game.play(2, 2, 1));
        assert_eq!(render(&game), "..2\n1..\n");
    }

    #[test]
    fn test_render_wide_ids() {
        let mut game = Game::new(2, 1, 12, 1).unwrap();
        assert!(game.play(11, 1, 0));
        assert_eq!(render(&game), "  . 11\n");
        assert_eq!(game.to_string(), "  . 11\n");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("1x\n", 2).is_none());
        assert!(parse(" 0  .\n", 12).is_none());
        assert_eq!(parse("1.\n", 2), Some(vec![vec![Some(1), None]]));
    }
}
