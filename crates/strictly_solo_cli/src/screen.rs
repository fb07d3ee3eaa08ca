//! What the player can type on each screen.

use std::str::FromStr;
use strictly_solo::{Mark, Position};

/// Input on the player selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickInput {
    /// Play as this mark.
    Mark(Mark),
    /// Leave the game.
    Quit,
}

impl PickInput {
    /// Parses a line; `None` if it means nothing here.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if is_quit(line) {
            return Some(Self::Quit);
        }
        Mark::from_str(line).ok().map(Self::Mark)
    }
}

/// Input while a game is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayInput {
    /// Play at `(row, col)`. Not range-checked; the engine does that.
    Cell {
        /// Row, 0-based.
        row: usize,
        /// Column, 0-based.
        col: usize,
    },
    /// Show the running score.
    Score,
    /// Abandon this game and start over with an empty board.
    Reset,
    /// Leave the game.
    Quit,
}

impl PlayInput {
    /// Parses a line.
    ///
    /// Accepts a single square number `1`-`9` as shown on the board, or a
    /// `row col` pair (0-based, space or comma separated).
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_ascii_lowercase();
        match line.as_str() {
            "s" | "score" => return Some(Self::Score),
            "r" | "reset" => return Some(Self::Reset),
            l if is_quit(l) => return Some(Self::Quit),
            _ => {}
        }

        let numbers: Vec<usize> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;

        match numbers.as_slice() {
            [square] => {
                let pos = Position::from_index(square.checked_sub(1)?)?;
                Some(Self::Cell {
                    row: pos.row(),
                    col: pos.col(),
                })
            }
            [row, col] => Some(Self::Cell {
                row: *row,
                col: *col,
            }),
            _ => None,
        }
    }
}

/// Input on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordInput {
    /// Another game in the same match.
    PlayAgain,
    /// Back to player selection with the score cleared.
    NewMatch,
    /// Leave the game.
    Quit,
}

impl RecordInput {
    /// Parses a line; `None` if it means nothing here.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "play" | "again" => Some(Self::PlayAgain),
            "n" | "new" => Some(Self::NewMatch),
            l if is_quit(l) => Some(Self::Quit),
            _ => None,
        }
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line, "q" | "quit" | "exit")
}
