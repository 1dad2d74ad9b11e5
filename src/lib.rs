//! A Minesweeper game together with a player that deduces safe cells and mines
//! from the revealed clues.
//!
//! The player ([`MinesweeperAi`]) keeps its knowledge as a list of [`Sentence`]s,
//! each saying "exactly `count` of these cells are mines". Every revealed cell adds
//! one sentence, after which known mines and safe cells are extracted and the
//! subset rule derives tighter sentences from overlapping ones.
//!
//! ```
//! use minesweeper_ai::{Board, MinesweeperAi};
//!
//! let board = Board::from_mines(3, 3, vec![(1, 1)]).unwrap();
//! let mut ai = MinesweeperAi::new(3, 3);
//!
//! for &cell in &[(0, 0), (0, 1), (1, 0)] {
//!     ai.add_knowledge(cell, board.nearby_mines(cell));
//! }
//! assert!(ai.mines().contains(&(1, 1)));
//! ```
//!
//! Positions can also be written down in a small text format and checked with
//! [`Configuration`], which answers whether a probed cell is provably safe.
use std::cmp::min;

pub mod ai;
pub mod board;
pub mod config;
pub mod configuration;
pub mod errors;
pub mod game;
pub mod logging;
pub mod sentence;

#[cfg(test)]
mod test;

pub use crate::ai::MinesweeperAi;
pub use crate::board::Board;
pub use crate::config::{Config, Inference};
pub use crate::configuration::{Configuration, ProbeResult, Square};
pub use crate::errors::{BoardError, OracleError, ParseError};
pub use crate::game::{Game, Status, Step};
pub use crate::sentence::Sentence;

pub type Row = usize;
pub type Col = usize;
/// Number of mines around a revealed cell
pub type Label = usize;

/// A board coordinate, `(row, col)`, zero based.
pub type Cell = (Row, Col);

/// The in-bounds cells touching `cell` horizontally, vertically or diagonally.
/// `cell` itself is not included.
pub fn neighbours(cell: Cell, height: usize, width: usize) -> impl Iterator<Item = Cell> {
    let (row, col) = cell;
    let rows = row.saturating_sub(1)..min(row + 2, height);
    let cols = col.saturating_sub(1)..min(col + 2, width);

    rows.flat_map(move |r| cols.clone().map(move |c| (r, c)))
        .filter(move |&neighbour| neighbour != cell)
}
