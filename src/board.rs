use std::collections::BTreeSet;
use std::fmt;

use rand::seq::index;
use rand::Rng;

use crate::errors::BoardError;
use crate::{neighbours, Cell, Label};

/// Ground truth of a game: the board size and where the mines are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    mines: BTreeSet<Cell>,
    mines_found: BTreeSet<Cell>,
}

impl Board {
    /// Places `mines` mines on distinct cells, uniformly at random.
    pub fn new<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        mines: usize,
        rng: &mut R,
    ) -> Result<Board, BoardError> {
        check_size(height, width)?;
        if mines > height * width {
            return Err(BoardError::TooManyMines { height, width, mines });
        }

        let mines = index::sample(rng, height * width, mines)
            .into_iter()
            .map(|idx| (idx / width, idx % width))
            .collect();
        Ok(Board {
            height,
            width,
            mines,
            mines_found: BTreeSet::new(),
        })
    }

    /// A board with mines at exactly the given cells.
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Board, BoardError> {
        check_size(height, width)?;
        let mut board = Board {
            height,
            width,
            mines: BTreeSet::new(),
            mines_found: BTreeSet::new(),
        };
        for cell in mines {
            if !board.contains(cell) {
                return Err(BoardError::OutOfBounds(cell));
            }
            board.mines.insert(cell);
        }
        Ok(board)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, (row, col): Cell) -> bool {
        row < self.height && col < self.width
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// Number of cells that have to be revealed to win
    pub fn safe_count(&self) -> usize {
        self.height * self.width - self.mines.len()
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines among the (up to 8) cells touching `cell`.
    pub fn nearby_mines(&self, cell: Cell) -> Label {
        neighbours(cell, self.height, self.width)
            .filter(|neighbour| self.is_mine(*neighbour))
            .count()
    }

    /// Marks `cell` as believed to hold a mine.
    pub fn flag(&mut self, cell: Cell) {
        self.mines_found.insert(cell);
    }

    pub fn set_mines_found(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.mines_found = cells.into_iter().collect();
    }

    pub fn mines_found(&self) -> &BTreeSet<Cell> {
        &self.mines_found
    }

    /// True iff the flagged cells are exactly the mines.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}

fn check_size(height: usize, width: usize) -> Result<(), BoardError> {
    match height == 0 || width == 0 {
        true => Err(BoardError::Empty { height, width }),
        false => Ok(()),
    }
}

/* Example output for a 2x3 board with mines at (0, 0) and (1, 2)
-------
|X| | |
-------
| | |X|
-------
*/
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "--".repeat(self.width) + "-";
        for row in 0..self.height {
            writeln!(f, "{}", rule)?;
            for col in 0..self.width {
                match self.is_mine((row, col)) {
                    true => write!(f, "|X")?,
                    false => write!(f, "| ")?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", rule)
    }
}
