//! Board positions written as text, and checks whether a probed cell is provably safe.
//!
//! A configuration has one line per row, squares separated by whitespace:
//!
//! ```text
//! 1 _ ?
//! 1 1 _
//! ```
//!
//! `_` is a covered cell, `*` a flagged mine, `s` a cell known to be safe,
//! `?` the covered cell to check (the probe) and `0`-`8` a revealed clue.
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use datafrog::Iteration;
use varisat::{CnfFormula, ExtendFormula, Lit, Solver};

use crate::errors::{OracleError, ParseError};
use crate::logging::targets;
use crate::{neighbours, Cell, Col, Label, Row};

/// A board square
#[derive(Copy, Clone, Debug, Ord, PartialOrd, PartialEq, Eq, Hash)]
pub enum Square {
    /// Covered cell
    Empty,

    /// Mine cell
    Mine,

    /// Mine-free cell
    Safe,

    /// Move to check
    Probe,

    /// Cell labeled with number of mines around
    Number(Label),
}

impl Square {
    fn parse(label: &str, row: Row, col: Col) -> Result<Square, ParseError> {
        match label {
            "_" => Ok(Square::Empty),
            "*" => Ok(Square::Mine),
            "s" => Ok(Square::Safe),
            "?" => Ok(Square::Probe),
            _ => match label.parse::<Label>() {
                Ok(num) if num <= 8 => Ok(Square::Number(num)),
                Ok(num) => Err(ParseError::InvalidLabel { row, col, label: num }),
                Err(_) => Err(ParseError::InvalidSquare {
                    row,
                    col,
                    label: label.to_string(),
                }),
            },
        }
    }

    /// Covered squares are the ones whose content is unknown.
    pub fn is_covered(self) -> bool {
        match self {
            Square::Empty | Square::Probe => true,
            _ => false,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Square::Empty => write!(f, "_"),
            Square::Mine => write!(f, "*"),
            Square::Safe => write!(f, "s"),
            Square::Probe => write!(f, "?"),
            Square::Number(num) => write!(f, "{}", num),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ProbeResult {
    Safe,
    Unsafe,
    Unknown,
}

/// A rectangular board position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    board: Vec<Vec<Square>>,
    probe: Option<Cell>,
}

impl Configuration {
    /// A `height`x`width` configuration with every cell covered.
    pub fn covered(height: usize, width: usize) -> Configuration {
        Configuration {
            board: vec![vec![Square::Empty; width]; height],
            probe: None,
        }
    }

    pub fn height(&self) -> usize {
        self.board.len()
    }

    pub fn width(&self) -> usize {
        self.board.first().map_or(0, Vec::len)
    }

    pub fn probe(&self) -> Option<Cell> {
        self.probe
    }

    pub fn square(&self, (row, col): Cell) -> Option<Square> {
        self.board.get(row).and_then(|squares| squares.get(col)).copied()
    }

    /// Overwrites the square at `cell`. Out-of-bounds cells are ignored.
    /// A new probe replaces the previous one, which becomes a covered cell.
    pub fn set(&mut self, cell: Cell, square: Square) {
        if self.square(cell).is_none() {
            return;
        }
        if self.probe == Some(cell) {
            self.probe = None;
        }
        if square == Square::Probe {
            if let Some((row, col)) = self.probe.replace(cell) {
                self.board[row][col] = Square::Empty;
            }
        }
        self.board[cell.0][cell.1] = square;
    }

    fn cells(&self) -> impl Iterator<Item = (Cell, Square)> + '_ {
        self.board.iter().enumerate().flat_map(|(row, squares)| {
            squares
                .iter()
                .enumerate()
                .map(move |(col, square)| ((row, col), *square))
        })
    }

    fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        neighbours(cell, self.height(), self.width())
    }

    /// Everything the clues settle one at a time: a clue already surrounded by
    /// its number of mines clears its covered neighbours, a clue needing all of its
    /// covered neighbours turns them into mines. Repeated until nothing changes.
    ///
    /// `true` means the cell is safe.
    pub fn propagate(&self) -> HashMap<Cell, bool> {
        let mut verified: HashMap<Cell, bool> = HashMap::new();

        let mut iteration = Iteration::new();
        let squares = iteration.variable::<(Row, Col, Square)>("board");
        squares.extend(self.cells().map(|((row, col), square)| (row, col, square)));

        while iteration.changed() {
            // clues to re-evaluate: new ones, and the neighbours of newly settled cells
            let mut clues = BTreeSet::new();
            for &(row, col, square) in squares.recent.borrow().elements.iter() {
                match square {
                    Square::Number(_) => {
                        clues.insert((row, col));
                    }
                    Square::Mine | Square::Safe => {
                        clues.extend(self.neighbours((row, col)).filter(|&neighbour| {
                            match self.square(neighbour) {
                                Some(Square::Number(_)) => true,
                                _ => false,
                            }
                        }));
                    }
                    _ => {}
                }
            }

            let mut settled = vec![];
            for clue in clues {
                let n = match self.square(clue) {
                    Some(Square::Number(n)) => n,
                    _ => continue,
                };

                let mut neighbours_mines = 0;
                let mut neighbours_covered = vec![];
                for neighbour in self.neighbours(clue) {
                    match (self.square(neighbour), verified.get(&neighbour)) {
                        (Some(Square::Mine), _) | (_, Some(false)) => neighbours_mines += 1,
                        (Some(square), None) if square.is_covered() => {
                            neighbours_covered.push(neighbour)
                        }
                        _ => {}
                    }
                }

                if neighbours_covered.is_empty() {
                    continue;
                }

                // All covered neighbours are safe if `n == neighbours_mines`,
                // all of them are mines if `n == neighbours_mines + neighbours_covered.len()`
                let safe = if n == neighbours_mines {
                    true
                } else if n == neighbours_mines + neighbours_covered.len() {
                    false
                } else {
                    continue;
                };
                for (row, col) in neighbours_covered {
                    verified.insert((row, col), safe);
                    let square = if safe { Square::Safe } else { Square::Mine };
                    settled.push((row, col, square));
                }
            }

            squares.extend(settled);
        }

        squares.complete();
        verified
    }

    /// Whether single-clue deduction alone settles `probe`.
    pub fn local_verdict(&self, probe: Cell) -> ProbeResult {
        match self.square(probe) {
            Some(Square::Mine) => return ProbeResult::Unsafe,
            Some(Square::Safe) | Some(Square::Number(_)) => return ProbeResult::Safe,
            _ => {}
        }
        match self.propagate().get(&probe) {
            Some(true) => ProbeResult::Safe,
            Some(false) => ProbeResult::Unsafe,
            None => ProbeResult::Unknown,
        }
    }

    /// Whether the clues taken together force `probe` to be safe or a mine.
    ///
    /// Every clue becomes an "exactly k of these covered cells" constraint, and a SAT
    /// solver is asked whether `probe` can be a mine and whether it can be safe.
    pub fn exact_verdict(&self, probe: Cell) -> Result<ProbeResult, OracleError> {
        match self.square(probe) {
            None => return Err(OracleError::OutOfBounds(probe)),
            Some(Square::Mine) => return Ok(ProbeResult::Unsafe),
            Some(Square::Safe) | Some(Square::Number(_)) => return Ok(ProbeResult::Safe),
            Some(_) => {}
        }

        let mut solver = Solver::new();
        solver.add_formula(&self.to_cnf()?);

        let probe_is_mine = self.mine_literal(probe);
        let mut can_be = |lit: Lit| -> Result<bool, OracleError> {
            solver.assume(&[lit]);
            solver
                .solve()
                .map_err(|err| OracleError::Solver(err.to_string()))
        };
        let can_be_mine = can_be(probe_is_mine)?;
        let can_be_safe = can_be(!probe_is_mine)?;
        log::debug!(
            target: targets::ORACLE,
            "Probe {:?}: can be mine {}, can be safe {}",
            probe,
            can_be_mine,
            can_be_safe
        );

        match (can_be_mine, can_be_safe) {
            (true, true) => Ok(ProbeResult::Unknown),
            (false, true) => Ok(ProbeResult::Safe),
            (true, false) => Ok(ProbeResult::Unsafe),
            (false, false) => Err(OracleError::Inconsistent),
        }
    }

    // literal "`cell` holds a mine", variables are numbered from 1 in row-major order
    fn mine_literal(&self, (row, col): Cell) -> Lit {
        Lit::from_dimacs((row * self.width() + col + 1) as isize)
    }

    fn to_cnf(&self) -> Result<CnfFormula, OracleError> {
        let mut formula = CnfFormula::new();

        for (cell, square) in self.cells() {
            let n = match square {
                Square::Number(n) => n,
                _ => continue,
            };

            let mut neighbours_mines = 0;
            let mut neighbours_covered = vec![];
            for neighbour in self.neighbours(cell) {
                match self.square(neighbour) {
                    Some(Square::Mine) => neighbours_mines += 1,
                    Some(square) if square.is_covered() => neighbours_covered.push(neighbour),
                    _ => {}
                }
            }

            let mines_left = n
                .checked_sub(neighbours_mines)
                .filter(|&left| left <= neighbours_covered.len())
                .ok_or(OracleError::Inconsistent)?;
            let covered = neighbours_covered.len();

            // at most `mines_left`: every `mines_left + 1` cells include a safe one
            for cells in subsets_of_size(&neighbours_covered, mines_left + 1) {
                let clause: Vec<Lit> = cells.iter().map(|&cell| !self.mine_literal(cell)).collect();
                formula.add_clause(&clause);
            }
            // at least `mines_left`: every `covered - mines_left + 1` cells include a mine
            if mines_left > 0 {
                for cells in subsets_of_size(&neighbours_covered, covered - mines_left + 1) {
                    let clause: Vec<Lit> =
                        cells.iter().map(|&cell| self.mine_literal(cell)).collect();
                    formula.add_clause(&clause);
                }
            }
        }

        Ok(formula)
    }
}

/// All subsets of `items` with exactly `size` elements, in order.
fn subsets_of_size<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return vec![vec![]];
    }
    if items.len() < size {
        return vec![];
    }
    let (first, rest) = (&items[0], &items[1..]);
    let mut subsets: Vec<Vec<T>> = subsets_of_size(rest, size - 1)
        .into_iter()
        .map(|mut subset| {
            subset.insert(0, first.clone());
            subset
        })
        .collect();
    subsets.extend(subsets_of_size(rest, size));
    subsets
}

impl FromStr for Configuration {
    type Err = ParseError;

    fn from_str(raw_conf: &str) -> Result<Configuration, ParseError> {
        let mut board: Vec<Vec<Square>> = vec![];
        let mut probe = None;

        let lines = raw_conf.lines().filter(|line| !line.trim().is_empty());
        for (row, line) in lines.enumerate() {
            let mut squares = vec![];
            for (col, label) in line.split_whitespace().enumerate() {
                let square = Square::parse(label, row, col)?;
                if square == Square::Probe {
                    if let Some(previous) = probe.replace((row, col)) {
                        return Err(ParseError::MultipleProbes(previous, (row, col)));
                    }
                }
                squares.push(square);
            }

            if let Some(first) = board.first() {
                if first.len() != squares.len() {
                    return Err(ParseError::RaggedRow {
                        row,
                        expected: first.len(),
                        found: squares.len(),
                    });
                }
            }
            board.push(squares);
        }

        if board.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Configuration { board, probe })
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, squares) in self.board.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, square) in squares.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", square)?;
            }
        }
        Ok(())
    }
}
