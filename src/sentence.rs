use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;

use crate::logging::targets;
use crate::Cell;

/// A clue over a set of cells: exactly `count` of `cells` are mines, the rest are safe.
///
/// After construction a sentence only ever shrinks, through [`mark_mine`](Sentence::mark_mine)
/// and [`mark_safe`](Sentence::mark_safe), and `count <= cells.len()` holds throughout.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Sentence {
        Sentence {
            cells: BTreeSet::from_iter(cells),
            count,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// An empty sentence says nothing and can be dropped.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, if every one of them must be a mine.
    ///
    /// `None` means no new fact, not the absence of mines.
    pub fn known_mines(&self) -> Option<BTreeSet<Cell>> {
        if !self.is_empty() && self.count == self.cells.len() {
            Some(self.cells.clone())
        } else {
            None
        }
    }

    /// All cells, if none of them can be a mine.
    pub fn known_safes(&self) -> Option<BTreeSet<Cell>> {
        if !self.is_empty() && self.count == 0 {
            Some(self.cells.clone())
        } else {
            None
        }
    }

    /// Takes a cell known to be a mine out of the sentence, together with the mine it accounts for.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            match self.count.checked_sub(1) {
                Some(count) => self.count = count,
                None => {
                    log::warn!(target: targets::KNOWLEDGE, "Mine {:?} contradicts {}", cell, self)
                }
            }
        }
    }

    /// Takes a cell known to be safe out of the sentence, the count is unaffected.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Subset rule: if `subset`'s cells all lie within `self`, the remaining cells of `self`
    /// hold exactly `self.count - subset.count` mines.
    ///
    /// Returns `None` when the rule doesn't apply, or when `subset` is `self` again.
    pub fn subtract(&self, subset: &Sentence) -> Option<Sentence> {
        if subset == self || !subset.cells.is_subset(&self.cells) {
            return None;
        }
        let derived = Sentence::new(
            self.cells.difference(&subset.cells).cloned(),
            self.count.checked_sub(subset.count)?,
        );
        if derived.count > derived.len() {
            log::warn!(target: targets::KNOWLEDGE, "{} contradicts {}", subset, self);
            return None;
        }
        Some(derived)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (row, col)) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", row, col)?;
        }
        write!(f, "}} = {}", self.count)
    }
}
