//! The player: accumulates clues as [`Sentence`]s and deduces mines and safe cells from them.
use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::config::{defaults, Config, Inference};
use crate::logging::targets;
use crate::sentence::Sentence;
use crate::{neighbours, Cell, Label};

/// Minesweeper player for a board of fixed size.
///
/// Feed it one revealed cell at a time through [`add_knowledge`](MinesweeperAi::add_knowledge),
/// then ask for the next cell to click with [`make_safe_move`](MinesweeperAi::make_safe_move),
/// falling back to [`make_random_move`](MinesweeperAi::make_random_move).
// `moves_made`, `mines` and `safes` only ever grow. Played cells are safe,
// and no cell is both safe and a mine. Sentences never mention a cell
// whose status is already known, except ones still waiting to be extracted.
#[derive(Debug, Clone)]
pub struct MinesweeperAi {
    height: usize,
    width: usize,
    inference: Inference,
    pub(crate) moves_made: BTreeSet<Cell>,
    pub(crate) mines: BTreeSet<Cell>,
    pub(crate) safes: BTreeSet<Cell>,
    pub(crate) knowledge: Vec<Sentence>,
    rng: StdRng,
}

impl MinesweeperAi {
    pub fn new(height: usize, width: usize) -> MinesweeperAi {
        MinesweeperAi::with_rng(height, width, defaults::INFERENCE, StdRng::from_entropy())
    }

    pub fn from_config(config: &Config) -> MinesweeperAi {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MinesweeperAi::with_rng(config.height, config.width, config.inference, rng)
    }

    pub fn with_rng(
        height: usize,
        width: usize,
        inference: Inference,
        rng: StdRng,
    ) -> MinesweeperAi {
        MinesweeperAi {
            height,
            width,
            inference,
            moves_made: BTreeSet::new(),
            mines: BTreeSet::new(),
            safes: BTreeSet::new(),
            knowledge: vec![],
            rng,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn inference(&self) -> Inference {
        self.inference
    }

    /// Cells that have been clicked
    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    /// Cells proven to hold a mine
    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Cells proven to be free of mines, played or not
    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Records `cell` as a mine and removes it from every sentence.
    pub fn mark_mine(&mut self, cell: Cell) {
        if !self.mines.insert(cell) {
            return;
        }
        log::debug!(target: targets::KNOWLEDGE, "Mine at {:?}", cell);
        for sentence in self.knowledge.iter_mut() {
            sentence.mark_mine(cell);
        }
    }

    /// Records `cell` as safe and removes it from every sentence.
    pub fn mark_safe(&mut self, cell: Cell) {
        if !self.safes.insert(cell) {
            return;
        }
        log::debug!(target: targets::KNOWLEDGE, "Safe at {:?}", cell);
        for sentence in self.knowledge.iter_mut() {
            sentence.mark_safe(cell);
        }
    }

    /// Takes in the clue revealed by clicking `cell`: `count` of its neighbours are mines.
    ///
    /// The clue becomes a new sentence over the neighbours whose status is still unknown,
    /// after which mines and safe cells are extracted and new sentences derived with the
    /// subset rule. With [`Inference::Saturate`] this repeats until nothing new is learned.
    pub fn add_knowledge(&mut self, cell: Cell, count: Label) {
        log::trace!(target: targets::KNOWLEDGE, "Clue {} at {:?}", count, cell);
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let mut unknown = BTreeSet::new();
        let mut count = count;
        for neighbour in neighbours(cell, self.height, self.width) {
            if self.mines.contains(&neighbour) {
                count = count.saturating_sub(1);
            } else if !self.moves_made.contains(&neighbour) && !self.safes.contains(&neighbour) {
                unknown.insert(neighbour);
            }
        }
        let sentence = Sentence::new(unknown, count);
        if sentence.count() > sentence.len() {
            log::warn!(
                target: targets::KNOWLEDGE,
                "Clue at {:?} asks for more mines than {}",
                cell,
                sentence
            );
        }
        self.knowledge.push(sentence);

        loop {
            let learned_facts = self.extract_facts();
            let learned_sentences = self.infer_subsets();
            if self.inference == Inference::SinglePass || !(learned_facts || learned_sentences) {
                break;
            }
        }
        log::debug!(
            target: targets::INFERENCE,
            "{} sentences, {} mines, {} safes after {:?}",
            self.knowledge.len(),
            self.mines.len(),
            self.safes.len(),
            cell
        );
    }

    // Marks the cells of every sentence that is all mines or all safe.
    // Marking changes other sentences, possibly ones later in the list,
    // so the list is walked by index and each sentence read as it is now.
    // Returns whether anything new was learned.
    pub(crate) fn extract_facts(&mut self) -> bool {
        let (n_mines, n_safes) = (self.mines.len(), self.safes.len());

        for index in 0..self.knowledge.len() {
            if let Some(safes) = self.knowledge[index].known_safes() {
                for cell in safes {
                    self.mark_safe(cell);
                }
            }
            if let Some(mines) = self.knowledge[index].known_mines() {
                for cell in mines {
                    self.mark_mine(cell);
                }
            }
        }

        (n_mines, n_safes) != (self.mines.len(), self.safes.len())
    }

    // Applies the subset rule to every ordered pair of sentences.
    // Duplicates and empty sentences are dropped first, then all derivations
    // are collected from the remaining, unchanging list and appended afterwards.
    // Returns whether a new sentence was added.
    pub(crate) fn infer_subsets(&mut self) -> bool {
        let mut seen = BTreeSet::new();
        self.knowledge
            .retain(|sentence| !sentence.is_empty() && seen.insert(sentence.clone()));

        let mut derived = vec![];
        for subset in &self.knowledge {
            for superset in &self.knowledge {
                if let Some(sentence) = superset.subtract(subset) {
                    if seen.insert(sentence.clone()) {
                        log::trace!(
                            target: targets::INFERENCE,
                            "{} from {} and {}",
                            sentence,
                            superset,
                            subset
                        );
                        derived.push(sentence);
                    }
                }
            }
        }

        let learned = !derived.is_empty();
        self.knowledge.extend(derived);
        learned
    }

    /// A cell known to be safe that hasn't been played yet, if there is one.
    pub fn make_safe_move(&mut self) -> Option<Cell> {
        let moves_made = &self.moves_made;
        let cell = self
            .safes
            .iter()
            .filter(|cell| !moves_made.contains(*cell))
            .choose(&mut self.rng)
            .cloned();
        log::trace!(target: targets::MOVES, "Safe move: {:?}", cell);
        cell
    }

    /// A uniformly random cell that hasn't been played and isn't a known mine.
    ///
    /// Returns `None` once every cell is either played or a known mine.
    pub fn make_random_move(&mut self) -> Option<Cell> {
        if self.mines.len() + self.moves_made.len() >= self.height * self.width {
            return None;
        }

        let (moves_made, mines) = (&self.moves_made, &self.mines);
        let width = self.width;
        let cell = (0..self.height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .filter(|cell| !moves_made.contains(cell) && !mines.contains(cell))
            .choose(&mut self.rng);
        log::trace!(target: targets::MOVES, "Random move: {:?}", cell);
        cell
    }
}
