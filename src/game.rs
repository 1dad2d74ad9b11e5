//! Plays a [`MinesweeperAi`] against a [`Board`]: click, report the clue, repeat.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::MinesweeperAi;
use crate::board::Board;
use crate::config::Config;
use crate::configuration::{Configuration, Square};
use crate::errors::BoardError;
use crate::logging::targets;
use crate::{Cell, Label};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    /// Every safe cell revealed, or nothing left to play and all mines found
    Won,
    /// Clicked a mine
    Lost(Cell),
    /// Nothing left to play but the found mines are not the real ones
    Stalled,
}

/// What a single call to [`Game::step`] did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Revealed {
        cell: Cell,
        count: Label,
        /// The cell was not known to be safe when it was clicked
        guessed: bool,
    },
    Finished(Status),
}

pub struct Game {
    board: Board,
    ai: MinesweeperAi,
    revealed: BTreeMap<Cell, Label>,
    status: Status,
}

impl Game {
    /// A fresh random board and player, both seeded from `config.seed` if given.
    pub fn new(config: &Config) -> Result<Game, BoardError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::new(config.height, config.width, config.mines, &mut rng)?;
        // the player gets its own stream, drawn from the board's
        let ai = MinesweeperAi::from_config(&Config {
            seed: Some(rng.gen()),
            ..config.clone()
        });
        log::debug!(
            target: targets::GAME,
            "{}x{} board with {} mines, {} inference",
            config.height,
            config.width,
            config.mines,
            ai.inference()
        );
        Ok(Game::from_parts(board, ai))
    }

    pub fn from_parts(board: Board, ai: MinesweeperAi) -> Game {
        Game {
            board,
            ai,
            revealed: BTreeMap::new(),
            status: Status::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ai(&self) -> &MinesweeperAi {
        &self.ai
    }

    /// Revealed cells with their clues
    pub fn revealed(&self) -> &BTreeMap<Cell, Label> {
        &self.revealed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Lets the player make one move.
    pub fn step(&mut self) -> Step {
        if self.status != Status::InProgress {
            return Step::Finished(self.status);
        }
        if self.revealed.len() == self.board.safe_count() {
            return self.finish(Status::Won);
        }

        let (cell, guessed) = match self.ai.make_safe_move() {
            Some(cell) => (cell, false),
            None => match self.ai.make_random_move() {
                Some(cell) => (cell, true),
                None if self.board.won() => return self.finish(Status::Won),
                None => return self.finish(Status::Stalled),
            },
        };

        if self.board.is_mine(cell) {
            return self.finish(Status::Lost(cell));
        }

        let count = self.board.nearby_mines(cell);
        log::debug!(
            target: targets::GAME,
            "{} {:?}, {} nearby",
            if guessed { "Guessed" } else { "Played" },
            cell,
            count
        );
        self.revealed.insert(cell, count);
        self.ai.add_knowledge(cell, count);
        self.board.set_mines_found(self.ai.mines().iter().cloned());

        Step::Revealed { cell, count, guessed }
    }

    /// Steps until the game is over.
    pub fn run(&mut self) -> Status {
        loop {
            if let Step::Finished(status) = self.step() {
                return status;
            }
        }
    }

    fn finish(&mut self, status: Status) -> Step {
        log::info!(
            target: targets::GAME,
            "Game over after {} moves: {:?}",
            self.revealed.len(),
            status
        );
        self.status = status;
        Step::Finished(status)
    }

    /// The position as the player sees it: clues, known mines and covered cells.
    pub fn configuration(&self) -> Configuration {
        let mut conf = Configuration::covered(self.board.height(), self.board.width());
        for &cell in self.ai.mines() {
            conf.set(cell, Square::Mine);
        }
        for (&cell, &count) in &self.revealed {
            conf.set(cell, Square::Number(count));
        }
        conf
    }
}
