pub mod defaults;

/// Settings for a game and the player taking part in it.
#[derive(Debug, Clone)]
pub struct Config {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    /// Seed for mine placement and move selection, fresh entropy if `None`
    pub seed: Option<u64>,
    pub inference: Inference,
}

impl Default for Config {
    fn default() -> Self {
        use defaults::*;
        Config {
            height: HEIGHT,
            width: WIDTH,
            mines: MINES,
            seed: None,
            inference: INFERENCE,
        }
    }
}

impl Config {
    /// Settings for the `n`th game of a series: the seed, if any, moves on by `n`.
    pub fn nth_game(&self, n: usize) -> Config {
        Config {
            seed: self.seed.map(|seed| seed.wrapping_add(n as u64)),
            ..self.clone()
        }
    }
}

/// How far [`MinesweeperAi::add_knowledge`](crate::MinesweeperAi::add_knowledge)
/// pushes its deductions before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inference {
    /// Repeat fact extraction and the subset rule until neither learns anything new
    Saturate,
    /// One extraction pass and one subset pass per observation, later observations pick up the rest
    SinglePass,
}

impl std::fmt::Display for Inference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saturate => write!(f, "saturate"),
            Self::SinglePass => write!(f, "single pass"),
        }
    }
}
