use crate::config::Inference;

pub const HEIGHT: usize = 16;
pub const WIDTH: usize = 16;
pub const MINES: usize = 40;
pub const INFERENCE: Inference = Inference::Saturate;
