//! Targets for the `log` facade, so output can be filtered per concern,
//! e.g. `RUST_LOG=inference=trace`.

pub mod targets {
    pub const KNOWLEDGE: &str = "knowledge";
    pub const INFERENCE: &str = "inference";
    pub const MOVES: &str = "moves";
    pub const GAME: &str = "game";
    pub const ORACLE: &str = "oracle";
}
