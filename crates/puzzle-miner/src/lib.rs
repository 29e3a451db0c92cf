pub use chess_puzzler;

pub mod config;
pub mod dataset;
pub mod error;
pub mod mining;
pub mod report;

pub use mining::{find_valid_examples, Miner, MiningOptions, MiningReport, ThemePair};
