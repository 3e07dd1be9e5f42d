//! Board engine for a single-player mine-detection puzzle: mine placement, adjacency
//! counts, flood-fill reveal, win/loss detection and a per-difficulty score table.

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use ledger::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod engine;
mod error;
mod game;
mod generator;
mod ledger;
mod types;
