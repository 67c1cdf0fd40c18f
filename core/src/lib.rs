//! Rules engine for single-board Minesweeper: level table, board generation with a safe first click, flood
//! reveal, the mark cycle, the match state machine with its clock, and best-time records.

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use level::*;
pub use record::*;
pub use snapshot::*;
pub use timer::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod game;
mod generator;
mod level;
mod record;
mod snapshot;
mod timer;
mod types;
