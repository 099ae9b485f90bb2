//! Reversi rules engine: legal-move generation, move application and turn control
//! over immutable positions, with a wasm surface for browser front ends.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod position;
pub mod types;
pub mod wasm;

pub use config::EngineConfig;
pub use error::EngineError;
pub use game::{Game, GameSnapshot, Turn, next_to_move, resolve_turn};
pub use history::{History, HistoryEntry};
pub use position::{Position, PositionSnapshot};
pub use types::{Cell, Coord, Disc, GameResult, GameState, Outcome, Player};
