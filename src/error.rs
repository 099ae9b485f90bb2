//! Error taxonomy for the engine.

use derive_more::{Display, Error};

use crate::types::{Coord, Player};

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The requested board edge is odd or outside the supported range.
    #[display("invalid board size {size}: must be even and between 4 and 254")]
    InvalidBoardSize {
        /// The rejected edge length.
        size: usize,
    },

    /// The move is not legal for `player` in the current position.
    #[display("illegal move: {player} cannot play {coord}")]
    IllegalMove {
        /// The side that attempted the move.
        player: Player,
        /// The attempted cell.
        coord: Coord,
    },

    /// A move was attempted after the game ended.
    #[display("game is already over")]
    GameOver,

    /// Imported data violates a position invariant.
    #[display("inconsistent state: {_0}")]
    InconsistentState(#[error(not(source))] String),
}

impl EngineError {
    /// Returns true for errors the presentation layer should silently ignore.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IllegalMove { .. } | Self::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = EngineError::InvalidBoardSize { size: 5 };
        assert!(err.to_string().contains("5"));

        let err = EngineError::IllegalMove {
            player: Player::White,
            coord: Coord::new(0, 0),
        };
        assert_eq!(err.to_string(), "illegal move: White cannot play a1");
        assert!(err.is_recoverable());

        let err = EngineError::InconsistentState("bad grid".to_string());
        assert!(err.to_string().ends_with("bad grid"));
        assert!(!err.is_recoverable());
    }
}
