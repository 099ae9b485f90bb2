//! Engine configuration.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::EngineError;

pub const DEFAULT_BOARD_SIZE: usize = 8;
pub const MIN_BOARD_SIZE: usize = 4;
/// Largest even edge whose coordinates fit in `u8` and whose disc counts fit in `u16`.
pub const MAX_BOARD_SIZE: usize = 254;

/// Settings chosen by the host when starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_size: usize,
}

impl EngineConfig {
    pub fn with_board_size(board_size: usize) -> Self {
        Self { board_size }
    }

    /// Rejects odd sizes and sizes outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    #[instrument]
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_board_size(self.board_size)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

pub(crate) fn validate_board_size(size: usize) -> Result<(), EngineError> {
    if !size.is_multiple_of(2) || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(EngineError::InvalidBoardSize { size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_board() {
        let config = EngineConfig::default();
        assert_eq!(config.board_size, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn odd_small_and_oversized_boards_are_rejected() {
        for size in [0, 2, 3, 5, 9, 27, 256, 1000] {
            assert_eq!(
                EngineConfig::with_board_size(size).validate(),
                Err(EngineError::InvalidBoardSize { size })
            );
        }
        for size in [4, 6, 10, 26, 28, 254] {
            assert!(EngineConfig::with_board_size(size).validate().is_ok());
        }
    }
}
