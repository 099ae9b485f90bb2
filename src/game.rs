use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::history::{History, HistoryEntry};
use crate::position::{Position, PositionSnapshot};
use crate::types::{Coord, GameResult, GameState, Outcome, Player};

/// Turn controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    AwaitingMove(Player),
    GameOver(Outcome),
}

impl Turn {
    /// Black always opens.
    pub const fn initial() -> Self {
        Turn::AwaitingMove(Player::Black)
    }

    pub fn mover(self) -> Option<Player> {
        match self {
            Turn::AwaitingMove(player) => Some(player),
            Turn::GameOver(_) => None,
        }
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Turn::AwaitingMove(_) => None,
            Turn::GameOver(outcome) => Some(outcome),
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, Turn::GameOver(_))
    }
}

/// Decides who moves after `previous_mover` has played into `position`.
///
/// The opponent moves if it can; otherwise `previous_mover` moves again
/// (forced pass); if neither can, or the board is full, the game is over.
pub fn next_to_move(position: &Position, previous_mover: Player) -> Turn {
    resolve_turn(position, previous_mover.opponent())
}

/// Like [`next_to_move`], but with `candidate` as the preferred side to move.
#[instrument(
    skip(position),
    fields(black = position.black_score(), white = position.white_score())
)]
pub fn resolve_turn(position: &Position, candidate: Player) -> Turn {
    if !position.is_full() {
        if position.has_legal_moves(candidate) {
            return Turn::AwaitingMove(candidate);
        }
        let other = candidate.opponent();
        if position.has_legal_moves(other) {
            debug!(passing = %candidate, "no legal moves, turn passes");
            return Turn::AwaitingMove(other);
        }
    }

    let outcome = Outcome::from_scores(position.black_score(), position.white_score());
    info!(%outcome, "game over");
    Turn::GameOver(outcome)
}

/// A game session: current position, turn and undo/redo history.
#[derive(Debug, Clone)]
pub struct Game {
    history: History,
}

impl Game {
    #[instrument]
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let position = Position::initial(config.board_size)?;
        Ok(Self::from_position(position, Player::Black))
    }

    pub fn with_size(board_size: usize) -> Result<Self, EngineError> {
        Self::new(EngineConfig::with_board_size(board_size))
    }

    /// Starts from an arbitrary position; `mover` passes immediately if it has no move.
    pub fn from_position(position: Position, mover: Player) -> Self {
        let turn = resolve_turn(&position, mover);
        Self {
            history: History::new(HistoryEntry::new(Arc::new(position), turn, None)),
        }
    }

    /// Imports an exported game, validating the position.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, EngineError> {
        let position = Position::from_snapshot(snapshot.position)?;
        let mover = snapshot.to_move.unwrap_or(Player::Black);
        Ok(Self::from_position(position, mover))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            position: self.position().to_snapshot(),
            to_move: self.turn().mover(),
        }
    }

    pub fn position(&self) -> &Arc<Position> {
        &self.history.current().position
    }

    pub fn turn(&self) -> Turn {
        self.history.current().turn
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Legal cells for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.turn()
            .mover()
            .map(|mover| self.position().legal_moves(mover))
            .unwrap_or_default()
    }

    /// True when the last move left the opponent without a reply.
    pub fn was_pass(&self) -> bool {
        self.history.current().is_pass()
    }

    /// Discs flipped by the move that produced the current position.
    pub fn flipped(&self) -> Vec<Coord> {
        match (self.history.current().played, self.history.previous()) {
            (Some((player, coord)), Some(prev)) => prev.position.captures(player, coord).to_vec(),
            _ => Vec::new(),
        }
    }

    /// Plays `coord` for the side to move and returns the resulting turn.
    #[instrument(skip(self), fields(turn = ?self.turn()))]
    pub fn play(&mut self, coord: Coord) -> Result<Turn, EngineError> {
        let mover = self.turn().mover().ok_or(EngineError::GameOver)?;
        let next = self.position().apply_move(mover, coord)?;
        let turn = next_to_move(&next, mover);

        let entry = HistoryEntry::new(Arc::new(next), turn, Some((mover, coord)));
        self.history.push(entry);
        Ok(turn)
    }

    pub fn play_at(&mut self, row: u8, col: u8) -> Result<Turn, EngineError> {
        self.play(Coord::new(row, col))
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn jump_to(&mut self, step: usize) -> bool {
        self.history.jump_to(step)
    }

    pub fn to_game_state(&self) -> GameState {
        let position = self.position();
        let turn = self.turn();
        GameState {
            size: position.size(),
            cells: position.cell_values(turn.mover()),
            current_player: turn.mover(),
            black_count: position.black_score(),
            white_count: position.white_score(),
            is_game_over: turn.is_over(),
            is_pass: self.was_pass(),
            last_placed: position.last_placed(),
            flipped: self.flipped(),
            legal_moves: self.legal_moves(),
        }
    }

    /// Final result, or `None` while the game is still running.
    pub fn to_game_result(&self) -> Option<GameResult> {
        let position = self.position();
        self.turn().outcome().map(|outcome| GameResult {
            outcome,
            black_count: position.black_score(),
            white_count: position.white_score(),
        })
    }
}

/// Serializable game export: a position plus the side to move there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub position: PositionSnapshot,
    /// `None` for finished games.
    #[serde(default)]
    pub to_move: Option<Player>,
}
