//! Undo/redo list of shared positions.

use std::sync::Arc;

use tracing::instrument;

use crate::game::Turn;
use crate::position::Position;
use crate::types::{Coord, Player};

/// One step of a game: the position reached and whose turn it is there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub position: Arc<Position>,
    pub turn: Turn,
    /// The move that produced this entry; `None` for the first entry.
    pub played: Option<(Player, Coord)>,
}

impl HistoryEntry {
    pub fn new(position: Arc<Position>, turn: Turn, played: Option<(Player, Coord)>) -> Self {
        Self {
            position,
            turn,
            played,
        }
    }

    /// True when the side that produced this entry also moves next.
    pub fn is_pass(&self) -> bool {
        matches!(
            (self.played, self.turn),
            (Some((player, _)), Turn::AwaitingMove(next)) if player == next
        )
    }
}

/// Linear history with a cursor. Entries after the cursor form the redo branch.
///
/// No entries are ever evicted.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new(first: HistoryEntry) -> Self {
        Self {
            entries: vec![first],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// The entry before the cursor, if any.
    pub fn previous(&self) -> Option<&HistoryEntry> {
        self.cursor.checked_sub(1).map(|idx| &self.entries[idx])
    }

    /// Appends after the cursor, discarding the redo branch.
    #[instrument(skip(self, entry), fields(cursor = self.cursor, len = self.entries.len()))]
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor += 1;
    }

    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Moves the cursor to `step`; returns false when out of range.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step >= self.entries.len() {
            return false;
        }
        self.cursor = step;
        true
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
