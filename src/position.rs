//! Immutable board snapshots and the move applier.
//!
//! A [`Position`] caches the capture tables of both players, so legality checks
//! are lookups. Applying a move never touches the receiver; it returns a new
//! position with freshly computed tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::{CapturesTable, Grid, compute_captures};
use crate::config::validate_board_size;
use crate::error::EngineError;
use crate::types::{Cell, Coord, Disc, LETTERED_COLUMNS, Player, column_letter};

/// Complete immutable snapshot of a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    grid: Grid,
    /// Indexed by [`Player::index`].
    captures: [CapturesTable; 2],
    black_score: u16,
    white_score: u16,
    last_placed: Option<Coord>,
}

impl Position {
    /// The standard four-disc opening for an even `board_size`.
    #[instrument]
    pub fn initial(board_size: usize) -> Result<Self, EngineError> {
        validate_board_size(board_size)?;

        let middle = ((board_size - 1) / 2) as u8;
        let mut grid = Grid::empty(board_size);
        grid.set(Coord::new(middle, middle), Disc::White);
        grid.set(Coord::new(middle + 1, middle + 1), Disc::White);
        grid.set(Coord::new(middle, middle + 1), Disc::Black);
        grid.set(Coord::new(middle + 1, middle), Disc::Black);

        Ok(Self::from_grid(grid, None))
    }

    /// Rebuilds a position from externally supplied occupancy.
    ///
    /// Scores and capture tables are derived from `discs`, so only the shape of
    /// the input and `last_placed` can be inconsistent.
    #[instrument(skip(discs))]
    pub fn from_discs(
        size: usize,
        discs: Vec<Disc>,
        last_placed: Option<Coord>,
    ) -> Result<Self, EngineError> {
        if validate_board_size(size).is_err() {
            let reason = format!("unsupported board size {size}");
            return Err(EngineError::InconsistentState(reason));
        }
        if discs.len() != size * size {
            return Err(EngineError::InconsistentState(format!(
                "expected {} cells for a {size}x{size} board, got {}",
                size * size,
                discs.len()
            )));
        }

        let grid = Grid::from_discs(size, discs);
        if let Some(coord) = last_placed {
            match grid.get(coord) {
                None => {
                    return Err(EngineError::InconsistentState(format!(
                        "last placed disc {coord:?} is off the board"
                    )));
                }
                Some(Disc::Empty) => {
                    return Err(EngineError::InconsistentState(format!(
                        "last placed disc {coord} is on an empty cell"
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self::from_grid(grid, last_placed))
    }

    /// Imports a serialized snapshot, checking its stored scores against the grid.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: PositionSnapshot) -> Result<Self, EngineError> {
        let position = Self::from_discs(snapshot.size, snapshot.discs, snapshot.last_placed)?;
        if (position.black_score, position.white_score)
            != (snapshot.black_score, snapshot.white_score)
        {
            return Err(EngineError::InconsistentState(format!(
                "stored scores {}-{} do not match the board ({}-{})",
                snapshot.black_score,
                snapshot.white_score,
                position.black_score,
                position.white_score
            )));
        }
        Ok(position)
    }

    pub fn to_snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            size: self.size(),
            discs: self.grid.discs().to_vec(),
            black_score: self.black_score,
            white_score: self.white_score,
            last_placed: self.last_placed,
        }
    }

    fn from_grid(grid: Grid, last_placed: Option<Coord>) -> Self {
        let (black_score, white_score) = grid.count();
        let captures = [
            compute_captures(&grid, Player::Black),
            compute_captures(&grid, Player::White),
        ];
        Self {
            grid,
            captures,
            black_score,
            white_score,
            last_placed,
        }
    }

    /// Plays `mover` at `cell`, returning the successor position.
    #[instrument(skip(self), fields(black = self.black_score, white = self.white_score))]
    pub fn apply_move(&self, mover: Player, cell: Coord) -> Result<Self, EngineError> {
        let flips = self.captures(mover, cell);
        if flips.is_empty() || self.grid.get(cell) != Some(Disc::Empty) {
            debug!(%mover, %cell, "rejected illegal move");
            return Err(EngineError::IllegalMove {
                player: mover,
                coord: cell,
            });
        }

        let mut grid = self.grid.clone();
        grid.set(cell, mover.disc());
        for &coord in flips {
            grid.set(coord, mover.disc());
        }

        let gained = flips.len() as u16;
        let (black_score, white_score) = match mover {
            Player::Black => (self.black_score + 1 + gained, self.white_score - gained),
            Player::White => (self.black_score - gained, self.white_score + 1 + gained),
        };
        debug_assert_eq!(grid.count(), (black_score, white_score));

        let captures = [
            compute_captures(&grid, Player::Black),
            compute_captures(&grid, Player::White),
        ];

        Ok(Self {
            grid,
            captures,
            black_score,
            white_score,
            last_placed: Some(cell),
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The disc at `coord`, or `None` off the board.
    pub fn disc(&self, coord: Coord) -> Option<Disc> {
        self.grid.get(coord)
    }

    /// Discs `mover` would flip by playing `cell`; empty when illegal.
    pub fn captures(&self, mover: Player, cell: Coord) -> &[Coord] {
        self.captures[mover.index()].get(cell)
    }

    pub fn is_legal(&self, mover: Player, cell: Coord) -> bool {
        self.captures[mover.index()].is_legal(cell)
    }

    pub fn has_legal_moves(&self, mover: Player) -> bool {
        self.captures[mover.index()].has_moves()
    }

    /// Legal cells for `mover` in row-major order.
    pub fn legal_moves(&self, mover: Player) -> Vec<Coord> {
        self.captures[mover.index()].legal_moves()
    }

    pub fn black_score(&self) -> u16 {
        self.black_score
    }

    pub fn white_score(&self) -> u16 {
        self.white_score
    }

    pub fn score(&self, player: Player) -> u16 {
        match player {
            Player::Black => self.black_score,
            Player::White => self.white_score,
        }
    }

    pub fn empty_count(&self) -> u16 {
        (self.size() * self.size()) as u16 - self.black_score - self.white_score
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    pub fn last_placed(&self) -> Option<Coord> {
        self.last_placed
    }

    /// Row-major cells with the `Open` overlay for `mover`.
    pub fn cell_values(&self, mover: Option<Player>) -> Vec<Cell> {
        self.grid
            .coords()
            .map(|coord| match (self.grid.get(coord), mover) {
                (Some(Disc::Empty), Some(mover)) if self.is_legal(mover, coord) => Cell::Open,
                (Some(disc), _) => Cell::from(disc),
                (None, _) => Cell::Empty,
            })
            .collect()
    }
}

/// Serializable form of a [`Position`], used for import and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub size: usize,
    pub discs: Vec<Disc>,
    pub black_score: u16,
    pub white_score: u16,
    #[serde(default)]
    pub last_placed: Option<Coord>,
}

/// Prints the grid with `X` black, `O` white, `.` empty.
///
/// Columns are lettered; boards wider than the alphabet number them instead.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        let labels: Vec<String> = (0..size)
            .map(|col| match column_letter(col) {
                Some(letter) if size <= LETTERED_COLUMNS => letter.to_string(),
                _ => (col + 1).to_string(),
            })
            .collect();
        let cell_width = labels.iter().map(String::len).max().unwrap_or(1);
        let row_width = size.to_string().len().max(2);

        write!(f, "{:row_width$}", "")?;
        for label in &labels {
            write!(f, " {label:>cell_width$}")?;
        }

        for row in 0..size {
            write!(f, "\n{:>row_width$}", row + 1)?;
            for col in 0..size {
                let disc = self
                    .grid
                    .get(Coord::new(row as u8, col as u8))
                    .ok_or(fmt::Error)?;
                write!(f, " {:>cell_width$}", disc.to_char())?;
            }
        }
        Ok(())
    }
}

/// Parses one line of `size` characters per row; blank lines are ignored.
impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let size = rows.len();

        let mut discs = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.iter().enumerate() {
            let before = discs.len();
            for c in row.chars() {
                let disc = Disc::from_char(c).ok_or_else(|| {
                    EngineError::InconsistentState(format!(
                        "unexpected character {c:?} in row {}",
                        row_idx + 1
                    ))
                })?;
                discs.push(disc);
            }
            if discs.len() - before != size {
                return Err(EngineError::InconsistentState(format!(
                    "row {} has {} cells, expected {size}",
                    row_idx + 1,
                    discs.len() - before
                )));
            }
        }

        Self::from_discs(size, discs, None)
    }
}
