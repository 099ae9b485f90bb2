use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Column letters used by coordinate notation.
const COLUMN_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Boards up to this edge get lettered columns.
pub(crate) const LETTERED_COLUMNS: usize = COLUMN_LETTERS.len();

pub(crate) fn column_letter(col: usize) -> Option<char> {
    COLUMN_LETTERS.chars().nth(col)
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The disc this side places.
    pub fn disc(self) -> Disc {
        match self {
            Player::Black => Disc::Black,
            Player::White => Disc::White,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// Stored occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Disc {
    #[default]
    Empty,
    Black,
    White,
}

impl Disc {
    /// The owner of this disc, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Disc::Empty => None,
            Disc::Black => Some(Player::Black),
            Disc::White => Some(Player::White),
        }
    }

    pub(crate) fn to_char(self) -> char {
        match self {
            Disc::Empty => '.',
            Disc::Black => 'X',
            Disc::White => 'O',
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | '-' => Some(Disc::Empty),
            'X' | 'x' | 'B' | 'b' => Some(Disc::Black),
            'O' | 'o' | 'W' | 'w' => Some(Disc::White),
            _ => None,
        }
    }
}

/// Cell value handed to presentation: occupancy plus the `Open` overlay.
///
/// `Open` marks an empty cell that is legal for the side to move. It depends on
/// whose turn it is and is never stored in a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Open,
    Black,
    White,
}

impl From<Disc> for Cell {
    fn from(disc: Disc) -> Self {
        match disc {
            Disc::Empty => Cell::Empty,
            Disc::Black => Cell::Black,
            Disc::White => Cell::White,
        }
    }
}

/// A board coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board with edge `size`.
    pub fn index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new((index / size) as u8, (index % size) as u8)
    }

    pub fn in_bounds(self, size: usize) -> bool {
        (self.row as usize) < size && (self.col as usize) < size
    }

    /// The neighbouring coordinate in direction `(dr, dc)`, or `None` off the board.
    pub(crate) fn step(self, (dr, dc): (i32, i32), size: usize) -> Option<Self> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        let edge = size as i32;
        if (0..edge).contains(&row) && (0..edge).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

/// Formats as column letter plus 1-based row: `(2, 3)` is `d3`.
/// Columns past `z` fall back to `(row, col)`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match column_letter(self.col as usize) {
            Some(col) => write!(f, "{}{}", col, self.row as usize + 1),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Coord {
    type Err = EngineError;

    /// Accepts `d3` notation and the `(row, col)` form used past column `z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InconsistentState(format!("invalid coordinate {s:?}"));
        let text = s.trim();

        if let Some(pair) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            let (row, col) = pair.split_once(',').ok_or_else(invalid)?;
            let row = row.trim().parse().map_err(|_| invalid())?;
            let col = col.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::new(row, col));
        }

        let mut chars = text.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let col = COLUMN_LETTERS.find(letter).ok_or_else(invalid)?;
        let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
        let row = row.checked_sub(1).ok_or_else(invalid)?;
        let row = u8::try_from(row).map_err(|_| invalid())?;

        Ok(Self::new(row, col as u8))
    }
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    /// Decides the outcome from final disc counts.
    pub fn from_scores(black: u16, white: u16) -> Self {
        if black > white {
            Outcome::Winner(Player::Black)
        } else if white > black {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{player} is the winner"),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// Public game state handed to presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub size: usize,
    /// Row-major cells with legal moves for `current_player` marked `Open`.
    pub cells: Vec<Cell>,
    /// `None` once the game is over.
    pub current_player: Option<Player>,
    pub black_count: u16,
    pub white_count: u16,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the side that just moved also moves next (forced pass).
    /// - `false` otherwise, including at the start of the game.
    pub is_pass: bool,
    pub last_placed: Option<Coord>,
    /// Discs flipped by the most recent move; empty at the start of the game.
    pub flipped: Vec<Coord>,
    pub legal_moves: Vec<Coord>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_count: u16,
    pub white_count: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_notation_round_trips() {
        let coord: Coord = "d3".parse().unwrap();
        assert_eq!(coord, Coord::new(2, 3));
        assert_eq!(coord.to_string(), "d3");
        assert_eq!("H8".parse::<Coord>().unwrap(), Coord::new(7, 7));
        assert_eq!("j10".parse::<Coord>().unwrap(), Coord::new(9, 9));
        assert_eq!("z120".parse::<Coord>().unwrap(), Coord::new(119, 25));
    }

    #[test]
    fn columns_past_z_use_the_pair_form() {
        let coord = Coord::new(3, 30);
        assert_eq!(coord.to_string(), "(3, 30)");
        assert_eq!("(3, 30)".parse::<Coord>().unwrap(), coord);
        assert_eq!("( 200,253 )".parse::<Coord>().unwrap(), Coord::new(200, 253));
    }

    #[test]
    fn coord_rejects_malformed_notation() {
        let malformed = ["", "d", "3d", "d0", "?1", "d3x", "a257"];
        let bad_pairs = ["(1, 2", "(1 2)", "(1, 300)"];
        for bad in malformed.into_iter().chain(bad_pairs) {
            assert!(bad.parse::<Coord>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn coord_step_stops_at_edges() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.step((-1, 0), 8), None);
        assert_eq!(corner.step((0, -1), 8), None);
        assert_eq!(corner.step((1, 1), 8), Some(Coord::new(1, 1)));
        assert_eq!(Coord::new(7, 7).step((0, 1), 8), None);
    }

    #[test]
    fn outcome_follows_higher_score() {
        assert_eq!(Outcome::from_scores(40, 24), Outcome::Winner(Player::Black));
        assert_eq!(Outcome::from_scores(10, 54), Outcome::Winner(Player::White));
        assert_eq!(Outcome::from_scores(32, 32), Outcome::Draw);
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn open_is_never_a_stored_disc() {
        assert_eq!(Cell::from(Disc::Empty), Cell::Empty);
        assert_eq!(Disc::from_char('.'), Some(Disc::Empty));
        assert_eq!(Disc::from_char('B'), Some(Disc::Black));
        assert_eq!(Disc::from_char('?'), None);
        assert_eq!(Player::Black.opponent().disc(), Disc::White);
    }
}
