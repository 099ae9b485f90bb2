use crate::types::{Coord, Disc, Player};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Disc occupancy of an N×N board in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    discs: Vec<Disc>,
}

impl Grid {
    pub(crate) fn empty(size: usize) -> Self {
        Self {
            size,
            discs: vec![Disc::Empty; size * size],
        }
    }

    /// Wraps raw discs; callers guarantee `discs.len() == size * size`.
    pub(crate) fn from_discs(size: usize, discs: Vec<Disc>) -> Self {
        debug_assert_eq!(discs.len(), size * size);
        Self { size, discs }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    /// Returns the disc at `coord`, or `None` off the board.
    pub fn get(&self, coord: Coord) -> Option<Disc> {
        if !coord.in_bounds(self.size) {
            return None;
        }
        Some(self.discs[coord.index(self.size)])
    }

    pub(crate) fn set(&mut self, coord: Coord, disc: Disc) {
        let idx = coord.index(self.size);
        self.discs[idx] = disc;
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u16, u16) {
        self.discs
            .iter()
            .fold((0, 0), |(black, white), disc| match disc {
                Disc::Black => (black + 1, white),
                Disc::White => (black, white + 1),
                Disc::Empty => (black, white),
            })
    }

    pub fn empty_count(&self) -> u16 {
        self.discs.iter().filter(|d| **d == Disc::Empty).count() as u16
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size * size).map(move |idx| Coord::from_index(idx, size))
    }
}

/// For one mover, the discs each cell would capture, in row-major order.
///
/// An empty run means the cell is not a legal move for that mover.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapturesTable {
    size: usize,
    runs: Vec<Vec<Coord>>,
}

impl CapturesTable {
    /// Captures for `coord`, nearest first within each direction.
    pub fn get(&self, coord: Coord) -> &[Coord] {
        if !coord.in_bounds(self.size) {
            return &[];
        }
        &self.runs[coord.index(self.size)]
    }

    pub fn is_legal(&self, coord: Coord) -> bool {
        !self.get(coord).is_empty()
    }

    pub fn has_moves(&self) -> bool {
        self.runs.iter().any(|run| !run.is_empty())
    }

    /// Legal cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.runs
            .iter()
            .enumerate()
            .filter(|(_, run)| !run.is_empty())
            .map(|(idx, _)| Coord::from_index(idx, self.size))
            .collect()
    }
}

/// Computes, for every empty cell, the opponent discs `mover` would capture there.
pub fn compute_captures(grid: &Grid, mover: Player) -> CapturesTable {
    let runs = grid
        .coords()
        .map(|origin| {
            if grid.get(origin) == Some(Disc::Empty) {
                collect_flips(grid, origin, mover)
            } else {
                Vec::new()
            }
        })
        .collect();

    CapturesTable {
        size: grid.size(),
        runs,
    }
}

fn collect_flips(grid: &Grid, origin: Coord, mover: Player) -> Vec<Coord> {
    let mut flips = Vec::new();

    for direction in DIRECTIONS {
        let mut cursor = origin.step(direction, grid.size());
        let mut line = Vec::new();
        let mut has_opponent = false;

        // An empty cell ends the walk: the run can no longer be closed by a mover disc.
        while let Some(coord) = cursor {
            match grid.get(coord).and_then(Disc::owner) {
                Some(owner) if owner == mover => {
                    if has_opponent {
                        flips.append(&mut line);
                    }
                    break;
                }
                Some(_) => {
                    has_opponent = true;
                    line.push(coord);
                }
                None => break,
            }

            cursor = coord.step(direction, grid.size());
        }
    }

    flips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let size = rows.len();
        let discs = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| Disc::from_char(c).unwrap()))
            .collect();
        Grid::from_discs(size, discs)
    }

    #[test]
    fn t01_initial_black_captures_are_four_single_discs() {
        let grid = grid_from_rows(&[
            "........", "........", "........", "...OX...", "...XO...", "........", "........",
            "........",
        ]);

        let table = compute_captures(&grid, Player::Black);

        assert_eq!(
            table.legal_moves(),
            vec![
                Coord::new(2, 3),
                Coord::new(3, 2),
                Coord::new(4, 5),
                Coord::new(5, 4)
            ]
        );
        assert_eq!(table.get(Coord::new(2, 3)), &[Coord::new(3, 3)]);
        assert_eq!(table.get(Coord::new(5, 4)), &[Coord::new(4, 4)]);
    }

    #[test]
    fn captures_span_several_directions_nearest_first() {
        let grid = grid_from_rows(&["X...", "OO..", ".OOX", "X..."]);

        let run = compute_captures(&grid, Player::Black)
            .get(Coord::new(2, 0))
            .to_vec();

        // North: (1,0) then (0,0) is ours. East: (2,1), (2,2) then (2,3) is ours.
        // North-east: (1,1) then (0,2) is empty, so nothing.
        assert_eq!(
            run,
            vec![Coord::new(1, 0), Coord::new(2, 1), Coord::new(2, 2)]
        );
    }

    #[test]
    fn run_ending_at_edge_or_gap_captures_nothing() {
        let grid = grid_from_rows(&["....", ".OO.", "....", "...."]);
        let table = compute_captures(&grid, Player::Black);
        assert!(!table.has_moves());

        let grid = grid_from_rows(&["X.O.", "....", "....", "...."]);
        let table = compute_captures(&grid, Player::White);
        assert!(table.get(Coord::new(0, 1)).is_empty());
    }

    #[test]
    fn adjacent_own_disc_is_not_a_capture() {
        let grid = grid_from_rows(&["XX..", "....", "....", "...."]);
        assert!(!compute_captures(&grid, Player::Black).has_moves());
    }

    #[test]
    fn occupied_and_off_board_cells_have_no_captures() {
        let grid = grid_from_rows(&["XO..", "....", "....", "...."]);
        let table = compute_captures(&grid, Player::White);
        assert!(table.get(Coord::new(0, 0)).is_empty());
        assert!(table.get(Coord::new(9, 9)).is_empty());
        assert!(!table.is_legal(Coord::new(0, 1)));
    }

    #[test]
    fn count_reports_each_colour() {
        let grid = grid_from_rows(&["XO..", "X...", "....", "...O"]);
        assert_eq!(grid.count(), (2, 2));
        assert_eq!(grid.empty_count(), 12);
        assert_eq!(grid.get(Coord::new(4, 0)), None);
    }
}
