use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use std::fmt;

use crate::error::PuzzleError;

/// Direction the blank slides in. `Start` tags the root of a search and is
/// never a legal slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Slides in neighbor generation order. Child order decides frontier tie-breaks.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> Option<(isize, isize)> {
        match self {
            Move::Start => None,
            Move::Up => Some((-1, 0)),
            Move::Down => Some((1, 0)),
            Move::Left => Some((0, -1)),
            Move::Right => Some((0, 1)),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Start => Move::Start,
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Start => "Start",
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One puzzle state: `size * size` tiles in row-major order, 0 is the blank.
///
/// Always a permutation of `0..size*size`. `blank` is derived from `tiles`, so
/// equality and hashing are effectively over the tile sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    pub fn new(tiles: Vec<u32>, size: usize) -> Result<Self, PuzzleError> {
        let cells = cell_count(size)?;

        if tiles.len() != cells {
            return Err(PuzzleError::MalformedBoard(format!(
                "expected {} tiles for a {}x{} board, found {}",
                cells,
                size,
                size,
                tiles.len()
            )));
        }

        let blanks = tiles.iter().filter(|&&tile| tile == 0).count();
        if blanks != 1 {
            return Err(PuzzleError::MalformedBoard(format!(
                "expected exactly one blank (0), found {}",
                blanks
            )));
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let value = tile as usize;
            if value >= cells {
                return Err(PuzzleError::MalformedBoard(format!(
                    "tile {} is outside 0..{}",
                    tile,
                    cells - 1
                )));
            }
            if seen[value] {
                return Err(PuzzleError::MalformedBoard(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            seen[value] = true;
        }

        let blank = tiles.iter().position(|&tile| tile == 0).unwrap_or_default();
        Ok(Self { size, tiles, blank })
    }

    /// Parses whitespace or comma separated tiles, e.g. `"1 2 3 4 5 6 7 8 0"`.
    pub fn parse(input: &str, size: usize) -> Result<Self, PuzzleError> {
        let tiles = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|_| PuzzleError::InvalidTile(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(tiles, size)
    }

    /// The solved board `[1, 2, ..., size*size-1, 0]`.
    pub fn goal(size: usize) -> Result<Self, PuzzleError> {
        cell_count(size)?;
        Ok(Self::goal_unchecked(size))
    }

    fn goal_unchecked(size: usize) -> Self {
        let cells = size * size;
        let mut tiles: Vec<u32> = (1..cells as u32).collect();
        tiles.push(0);

        Self {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    /// A uniformly shuffled board that passes the parity test.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        let mut board = Self::goal(size)?;

        loop {
            board.tiles.shuffle(rng);
            board.blank = board
                .tiles
                .iter()
                .position(|&tile| tile == 0)
                .unwrap_or_default();

            if board.is_solvable() {
                return Ok(board);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Tile at `(row, col)`, or `None` off the grid.
    pub fn tile(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.tiles[row * self.size + col])
        } else {
            None
        }
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Slides the blank one cell in `movement`'s direction, or `None` if that
    /// leaves the grid. The receiver is left untouched.
    pub fn apply_move(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset()?;
        let (row, col) = self.blank_position();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let size = self.size as isize;

        if new_row >= 0 && new_row < size && new_col >= 0 && new_col < size {
            let swap_index = new_row as usize * self.size + new_col as usize;
            let mut tiles = self.tiles.clone();
            tiles.swap(self.blank, swap_index);

            Some(Self {
                size: self.size,
                tiles,
                blank: swap_index,
            })
        } else {
            None
        }
    }

    /// Every board one slide away, in `Move::ALL` order.
    pub fn neighbors(&self) -> Vec<(Board, Move)> {
        Move::ALL
            .iter()
            .filter_map(|&movement| self.apply_move(movement).map(|board| (board, movement)))
            .collect()
    }

    /// Permutation parity test against the standard goal. The search engine
    /// does not rely on this; it discovers unsolvable boards by exhaustion.
    pub fn is_solvable(&self) -> bool {
        let inversions = count_inversions(&self.tiles);
        let (empty_row, _) = self.blank_position();

        if self.size % 2 == 1 {
            // Odd width: solvable iff inversions are even
            inversions % 2 == 0
        } else {
            // Even width: the goal's blank sits on an odd row
            (inversions + empty_row) % 2 == 1
        }
    }
}

fn cell_count(size: usize) -> Result<usize, PuzzleError> {
    if size < 2 {
        return Err(PuzzleError::SizeTooSmall(size));
    }

    size.checked_mul(size)
        .filter(|&cells| cells <= u32::MAX as usize)
        .ok_or_else(|| PuzzleError::MalformedBoard(format!("size {} is too large", size)))
}

fn count_inversions(tiles: &[u32]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        let line = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(self.size));

        writeln!(f, "{}", line)?;
        for row in self.tiles.chunks(self.size) {
            write!(f, "|")?;
            for &value in row {
                match value {
                    0 => write!(f, " {:width$} |", "", width = width)?,
                    value => write!(f, " {:>width$} |", value, width = width)?,
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Puzzle size plus its goal board and the goal index of every tile value.
///
/// Passed explicitly to board construction, heuristics and search.
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    size: usize,
    goal: Board,
    goal_index: Vec<usize>,
}

impl PuzzleConfig {
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        let goal = Board::goal(size)?;
        Ok(Self::from_goal(goal))
    }

    /// Config matching an already validated board's size.
    pub fn for_board(board: &Board) -> Self {
        Self::from_goal(Board::goal_unchecked(board.size()))
    }

    fn from_goal(goal: Board) -> Self {
        let mut goal_index = vec![0; goal.tiles.len()];
        for (index, &value) in goal.tiles.iter().enumerate() {
            goal_index[value as usize] = index;
        }

        Self {
            size: goal.size,
            goal,
            goal_index,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    /// Index `value` occupies on the goal board.
    pub fn goal_index(&self, value: u32) -> usize {
        self.goal_index[value as usize]
    }

    pub fn is_goal(&self, board: &Board) -> bool {
        *board == self.goal
    }

    pub fn board(&self, tiles: Vec<u32>) -> Result<Board, PuzzleError> {
        Board::new(tiles, self.size)
    }

    pub fn parse_board(&self, input: &str) -> Result<Board, PuzzleError> {
        Board::parse(input, self.size)
    }
}

/// Canonical solved board for `size`.
pub fn make_goal(size: usize) -> Result<Board, PuzzleError> {
    Board::goal(size)
}
