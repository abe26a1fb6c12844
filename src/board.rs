//! Grid representation of a Connect 4 position
//!
//! Cells are stored row-major with row 0 at the top of the board, so discs
//! settle towards the highest row index. A `Board` is treated as a value:
//! placing a disc returns a new board and leaves the original untouched.

use thiserror::Error;

use crate::{HEIGHT, WIDTH, WIN_LENGTH};

/// Score for a run of two connected discs
pub const PAIR_SCORE: i64 = 10;
/// Score for a run of three connected discs
pub const TRIPLE_SCORE: i64 = 100;
/// Score for a run of four or more connected discs (a won line)
pub const CONNECTED_SCORE: i64 = 10_000;

/// One of the two players, identified as 1 or 2
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The numeric identity of the player (1 or 2)
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell value of a disc belonging to this player
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }

    /// The 0/1/2 encoding of the cell
    pub fn id(self) -> u8 {
        self.owner().map_or(0, Player::id)
    }

    fn from_id(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            _ => Player::from_id(value).map(Player::cell),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("column {0} does not exist")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("a {rows}x{cols} board has no cells")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) holds {value}, expected 0, 1 or 2")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("disc at ({row}, {col}) is floating above an empty cell")]
    FloatingDisc { row: usize, col: usize },

    #[error("could not parse '{0}' as a valid move")]
    InvalidMove(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored left-to-right, top-to-bottom
    rows: usize,
    cols: usize,
}

impl Board {
    /// Creates an empty board of the default dimensions
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            rows: HEIGHT,
            cols: WIDTH,
        }
    }

    /// Creates an empty board with the given number of rows and columns
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            cells: vec![Cell::Empty; rows * cols],
            rows,
            cols,
        })
    }

    /// Creates a board from rows of cell values encoded as 0 (empty), 1 or 2,
    /// with row 0 at the top
    pub fn from_grid<R: AsRef<[u8]>>(grid: &[R]) -> Result<Self, BoardError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |row| row.as_ref().len());
        let mut board = Self::with_size(rows, cols)?;

        for (row, values) in grid.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(BoardError::RaggedGrid {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                board.cells[row * cols + col] =
                    Cell::from_id(value).ok_or(BoardError::InvalidCell { row, col, value })?;
            }
        }

        // every disc must rest on the bottom or on another disc
        for col in 0..cols {
            for row in 0..rows - 1 {
                if !board.cell(row, col).is_empty() && board.cell(row + 1, col).is_empty() {
                    return Err(BoardError::FloatingDisc { row, col });
                }
            }
        }
        Ok(board)
    }

    /// Creates a default-sized board by dropping discs in the given 1-indexed
    /// columns, alternating players and starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= board.cols => {
                    board = board.drop_disc(column - 1, player)?.0;
                    player = player.opponent();
                }
                _ => return Err(BoardError::InvalidMove(column_char)),
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    // callers guarantee the coordinates are in range
    fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(())
    }

    /// The player owning the disc at the given cell, if any
    pub fn owner_at(&self, row: usize, col: usize) -> Result<Option<Player>, BoardError> {
        self.check_bounds(row, col)?;
        Ok(self.cell(row, col).owner())
    }

    /// The row a disc dropped in `col` would land in, if the column is not full
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        // scan from the bottom up
        (0..self.rows).rev().find(|&row| self.cell(row, col).is_empty())
    }

    pub fn playable(&self, col: usize) -> bool {
        col < self.cols && self.cell(0, col).is_empty()
    }

    /// The legal moves as (row, col) pairs, one per non-full column, left to right
    pub fn possible_moves(&self) -> Vec<(usize, usize)> {
        (0..self.cols)
            .filter_map(|col| self.landing_row(col).map(|row| (row, col)))
            .collect()
    }

    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.playable(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        !(0..self.cols).any(|col| self.playable(col))
    }

    pub fn middle_column(&self) -> usize {
        self.cols / 2
    }

    /// Returns a new board with a disc of `player` at (row, col)
    ///
    /// Only coordinates produced by [`possible_moves`](Board::possible_moves)
    /// are guaranteed to keep the board free of floating discs.
    pub fn play(&self, row: usize, col: usize, player: Player) -> Result<Board, BoardError> {
        self.check_bounds(row, col)?;
        if !self.cell(row, col).is_empty() {
            return Err(BoardError::OccupiedCell { row, col });
        }
        let mut next = self.clone();
        next.cells[row * self.cols + col] = player.cell();
        Ok(next)
    }

    /// Drops a disc of `player` into `col`, returning the new board and the
    /// row the disc landed in
    pub fn drop_disc(&self, col: usize, player: Player) -> Result<(Board, usize), BoardError> {
        if col >= self.cols {
            return Err(BoardError::InvalidColumn(col));
        }
        let row = self.landing_row(col).ok_or(BoardError::ColumnFull(col))?;
        Ok((self.play(row, col, player)?, row))
    }

    /// The board in its 0/1/2 encoding, row 0 first
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.id()).collect())
            .collect()
    }

    pub fn row_lines(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(|row| row.to_vec()).collect()
    }

    pub fn column_lines(&self) -> Vec<Vec<Cell>> {
        (0..self.cols)
            .map(|col| (0..self.rows).map(|row| self.cell(row, col)).collect())
            .collect()
    }

    /// All diagonals in both directions that are long enough to hold a win
    ///
    /// For each offset the top-left to bottom-right diagonal is followed by
    /// the matching diagonal of the horizontally mirrored board.
    pub fn get_diagonals(&self) -> Vec<Vec<Cell>> {
        let largest_side = self.rows.max(self.cols) as isize;

        let mut diagonals = Vec::new();
        for offset in -largest_side..largest_side {
            let diagonal = self.diagonal(offset, false);
            if diagonal.len() >= WIN_LENGTH {
                diagonals.push(diagonal);
                diagonals.push(self.diagonal(offset, true));
            }
        }
        diagonals
    }

    // cells (row, row + offset), read top to bottom
    fn diagonal(&self, offset: isize, mirrored: bool) -> Vec<Cell> {
        (0..self.rows)
            .filter_map(|row| {
                let col = row as isize + offset;
                if col < 0 || col >= self.cols as isize {
                    return None;
                }
                let col = if mirrored {
                    self.cols - 1 - col as usize
                } else {
                    col as usize
                };
                Some(self.cell(row, col))
            })
            .collect()
    }

    /// Sums [`calculate_score`] over every row, column and diagonal
    ///
    /// Scoring also yields the win signal: the flag is set when any scanned
    /// line holds a run of four or more discs of `player`.
    pub fn connected_heuristic(&self, player: Player) -> (i64, bool) {
        self.row_lines()
            .iter()
            .chain(self.column_lines().iter())
            .chain(self.get_diagonals().iter())
            .map(|line| calculate_score(line, player))
            .fold((0, false), |(total, any_over), (score, over)| {
                (total + score, any_over || over)
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// The lengths of the runs of `player` discs in a line, in order
///
/// Isolated single discs are not counted, so every recorded run is at
/// least two long.
pub fn count_series(line: &[Cell], player: Player) -> Vec<usize> {
    let target = player.cell();
    let mut count = 0;
    let mut runs = Vec::new();

    for &cell in line {
        if cell == target {
            count += 1;
        } else {
            if count > 1 {
                runs.push(count);
            }
            count = 0;
        }
    }
    if count > 1 {
        runs.push(count);
    }
    runs
}

/// Scores the runs of `player` in a line, also reporting whether any run
/// is long enough to win
pub fn calculate_score(line: &[Cell], player: Player) -> (i64, bool) {
    count_series(line, player)
        .into_iter()
        .fold((0, false), |(score, over), run| match run {
            0 | 1 => (score, over),
            2 => (score + PAIR_SCORE, over),
            3 => (score + TRIPLE_SCORE, over),
            _ => (score + CONNECTED_SCORE, true),
        })
}
