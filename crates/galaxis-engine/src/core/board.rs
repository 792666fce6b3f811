use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH, coord,
    piece::{PieceKind, Position, Shape, Tetromino},
};

/// A single cell of the board.
///
/// Occupied cells remember the kind of the piece that was stamped into them so
/// renderers can color them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a locked piece of the given kind.
    Occupied(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Piece kind stamped into this cell, if any.
    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(kind) => Some(kind),
        }
    }
}

/// One row of the board.
pub type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

fn is_row_full(row: &Row) -> bool {
    row.iter().all(|cell| cell.is_occupied())
}

/// The playfield: a fixed 10×20 grid, row-major, row 0 at the top.
///
/// Boards are values. [`Board::merged`] and [`Board::cleared`] return new
/// boards and leave the receiver untouched, so a snapshot taken before a
/// landing never aliases the board produced by it.
///
/// # Example
///
/// ```
/// use galaxis_engine::{Board, PieceKind, Position, Tetromino};
///
/// let board = Board::new();
/// let piece = Tetromino::new(PieceKind::O);
/// assert!(!board.is_colliding(piece.shape(), Position::new(0, 18)));
/// assert!(board.is_colliding(piece.shape(), Position::new(0, 19)));
///
/// let merged = board.merged(&piece, Position::new(0, 18));
/// assert!(merged.cell(0, 19).is_some_and(|cell| cell.is_occupied()));
/// assert!(board.cell(0, 19).is_some_and(|cell| cell.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of [`Board::cleared`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Board after compaction.
    pub board: Board,
    /// Number of full rows removed.
    pub lines_cleared: usize,
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Creates a board with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter()
    }

    /// Number of occupied cells on the board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    /// Tests whether `shape` placed at `position` overlaps anything.
    ///
    /// A placement collides when any occupied shape cell lands outside
    /// `[0, WIDTH)` horizontally, at or below `HEIGHT`, or on an occupied
    /// board cell. Cells above the board (`y < 0`) are exempt from the
    /// occupancy test, which lets pieces spawn partially off-board, but they
    /// still have to respect the side walls.
    #[must_use]
    pub fn is_colliding(&self, shape: &Shape, position: Position) -> bool {
        shape.occupied_cells().any(|(dx, dy)| {
            let x = position.x + coord(dx);
            let y = position.y + coord(dy);
            if x < 0 || x >= coord(BOARD_WIDTH) || y >= coord(BOARD_HEIGHT) {
                return true;
            }
            y >= 0 && self.cell(x, y).is_some_and(Cell::is_occupied)
        })
    }

    /// Returns a new board with `piece` stamped in at `position`.
    ///
    /// Cells falling outside the board are dropped silently; callers check
    /// collision before merging.
    #[must_use]
    pub fn merged(&self, piece: &Tetromino, position: Position) -> Self {
        let mut board = self.clone();
        for (x, y) in piece.cells_at(position) {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = board.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = Cell::Occupied(piece.kind());
            }
        }
        board
    }

    /// Removes every full row and compacts the rows above it.
    ///
    /// Rows are scanned bottom to top. When row `y` is full, every row above
    /// it moves down by one, the top row becomes empty, and `y` is examined
    /// again because it now holds the row that used to be above it.
    #[must_use]
    pub fn cleared(&self) -> LineClear {
        let mut rows = self.rows;
        let mut lines_cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            let current = y - 1;
            if is_row_full(&rows[current]) {
                lines_cleared += 1;
                rows.copy_within(..current, 1);
                rows[0] = EMPTY_ROW;
                continue;
            }
            y -= 1;
        }
        LineClear {
            board: Self { rows },
            lines_cleared,
        }
    }

    /// Parses a board from ASCII art, one line per row from the top.
    ///
    /// `.` is empty; a piece letter (`I`, `J`, `L`, `O`, `S`, `T`, `Z`) is an
    /// occupied cell of that kind; any other non-space character is an
    /// occupied `I` cell. Missing rows at the top are empty, so short art
    /// describes the bottom of the board.
    ///
    /// # Panics
    ///
    /// Panics if the art has more than `HEIGHT` rows or a row is wider than
    /// `WIDTH`.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(lines.len() <= BOARD_HEIGHT, "too many rows in board art");
        let mut board = Self::new();
        let top = BOARD_HEIGHT - lines.len();
        for (dy, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            assert!(chars.len() <= BOARD_WIDTH, "row too wide in board art");
            for (x, ch) in chars.into_iter().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_char(ch).unwrap_or(PieceKind::I);
                board.rows[top + dy][x] = Cell::Occupied(kind);
            }
        }
        board
    }
}
