use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{BOARD_WIDTH, coord};

/// Enum representing the type of piece.
///
/// The discriminant indexes the compile-time [shape catalog](PieceKind::shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the rotation-0 shape of this piece kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPE_CATALOG[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use galaxis_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use galaxis_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Z'), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Largest matrix size used by the catalog (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece.
///
/// Only the top-left `size × size` region of `cells` is meaningful; the rest
/// is always empty. Catalog shapes are 2×2 (O), 4×4 (I) or 3×3 (others).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from a `size × size` prefix of `cells`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0 or larger than [`MAX_SHAPE_SIZE`].
    #[must_use]
    pub const fn new(size: usize, cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        assert!(size > 0 && size <= MAX_SHAPE_SIZE);
        let mut masked = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                masked[y][x] = cells[y][x];
                x += 1;
            }
            y += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let size = size as u8;
        Self {
            size,
            cells: masked,
        }
    }

    /// Side length of the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Returns whether the matrix cell at `(x, y)` is occupied.
    ///
    /// Coordinates outside the matrix are reported as empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.cells[y][x]
    }

    /// Iterates over the occupied cells as `(x, y)` offsets inside the matrix.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        (0..size).flat_map(move |y| {
            (0..size).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    /// Rows of the matrix, each truncated to the matrix size.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        let size = self.size();
        self.cells[..size].iter().map(move |row| &row[..size])
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// `result[j][N-1-i] = matrix[i][j]`, where `i` is the row and `j` the
    /// column. Every catalog shape is square, so no per-kind handling is
    /// needed.
    ///
    /// ```
    /// use galaxis_engine::PieceKind;
    ///
    /// let shape = PieceKind::T.shape();
    /// let rotated = shape
    ///     .rotated_clockwise()
    ///     .rotated_clockwise()
    ///     .rotated_clockwise()
    ///     .rotated_clockwise();
    /// assert_eq!(rotated, shape);
    /// ```
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < n {
            let mut j = 0;
            while j < n {
                cells[j][n - 1 - i] = self.cells[i][j];
                j += 1;
            }
            i += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

/// Offset of a piece's shape matrix relative to the board.
///
/// `(x, y)` is the top-left of the bounding box; `y` may be negative while a
/// piece is partially above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position for a shape: horizontally centered on the top row.
    ///
    /// ```
    /// use galaxis_engine::{PieceKind, Position};
    ///
    /// assert_eq!(Position::spawn(&PieceKind::O.shape()), Position::new(4, 0));
    /// assert_eq!(Position::spawn(&PieceKind::I.shape()), Position::new(3, 0));
    /// ```
    #[must_use]
    pub fn spawn(shape: &Shape) -> Self {
        Self::new((coord(BOARD_WIDTH) - coord(shape.size())).div_euclid(2), 0)
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn left(self) -> Self {
        self.offset(-1, 0)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        self.offset(1, 0)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        self.offset(0, 1)
    }
}

/// The active (falling) piece.
///
/// The shape changes under rotation; the kind is fixed for the lifetime of the
/// piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    kind: PieceKind,
    shape: Shape,
}

impl Tetromino {
    /// Creates a piece of the given kind in its rotation-0 orientation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the same piece with its shape rotated 90° clockwise.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated_clockwise(),
        }
    }

    /// Board coordinates covered by this piece when placed at `position`.
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (position.x + coord(dx), position.y + coord(dy)))
    }
}

const SHAPE_CATALOG: [Shape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        Shape::new(4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // J-piece
        Shape::new(3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        Shape::new(3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        // O-piece
        Shape::new(2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // S-piece
        Shape::new(3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        Shape::new(3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // Z-piece
        Shape::new(3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(
                kind.shape().occupied_cells().count(),
                4,
                "{kind:?} should have exactly 4 cells"
            );
        }
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(PieceKind::I.shape().size(), 4);
        assert_eq!(PieceKind::O.shape().size(), 2);
        for kind in [
            PieceKind::J,
            PieceKind::L,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ] {
            assert_eq!(kind.shape().size(), 3);
        }
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_clockwise();
            }
            assert_eq!(rotated, shape, "{kind:?} should return to its spawn shape");
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // .T.      .T.
        // TTT  ->  .TT
        // ...      .T.
        let rotated = PieceKind::T.shape().rotated_clockwise();
        let rows: Vec<Vec<bool>> = rotated.rows().map(<[bool]>::to_vec).collect();
        assert_eq!(
            rows,
            vec![
                vec![false, true, false],
                vec![false, true, true],
                vec![false, true, false],
            ]
        );
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let rotated = PieceKind::I.shape().rotated_clockwise();
        let cells: Vec<_> = rotated.occupied_cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotate_o_is_fixed_point() {
        let shape = PieceKind::O.shape();
        assert_eq!(shape.rotated_clockwise(), shape);
    }

    #[test]
    fn test_tetromino_rotation_keeps_kind() {
        let piece = Tetromino::new(PieceKind::L);
        let rotated = piece.rotated_clockwise();
        assert_eq!(rotated.kind(), PieceKind::L);
        assert_ne!(rotated.shape(), piece.shape());
    }

    #[test]
    fn test_spawn_positions_are_centered() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let spawn = Position::spawn(&shape);
            let size = i32::try_from(shape.size()).unwrap();
            assert_eq!(spawn.y, 0);
            assert_eq!(spawn.x, (10 - size) / 2, "{kind:?}");
        }
    }

    #[test]
    fn test_cells_at_applies_offset() {
        let piece = Tetromino::new(PieceKind::O);
        let cells: Vec<_> = piece.cells_at(Position::new(3, -1)).collect();
        assert_eq!(cells, vec![(3, -1), (4, -1), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
