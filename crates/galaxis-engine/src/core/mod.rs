pub use self::{board::*, piece::*, rotation::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod rotation;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

/// Converts a small grid index into a signed board coordinate.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn coord(value: usize) -> i32 {
    value as i32
}
