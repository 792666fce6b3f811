use super::{
    board::Board,
    piece::{Position, Tetromino},
};

/// Horizontal offsets tried, in order, after a clockwise rotation.
///
/// This is a simplified kick table: no vertical kicks and no per-kind data.
pub const KICK_OFFSETS: [i32; 5] = [0, 1, 2, -1, -2];

/// Rotates `piece` clockwise, shifting it sideways if the rotation collides.
///
/// Candidates are the rotated piece at `position` shifted by each entry of
/// [`KICK_OFFSETS`]; the first candidate that does not collide wins. Returns
/// `None` when every candidate collides, in which case the caller keeps the
/// piece as it was.
///
/// # Example
///
/// ```
/// use galaxis_engine::{Board, PieceKind, Position, Tetromino, rotate_with_kick};
///
/// let board = Board::new();
/// // A vertical I-piece flush against the left wall.
/// let piece = Tetromino::new(PieceKind::I).rotated_clockwise();
/// let position = Position::new(-2, 0);
///
/// let (rotated, kicked) = rotate_with_kick(&board, &piece, position).unwrap();
/// assert_eq!(rotated.kind(), PieceKind::I);
/// assert_eq!(kicked, Position::new(0, 0));
/// ```
#[must_use]
pub fn rotate_with_kick(
    board: &Board,
    piece: &Tetromino,
    position: Position,
) -> Option<(Tetromino, Position)> {
    let rotated = piece.rotated_clockwise();
    KICK_OFFSETS
        .iter()
        .map(|&dx| position.offset(dx, 0))
        .find(|candidate| !board.is_colliding(rotated.shape(), *candidate))
        .map(|candidate| (rotated, candidate))
}
