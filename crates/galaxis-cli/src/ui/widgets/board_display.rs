use std::iter;

use galaxis_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, PieceSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{BlockDisplay, Tile};

type TileGrid = [[Tile; BOARD_WIDTH]; BOARD_HEIGHT];

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<&'a PieceSnapshot>,
    falling_piece: Option<&'a PieceSnapshot>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Option<&'a PieceSnapshot>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn falling_piece(self, piece: Option<&'a PieceSnapshot>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        20 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Locked cells, then the ghost, then the falling piece on top.
    fn tiles(&self) -> TileGrid {
        let mut tiles = [[Tile::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for (tile_row, row) in iter::zip(&mut tiles, self.board.rows()) {
            for (tile, cell) in iter::zip(tile_row, row) {
                *tile = Tile::from(*cell);
            }
        }
        let overlays = [
            self.ghost.map(|piece| (piece, Tile::Ghost)),
            self.falling_piece
                .map(|piece| (piece, Tile::Piece(piece.kind))),
        ];
        for (piece, tile) in overlays.into_iter().flatten() {
            for cell in &piece.cells {
                let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
                    continue;
                };
                if let Some(slot) = tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *slot = tile;
                }
            }
        }
        tiles
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                BlockDisplay::from_tile(tile, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use galaxis_engine::{PieceKind, Position, Tetromino};

    use super::*;

    #[test]
    fn test_falling_piece_drawn_over_ghost() {
        let board = Board::from_ascii("Z.........");
        let piece = Tetromino::new(PieceKind::O);
        let falling = PieceSnapshot::new(&piece, Position::new(4, 17));
        let ghost = PieceSnapshot::new(&piece, Position::new(4, 18));
        let display = BoardDisplay::new(&board)
            .falling_piece(Some(&falling))
            .ghost(Some(&ghost));
        let tiles = display.tiles();
        assert_eq!(tiles[19][0], Tile::Piece(PieceKind::Z));
        assert_eq!(tiles[17][4], Tile::Piece(PieceKind::O));
        assert_eq!(tiles[18][5], Tile::Piece(PieceKind::O));
        assert_eq!(tiles[19][4], Tile::Ghost);
        assert_eq!(tiles[16][4], Tile::Empty);
    }

    #[test]
    fn test_cells_above_board_are_skipped() {
        let board = Board::new();
        let piece = Tetromino::new(PieceKind::I).rotated_clockwise();
        let falling = PieceSnapshot::new(&piece, Position::new(0, -2));
        let tiles = BoardDisplay::new(&board)
            .falling_piece(Some(&falling))
            .tiles();
        assert_eq!(tiles[0][2], Tile::Piece(PieceKind::I));
        assert_eq!(tiles[1][2], Tile::Piece(PieceKind::I));
        assert_eq!(tiles[2][2], Tile::Empty);
    }

    #[test]
    fn test_render_size() {
        let board = Board::new();
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (22, 22));
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        assert_eq!(buf[(1, 1)].symbol(), ".");
    }
}
