use galaxis_engine::{PieceKind, Shape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{BlockDisplay, Tile};

/// Preview of the next piece, trimmed to its occupied cells.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Option<PieceKind>) -> Self {
        Self { piece, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Bounding box of the occupied cells: `(min_x, min_y, width, height)`.
fn occupied_bounds(shape: &Shape) -> (usize, usize, usize, usize) {
    let mut min = (usize::MAX, usize::MAX);
    let mut max = (0, 0);
    for (x, y) in shape.occupied_cells() {
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    if min.0 > max.0 {
        return (0, 0, 0, 0);
    }
    (min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let (min_x, min_y, width, height) = occupied_bounds(&shape);
        let (Ok(cols), Ok(rows)) = (u16::try_from(width), u16::try_from(height)) else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(cols * BlockDisplay::width()),
            Constraint::Length(rows * BlockDisplay::height()),
        );

        let col_constraints = (0..cols).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..rows).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let tile = if shape.is_occupied(min_x + x, min_y + y) {
                    Tile::Piece(piece)
                } else {
                    Tile::Empty
                };
                BlockDisplay::from_tile(tile, false).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_bounds() {
        assert_eq!(occupied_bounds(&PieceKind::I.shape()), (0, 1, 4, 1));
        assert_eq!(occupied_bounds(&PieceKind::O.shape()), (0, 0, 2, 2));
        assert_eq!(occupied_bounds(&PieceKind::T.shape()), (0, 0, 3, 2));
        for kind in PieceKind::ALL {
            let (_, _, width, height) = occupied_bounds(&kind.shape());
            assert!(width <= 4 && height <= 2, "{kind:?}");
        }
    }
}
