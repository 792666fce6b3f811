use galaxis_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// What a single grid cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Ghost,
    Piece(PieceKind),
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        cell.kind().map_or(Self::Empty, Self::Piece)
    }
}

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_tile(tile: Tile, show_dots: bool) -> Self {
        match tile {
            Tile::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Tile::Empty => Self::new(style::EMPTY, ""),
            Tile::Ghost => Self::new(style::GHOST, "[]"),
            Tile::Piece(kind) => Self::new(kind_style(kind), ""),
        }
    }
}

fn kind_style(kind: PieceKind) -> Style {
    match kind {
        PieceKind::I => style::I_BLOCK,
        PieceKind::O => style::O_BLOCK,
        PieceKind::S => style::S_BLOCK,
        PieceKind::Z => style::Z_BLOCK,
        PieceKind::J => style::J_BLOCK,
        PieceKind::L => style::L_BLOCK,
        PieceKind::T => style::T_BLOCK,
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_from_cell() {
        assert_eq!(Tile::from(Cell::Empty), Tile::Empty);
        assert_eq!(
            Tile::from(Cell::Occupied(PieceKind::S)),
            Tile::Piece(PieceKind::S)
        );
    }

    #[test]
    fn test_block_render_fills_area() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        BlockDisplay::from_tile(Tile::Ghost, true).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "[");
        assert_eq!(buf[(1, 0)].symbol(), "]");
    }
}
