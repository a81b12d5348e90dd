use blockfall_engine::{Cell, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

const PREVIEW_SIZE: u16 = 4;

/// A 4×4 preview surface with a piece's shape centered in it.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(self, piece: Option<Piece>) -> Self {
        Self { piece, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PREVIEW_SIZE * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        PREVIEW_SIZE * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_at(&self, x: usize, y: usize) -> Cell {
        let Some(piece) = &self.piece else {
            return Cell::Empty;
        };
        let shape = piece.shape();
        let size = usize::from(PREVIEW_SIZE);
        let offset_x = (size - shape.cols()) / 2;
        let offset_y = (size - shape.rows()) / 2;
        let filled = x
            .checked_sub(offset_x)
            .zip(y.checked_sub(offset_y))
            .is_some_and(|(dx, dy)| shape.is_filled(dx, dy));
        if filled {
            Cell::Filled(piece.color())
        } else {
            Cell::Empty
        }
    }
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

        let preview_area = area.centered(
            Constraint::Length(PREVIEW_SIZE * CellDisplay::width()),
            Constraint::Length(PREVIEW_SIZE * CellDisplay::height()),
        );
        let col_constraints =
            (0..PREVIEW_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..PREVIEW_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = preview_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                CellDisplay::from_cell(self.cell_at(x, y), false).render(grid_cell, buf);
            }
        }
    }
}
