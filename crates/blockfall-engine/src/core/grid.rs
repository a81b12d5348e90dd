use super::piece::{Piece, PieceColor};

/// Number of columns in the grid.
pub const GRID_WIDTH: usize = 10;
/// Number of rows in the grid.
pub const GRID_HEIGHT: usize = 20;

/// A single settled cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub const fn color(self) -> Option<PieceColor> {
        match self {
            Self::Empty => None,
            Self::Filled(color) => Some(color),
        }
    }
}

pub type GridRow = [Cell; GRID_WIDTH];

const EMPTY_ROW: GridRow = [Cell::Empty; GRID_WIDTH];

/// The settled-cell matrix, `GRID_HEIGHT` rows of `GRID_WIDTH` cells.
///
/// Row 0 is the top of the visible area. Coordinates are signed so that callers can
/// ask about cells a candidate piece would cover without range-checking first:
///
/// - columns outside `0..GRID_WIDTH` and rows at or below `GRID_HEIGHT` are blocked
/// - negative rows are the hidden area above the grid and never block
///
/// The grid never references pieces; merging keeps only the piece's color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; GRID_HEIGHT],
    };

    fn index(col: i32, row: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(col).ok().filter(|c| *c < GRID_WIDTH)?;
        let row = usize::try_from(row).ok().filter(|r| *r < GRID_HEIGHT)?;
        Some((col, row))
    }

    /// Returns the cell at `(col, row)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        Self::index(col, row).map(|(c, r)| self.rows[r][c])
    }

    /// Returns the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> + '_ {
        self.rows.iter()
    }

    /// Returns `true` if `(col, row)` blocks a piece.
    ///
    /// Out-of-range columns and rows past the bottom fail closed.
    /// Rows above the top never block.
    #[must_use]
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        let Some(col) = usize::try_from(col).ok().filter(|c| *c < GRID_WIDTH) else {
            return true;
        };
        let Ok(row) = usize::try_from(row) else {
            return false;
        };
        self.rows.get(row).is_none_or(|cells| cells[col].is_filled())
    }

    /// Returns `true` if any filled cell of `piece` is occupied.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(col, row)| self.is_occupied(col, row))
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// The caller must have checked [`Grid::collides`] first. Cells above the top or
    /// otherwise outside the grid are skipped.
    pub fn merge(&mut self, piece: &Piece) {
        let color = piece.color();
        for (col, row) in piece.cells() {
            if let Some((c, r)) = Self::index(col, row) {
                self.rows[r][c] = Cell::Filled(color);
            }
        }
    }

    #[must_use]
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|c| c.is_filled()))
    }

    /// Removes every complete row and returns how many were removed.
    ///
    /// Rows are scanned from the bottom up. Removing a row shifts everything above it
    /// down by one and inserts an empty row at the top. The same index is then checked
    /// again, since it now holds the row that used to be above it.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = GRID_HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_complete(row) {
                self.rows.copy_within(..row, 1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
                continue;
            }
            y -= 1;
        }
        cleared
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, col: usize, row: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, row: usize, cell: Cell) {
        self.rows[row] = [cell; GRID_WIDTH];
    }
}
