use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Origin column of a freshly spawned piece.
pub const PIECE_SPAWN_COL: i32 = 3;
/// Origin row of a freshly spawned piece.
pub const PIECE_SPAWN_ROW: i32 = 0;

const MAX_SHAPE_SIZE: usize = 4;

/// An RGB color carried by a piece and left behind in the grid when it locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct PieceColor {
    r: u8,
    g: u8,
    b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// A rectangular boolean matrix of at most 4×4 cells.
///
/// Cells are addressed as `(dx, dy)` from the top-left corner of the matrix.
/// Shapes are plain values: rotation builds a new shape and never edits one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    rows: u8,
    cols: u8,
}

impl Shape {
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= MAX_SHAPE_SIZE && C > 0 && C <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < R {
            let mut x = 0;
            while x < C {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            rows: R as u8,
            cols: C as u8,
        }
    }

    /// Number of rows in the matrix.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Number of columns in the matrix.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Returns `true` if the cell at `(dx, dy)` is filled.
    ///
    /// Cells outside the matrix are never filled.
    #[must_use]
    pub const fn is_filled(&self, dx: usize, dy: usize) -> bool {
        dx < self.cols() && dy < self.rows() && self.cells[dy][dx]
    }

    /// Returns an iterator of the filled `(dx, dy)` cells, row by row.
    pub fn filled_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.rows()).flat_map(move |dy| {
            (0..self.cols()).filter_map(move |dx| self.cells[dy][dx].then_some((dx, dy)))
        })
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// The matrix is transposed and each resulting row is reversed, so a shape of
    /// `r` rows and `c` columns becomes one of `c` rows and `r` columns.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        let rows = self.rows();
        let cols = self.cols();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < cols {
            let mut j = 0;
            while j < rows {
                cells[i][j] = self.cells[rows - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            cells,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

const I_SHAPE: Shape = Shape::from_rows([[1, 1, 1, 1]]);
const T_SHAPE: Shape = Shape::from_rows([[1, 1, 1], [0, 1, 0]]);
const J_SHAPE: Shape = Shape::from_rows([[1, 1, 1], [0, 0, 1]]);
const L_SHAPE: Shape = Shape::from_rows([[1, 1, 1], [1, 0, 0]]);
const O_SHAPE: Shape = Shape::from_rows([[1, 1], [1, 1]]);
const S_SHAPE: Shape = Shape::from_rows([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = Shape::from_rows([[1, 1, 0], [0, 1, 1]]);

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// I-piece.
    I,
    /// T-piece.
    T,
    /// J-piece.
    J,
    /// L-piece.
    L,
    /// O-piece.
    O,
    /// S-piece.
    S,
    /// Z-piece.
    Z,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Every piece kind, in template order.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::T,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::Z,
    ];

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            Self::I => I_SHAPE,
            Self::T => T_SHAPE,
            Self::J => J_SHAPE,
            Self::L => L_SHAPE,
            Self::O => O_SHAPE,
            Self::S => S_SHAPE,
            Self::Z => Z_SHAPE,
        }
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            Self::I => PieceColor::from_rgb(0x00, 0xf0, 0xf0),
            Self::T => PieceColor::from_rgb(0xf0, 0xa0, 0x00),
            Self::J => PieceColor::from_rgb(0xf0, 0x00, 0x00),
            Self::L => PieceColor::from_rgb(0x00, 0x00, 0xf0),
            Self::O => PieceColor::from_rgb(0xf0, 0xf0, 0x00),
            Self::S => PieceColor::from_rgb(0x00, 0xf0, 0x00),
            Self::Z => PieceColor::from_rgb(0xa0, 0x00, 0xf0),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::T => 'T',
            Self::J => 'J',
            Self::L => 'L',
            Self::O => 'O',
            Self::S => 'S',
            Self::Z => 'Z',
        }
    }
}

/// Origin of a piece on the grid: the grid cell under the top-left of its shape matrix.
///
/// Coordinates are signed. Columns outside `0..10` only ever exist on rejected candidates,
/// and negative rows are the hidden area above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    col: i32,
    row: i32,
}

impl PiecePosition {
    /// Position at which every new piece appears.
    pub const SPAWN: Self = Self::new(PIECE_SPAWN_COL, PIECE_SPAWN_ROW);

    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }
}

/// A falling piece: kind, current shape and origin.
///
/// Pieces are immutable values. Movement and rotation return new `Piece` instances,
/// which are validated against the grid before they replace the current one.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind, PiecePosition};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position(), PiecePosition::new(3, 0));
///
/// let moved = piece.right().down();
/// assert_eq!(moved.position(), PiecePosition::new(4, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Instantiates the template of `kind` at the spawn position.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position: PiecePosition::SPAWN,
        }
    }

    /// Returns the same piece placed at `position`.
    #[must_use]
    pub const fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns an iterator of the absolute `(col, row)` grid cells this piece covers.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let position = self.position;
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (position.col + dx as i32, position.row + dy as i32))
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.with_position(self.position.offset(-1, 0))
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.with_position(self.position.offset(1, 0))
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.with_position(self.position.offset(0, 1))
    }

    /// Returns the piece rotated 90° clockwise about its origin.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn render(shape: Shape) -> Vec<String> {
        (0..shape.rows())
            .map(|dy| {
                (0..shape.cols())
                    .map(|dx| if shape.is_filled(dx, dy) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().filled_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_template_colors() {
        assert_eq!(PieceKind::I.color().to_string(), "#00f0f0");
        assert_eq!(PieceKind::T.color().to_string(), "#f0a000");
        assert_eq!(PieceKind::J.color().to_string(), "#f00000");
        assert_eq!(PieceKind::L.color().to_string(), "#0000f0");
        assert_eq!(PieceKind::O.color().to_string(), "#f0f000");
        assert_eq!(PieceKind::S.color().to_string(), "#00f000");
        assert_eq!(PieceKind::Z.color().to_string(), "#a000f0");
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let shape = PieceKind::I.shape().rotated();
        assert_eq!((shape.rows(), shape.cols()), (4, 1));
        assert_eq!(render(shape), ["#", "#", "#", "#"]);
    }

    #[test]
    fn test_rotate_is_clockwise() {
        assert_eq!(render(PieceKind::T.shape()), ["###", ".#."]);
        assert_eq!(render(PieceKind::T.shape().rotated()), [".#", "##", ".#"]);
        assert_eq!(render(PieceKind::L.shape().rotated()), ["##", ".#", ".#"]);
        assert_eq!(render(PieceKind::S.shape().rotated()), ["#.", "##", ".#"]);
    }

    #[test]
    fn test_new_piece_spawns_at_column_three_row_zero() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.position(), PiecePosition::new(3, 0));
            assert_eq!(piece.shape(), &kind.shape());
        }
    }

    #[test]
    fn test_cells_are_offset_by_origin() {
        let piece = Piece::new(PieceKind::T).with_position(PiecePosition::new(-1, 5));
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, [(-1, 5), (0, 5), (1, 5), (0, 6)]);
    }

    #[test]
    fn test_moves_keep_shape() {
        let piece = Piece::new(PieceKind::Z);
        assert_eq!(piece.left().position(), PiecePosition::new(2, 0));
        assert_eq!(piece.right().position(), PiecePosition::new(4, 0));
        assert_eq!(piece.down().position(), PiecePosition::new(3, 1));
        assert_eq!(piece.left().shape(), piece.shape());
        assert_eq!(piece.rotated().position(), piece.position());
    }

    #[test]
    fn test_distribution_covers_every_kind() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            let kind: PieceKind = rng.random();
            seen[PieceKind::ALL.iter().position(|k| *k == kind).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    proptest! {
        #[test]
        fn four_rotations_restore_shape(kind in 0..PieceKind::LEN, col in -2..8_i32, row in -2..18_i32) {
            let piece = Piece::new(PieceKind::ALL[kind]).with_position(PiecePosition::new(col, row));
            let rotated = piece.rotated().rotated().rotated().rotated();
            prop_assert_eq!(rotated, piece);
        }

        #[test]
        fn rotation_swaps_dimensions(kind in 0..PieceKind::LEN) {
            let shape = PieceKind::ALL[kind].shape();
            let rotated = shape.rotated();
            prop_assert_eq!((rotated.rows(), rotated.cols()), (shape.cols(), shape.rows()));
            prop_assert_eq!(rotated.filled_cells().count(), 4);
        }
    }
}
