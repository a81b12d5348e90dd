//! Core data structures: the settled-cell grid and falling pieces.
//!
//! - [`Grid`] - Fixed 10×20 matrix of settled cells with row clearing
//! - [`Piece`] - A shape, its color and its origin on the grid
//! - [`PieceKind`] - The seven canonical templates

pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;
