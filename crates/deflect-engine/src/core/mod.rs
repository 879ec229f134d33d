//! Board-level data structures with no notion of turns or rules.
//!
//! - [`Position`], [`Direction`], [`Player`] - grid geometry and sides
//! - [`Piece`], [`PieceKind`] - the closed set of piece kinds and their laser contract
//! - [`Board`] - piece occupancy on the 10×10 grid
//! - [`laser_physics`] - pure reflection and shield geometry

pub use self::{board::*, geometry::*, piece::*};

pub(crate) mod board;
pub(crate) mod geometry;
pub mod laser_physics;
pub(crate) mod piece;

/// Width and height of the square board.
pub const BOARD_SIZE: usize = 10;
