//! Shape module - a tetromino instance with its current orientation
//!
//! A [`Shape`] is a small `Copy` value. Rotation never mutates the receiver; it
//! returns a new value that the caller commits only after validating it
//! against the board.

use rand::Rng;

use crate::pieces::{canonical_shape, CellOffset, PieceShape};
use crate::rng::random_variant;
use crate::types::Tetromino;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: Tetromino,
    coords: PieceShape,
}

impl Shape {
    /// An empty shape ([`Tetromino::NoShape`]).
    pub fn new() -> Self {
        Self::of(Tetromino::NoShape)
    }

    /// A shape in the canonical orientation of `kind`.
    pub fn of(kind: Tetromino) -> Self {
        Self {
            kind,
            coords: canonical_shape(kind),
        }
    }

    /// A uniformly random playable shape. Consumes one draw from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::of(random_variant(rng))
    }

    /// Switch to `kind`, resetting any rotation.
    pub fn set_variant(&mut self, kind: Tetromino) {
        *self = Self::of(kind);
    }

    pub fn set_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::random(rng);
    }

    pub fn kind(&self) -> Tetromino {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn coords(&self) -> &PieceShape {
        &self.coords
    }

    pub fn x(&self, index: usize) -> i8 {
        self.coords[index].0
    }

    pub fn y(&self, index: usize) -> i8 {
        self.coords[index].1
    }

    /// Rotate 90° counter-clockwise about the origin: (x, y) -> (y, -x).
    ///
    /// Squares are rotation-invariant and come back unchanged.
    #[must_use]
    pub fn rotate_left(&self) -> Self {
        self.map_coords(|(x, y)| (y, -x))
    }

    /// Rotate 90° clockwise about the origin: (x, y) -> (-y, x).
    #[must_use]
    pub fn rotate_right(&self) -> Self {
        self.map_coords(|(x, y)| (-y, x))
    }

    fn map_coords(&self, f: impl Fn(CellOffset) -> CellOffset) -> Self {
        if self.kind == Tetromino::Square {
            return *self;
        }
        Self {
            kind: self.kind,
            coords: self.coords.map(f),
        }
    }

    /// Absolute board cells when the origin sits at (x, y). Offset y points down,
    /// board y points up.
    pub fn cells_at(&self, x: i8, y: i8) -> [(i8, i8); 4] {
        self.coords
            .map(|(ox, oy)| (x.saturating_add(ox), y.saturating_sub(oy)))
    }

    pub fn min_x(&self) -> i8 {
        self.coords.iter().map(|c| c.0).min().unwrap_or(0)
    }

    pub fn min_y(&self) -> i8 {
        self.coords.iter().map(|c| c.1).min().unwrap_or(0)
    }

    pub fn max_x(&self) -> i8 {
        self.coords.iter().map(|c| c.0).max().unwrap_or(0)
    }

    pub fn max_y(&self) -> i8 {
        self.coords.iter().map(|c| c.1).max().unwrap_or(0)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}
