//! Pieces module - canonical tetromino geometry
//!
//! Every variant is described by 4 cell offsets relative to the piece's local
//! origin. Offsets use a y-down convention: a piece whose origin sits at
//! board row `y` places an offset `(ox, oy)` at row `y - oy`.

use crate::types::Tetromino;

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the piece origin
pub type PieceShape = [CellOffset; 4];

const NO_SHAPE: PieceShape = [(0, 0), (0, 0), (0, 0), (0, 0)];
const Z_SHAPE: PieceShape = [(0, -1), (0, 0), (-1, 0), (-1, 1)];
const S_SHAPE: PieceShape = [(0, -1), (0, 0), (1, 0), (1, 1)];
const LINE_SHAPE: PieceShape = [(0, -1), (0, 0), (0, 1), (0, 2)];
const T_SHAPE: PieceShape = [(-1, 0), (0, 0), (1, 0), (0, 1)];
const SQUARE_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];
const L_SHAPE: PieceShape = [(-1, -1), (0, -1), (0, 0), (0, 1)];
const MIRRORED_L_SHAPE: PieceShape = [(1, -1), (0, -1), (0, 0), (0, 1)];

/// Get the canonical (unrotated) offsets for a variant.
///
/// The result is a copy; callers may modify it freely without affecting the table.
pub fn canonical_shape(kind: Tetromino) -> PieceShape {
    match kind {
        Tetromino::NoShape => NO_SHAPE,
        Tetromino::Z => Z_SHAPE,
        Tetromino::S => S_SHAPE,
        Tetromino::Line => LINE_SHAPE,
        Tetromino::T => T_SHAPE,
        Tetromino::Square => SQUARE_SHAPE,
        Tetromino::L => L_SHAPE,
        Tetromino::MirroredL => MIRRORED_L_SHAPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_shape_is_an_independent_copy() {
        let mut shape = canonical_shape(Tetromino::T);
        shape[0] = (9, 9);
        assert_eq!(shape[0], (9, 9));
        assert_eq!(canonical_shape(Tetromino::T)[0], (-1, 0));
    }

    #[test]
    fn playable_shapes_have_four_distinct_cells() {
        for kind in Tetromino::PLAYABLE {
            let shape = canonical_shape(kind);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(shape[i], shape[j], "{:?} repeats a cell", kind);
                }
            }
        }
    }

    #[test]
    fn no_shape_is_all_origin() {
        assert!(canonical_shape(Tetromino::NoShape)
            .iter()
            .all(|&c| c == (0, 0)));
    }
}
