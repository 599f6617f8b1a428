//! Pieces module - tetromino shape table, spawn placement and kick table
//!
//! Each kind has four precomputed rotation states stored as mino offsets inside
//! the kind's bounding box (4x4 for I, 2x2 for O, 3x3 for the rest). Offsets
//! are listed in row-major order of the box, so they read like the matrix.
//!
//! Rotation uses one shared kick list for every kind and transition instead of
//! per-kind SRS tables.

use tetrion_types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece origin (top-left of its box)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece origin
pub type PieceShape = [MinoOffset; 4];

/// Shapes indexed by `[kind][rotation]`, kinds in `PieceKind::ALL` order
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Kick candidates tried in order when a rotation collides:
/// identity, right, left, up, up-right, up-left, down 2, down 2-right, down 2-left.
pub const KICKS: [(i8, i8); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, -1),
    (0, 2),
    (1, 2),
    (-1, 2),
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index() as usize]
}

/// Side length of the kind's rotation box
pub fn box_size(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

/// Number of fully empty rows at the top of the shape's box
pub fn top_empty_rows(shape: &PieceShape) -> i8 {
    shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0)
}

/// Spawn origin for a kind on a grid of `grid_width` columns
///
/// Horizontally the rotation-0 box is centered; vertically the piece is lifted
/// by its empty header rows so its first filled row sits on row 0.
pub fn spawn_position(kind: PieceKind, grid_width: u8) -> (i8, i8) {
    let size = box_size(kind);
    let x = (grid_width.saturating_sub(size) / 2) as i8;
    let y = -top_empty_rows(&get_shape(kind, Rotation::Spawn));
    (x, y)
}

/// Kick offsets for a rotation transition
///
/// The list is the same for every transition; the arguments are kept so callers
/// read like a per-transition lookup.
pub fn get_kicks(_from: Rotation, _to: Rotation) -> &'static [(i8, i8)] {
    &KICKS
}

/// Shape as a boolean matrix the size of the kind's box (row-major)
pub fn shape_matrix(kind: PieceKind, rotation: Rotation) -> Vec<Vec<bool>> {
    let size = box_size(kind) as usize;
    let mut matrix = vec![vec![false; size]; size];
    for (dx, dy) in get_shape(kind, rotation) {
        matrix[dy as usize][dx as usize] = true;
    }
    matrix
}

/// A tetromino: kind, rotation state and origin on the grid
///
/// `shape()` is always `SHAPES[kind][rotation]`; position and rotation only
/// change through the state machine after a collision check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece at its spawn position in rotation 0
    pub fn new(kind: PieceKind, grid_width: u8) -> Self {
        let (x, y) = spawn_position(kind, grid_width);
        Self {
            kind,
            rotation: Rotation::Spawn,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Rotation state reached by turning in `direction` (+1 cw, -1 ccw)
    ///
    /// Does not change the piece; the caller checks collision and kicks first.
    pub fn rotated(&self, direction: i8) -> Rotation {
        self.rotation.turn(direction)
    }

    /// Absolute grid coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Color tag of the piece
    pub fn color(&self) -> u32 {
        self.kind.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_distinct_minos_inside_its_box() {
        for kind in PieceKind::ALL {
            let size = box_size(kind) as i8;
            for r in 0..4 {
                let shape = get_shape(kind, Rotation::from_index(r));
                for (i, a) in shape.iter().enumerate() {
                    assert!(a.0 >= 0 && a.0 < size && a.1 >= 0 && a.1 < size);
                    assert!(shape[i + 1..].iter().all(|b| b != a));
                }
            }
        }
    }

    #[test]
    fn test_spawn_positions_on_default_width() {
        assert_eq!(spawn_position(PieceKind::I, 10), (3, -1));
        assert_eq!(spawn_position(PieceKind::O, 10), (4, 0));
        assert_eq!(spawn_position(PieceKind::T, 10), (3, 0));
        assert_eq!(spawn_position(PieceKind::L, 10), (3, 0));
    }

    #[test]
    fn test_spawned_piece_first_row_is_row_zero() {
        for kind in PieceKind::ALL {
            let piece = Tetromino::new(kind, 10);
            let top = piece.cells().iter().map(|&(_, y)| y).min().unwrap();
            assert_eq!(top, 0, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotated_does_not_mutate() {
        let piece = Tetromino::new(PieceKind::T, 10);
        assert_eq!(piece.rotated(1), Rotation::Right);
        assert_eq!(piece.rotated(-1), Rotation::Left);
        assert_eq!(piece.rotation, Rotation::Spawn);
    }

    #[test]
    fn test_kicks_are_shared_and_start_with_identity() {
        let a = get_kicks(Rotation::Spawn, Rotation::Right);
        let b = get_kicks(Rotation::Left, Rotation::Reverse);
        assert_eq!(a, b);
        assert_eq!(a[0], (0, 0));
        assert_eq!(a.len(), 9);
    }

    #[test]
    fn test_shape_matrix_matches_offsets() {
        let m = shape_matrix(PieceKind::T, Rotation::Spawn);
        assert_eq!(
            m,
            vec![
                vec![false, true, false],
                vec![true, true, true],
                vec![false, false, false],
            ]
        );
        assert_eq!(shape_matrix(PieceKind::I, Rotation::Right).len(), 4);
    }
}
